use glam::Vec2;

use crate::brain::RuleContext;
use crate::entities::Feeling;

pub(super) fn me(ctx: &mut RuleContext<'_>) {
    let target = ctx.self_target();
    ctx.state.targets = Some(vec![target]);
    ctx.state.direct_target = Some(target);
}

pub(super) fn it(ctx: &mut RuleContext<'_>) {
    let Some(mut targets) = ctx.state.targets.take() else {
        return;
    };
    if targets.is_empty() {
        return;
    }
    targets.truncate(1);
    ctx.state.direct_target = targets.first().copied();
    ctx.state.targets = Some(targets);
}

/// Keep targets of one kind; the nearest becomes the direct target.
pub(super) fn kind(ctx: &mut RuleContext<'_>, kind: &str) {
    let Some(mut targets) = ctx.state.targets.take() else {
        return;
    };
    targets.retain(|target| {
        ctx.stage
            .get_character(target.character)
            .is_some_and(|c| c.kind() == kind)
    });
    ctx.state.direct_target = targets.first().copied();
    ctx.state.targets = Some(targets);
}

pub(super) fn quickly(ctx: &mut RuleContext<'_>) {
    let default_speed = ctx.default_speed();
    let speed = ctx.state.speed.unwrap_or(default_speed);
    ctx.state.speed = Some(speed + default_speed * 0.5);
}

pub(super) fn slowly(ctx: &mut RuleContext<'_>) {
    let speed = ctx.state.speed.unwrap_or_else(|| ctx.default_speed());
    ctx.state.speed = Some(speed * 0.75);
}

pub(super) fn toward(ctx: &mut RuleContext<'_>) {
    if let Some(heading) = heading_to_target(ctx) {
        ctx.state.direction = Some(heading);
    }
}

pub(super) fn away(ctx: &mut RuleContext<'_>) {
    if let Some(heading) = heading_to_target(ctx) {
        ctx.state.direction = Some(-heading);
    }
}

/// Sidestep the target, perpendicular to the line between the two characters.
pub(super) fn avoid(ctx: &mut RuleContext<'_>) {
    let Some((actor_pos, target_pos)) = target_positions(ctx) else {
        return;
    };
    let Some(to_target) = (target_pos - actor_pos).try_normalize() else {
        return;
    };
    let heading = ctx.character().and_then(|c| c.next_direction());
    let dot = heading.map_or(0.0, |h| h.dot(to_target));
    // Already heading away.
    if dot < 0.0 {
        return;
    }

    let mut sign = Vec2::new(-1.0, 1.0);
    let mut transposed = Vec2::new(to_target.y, to_target.x);
    if let Some(heading) = heading {
        if heading.x.abs() > heading.y.abs() {
            sign.y = if actor_pos.y > target_pos.y { 1.0 } else { -1.0 };
            transposed.y = transposed.y.abs();
        } else {
            sign.x = if actor_pos.x > target_pos.x { 1.0 } else { -1.0 };
            transposed.x = transposed.x.abs();
        }
    }
    ctx.state.direction = Some(transposed * sign);
    ctx.state.exclusive_move = true;
}

pub(super) fn page(ctx: &mut RuleContext<'_>, index: usize) {
    ctx.state.page = Some(index);
}

pub(super) fn feel(ctx: &mut RuleContext<'_>, feeling: Feeling) {
    ctx.state.feeling = Some(feeling);
}

fn target_positions(ctx: &RuleContext<'_>) -> Option<(Vec2, Vec2)> {
    let target = ctx.state.first_target()?;
    let actor_pos = ctx.stage.position_of(ctx.actor())?;
    let target_pos = ctx.stage.position_of(target.character)?;
    Some((actor_pos, target_pos))
}

fn heading_to_target(ctx: &RuleContext<'_>) -> Option<Vec2> {
    let (actor_pos, target_pos) = target_positions(ctx)?;
    (target_pos - actor_pos).try_normalize()
}
