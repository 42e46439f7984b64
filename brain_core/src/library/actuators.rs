use crate::entities::ImpulseType;
use crate::brain::RuleContext;

pub(super) fn movement(ctx: &mut RuleContext<'_>) {
    let Some(direction) = ctx.state.direction else {
        return;
    };
    let speed = ctx.state.speed.unwrap_or_else(|| ctx.default_speed());
    let impulse_type = if ctx.state.exclusive_move {
        ImpulseType::Exclusive
    } else {
        ImpulseType::Ambient
    };
    let actor = ctx.actor();
    ctx.stage.queue_impulse(actor, direction, speed, impulse_type);
}

pub(super) fn switch_page(ctx: &mut RuleContext<'_>) {
    if let Some(page) = ctx.state.page {
        ctx.brain.switch_page(page);
    }
}

/// Switch, then run the new page immediately.
pub(super) fn call_page(ctx: &mut RuleContext<'_>) {
    if let Some(page) = ctx.state.page {
        ctx.brain.switch_page(page);
        ctx.brain.execute(ctx.stage);
    }
}

/// Destroy the first target, or the actor itself.
pub(super) fn vanish(ctx: &mut RuleContext<'_>) {
    let actor = ctx.actor();
    let vanishee = ctx.state.first_target().map_or(actor, |t| t.character);
    if vanishee == actor {
        ctx.brain.end_tick();
    }
    ctx.stage.destroy(vanishee);
}

pub(super) fn camera_follow(ctx: &mut RuleContext<'_>) {
    let target = ctx
        .state
        .first_target()
        .map_or_else(|| ctx.actor(), |t| t.character);
    ctx.stage
        .notify(crate::stage::StageEvent::CameraFollow(target));
}

pub(super) fn express(ctx: &mut RuleContext<'_>) {
    if let Some(feeling) = ctx.state.feeling {
        ctx.brain.set_feeling(Some(feeling));
    }
}
