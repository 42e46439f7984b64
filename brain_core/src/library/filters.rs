use crate::brain::{RuleContext, Target};

pub(super) fn me(ctx: &mut RuleContext<'_>) {
    ctx.state.targets = Some(vec![ctx.self_target()]);
    ctx.state.exec = Some(true);
}

pub(super) fn it(ctx: &mut RuleContext<'_>) {
    let Some(targets) = ctx.state.targets.as_mut() else {
        return;
    };
    if targets.is_empty() {
        return;
    }
    targets.truncate(1);
    ctx.state.exec = Some(true);
}

pub(super) fn kind(ctx: &mut RuleContext<'_>, kind: &str) {
    let stage = &*ctx.stage;
    retain_targets(ctx.state, |target| {
        stage
            .get_character(target.character)
            .is_some_and(|c| c.kind() == kind)
    });
}

/// Repeats tighten the cutoff.
pub(super) fn nearby(ctx: &mut RuleContext<'_>) {
    if ctx.state.targets.is_none() {
        return;
    }
    let cutoff = next_cutoff(ctx, 0.5);
    retain_targets(ctx.state, |target| target.dist_sq < cutoff);
}

/// Repeats widen the cutoff.
pub(super) fn faraway(ctx: &mut RuleContext<'_>) {
    if ctx.state.targets.is_none() {
        return;
    }
    let cutoff = next_cutoff(ctx, 1.5);
    retain_targets(ctx.state, |target| target.dist_sq >= cutoff);
}

fn next_cutoff(ctx: &mut RuleContext<'_>, repeat_scale: f32) -> f32 {
    let cutoff = match ctx.state.dist_cutoff_sq {
        Some(previous) => previous * repeat_scale,
        None => ctx.config().sensing.dist_cutoff_sq,
    };
    ctx.state.dist_cutoff_sq = Some(cutoff);
    cutoff
}

/// Narrow the targets in place. Absent targets stay absent.
fn retain_targets(
    state: &mut crate::brain::RuleState,
    mut keep: impl FnMut(&Target) -> bool,
) {
    let Some(targets) = state.targets.as_mut() else {
        return;
    };
    targets.retain(|target| keep(target));
    state.exec = Some(!targets.is_empty());
}
