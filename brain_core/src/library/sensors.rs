use std::cmp::Ordering;

use crate::brain::{RuleContext, Target};
use crate::stage::Button;

pub(super) fn always(ctx: &mut RuleContext<'_>) {
    ctx.state.exec = Some(true);
}

/// Every other live character, nearest first.
pub(super) fn see(ctx: &mut RuleContext<'_>) {
    let actor = ctx.actor();
    let Some(origin) = ctx.stage.position_of(actor) else {
        return;
    };
    let mut targets: Vec<Target> = ctx
        .stage
        .characters_except(actor)
        .map(|c| Target {
            character: c.id,
            dist_sq: c.position.distance_squared(origin),
        })
        .collect();
    targets.sort_by(|a, b| a.dist_sq.partial_cmp(&b.dist_sq).unwrap_or(Ordering::Equal));
    ctx.state.exec = Some(!targets.is_empty());
    ctx.state.targets = Some(targets);
}

pub(super) fn bump(ctx: &mut RuleContext<'_>) {
    let targets: Vec<Target> = ctx
        .character()
        .map(|c| {
            c.bumps
                .iter()
                .filter(|id| ctx.stage.position_of(**id).is_some())
                .map(|id| Target {
                    character: *id,
                    dist_sq: 0.0,
                })
                .collect()
        })
        .unwrap_or_default();
    ctx.state.exec = Some(!targets.is_empty());
    ctx.state.targets = Some(targets);
}

pub(super) fn dpad(ctx: &mut RuleContext<'_>) {
    let direction = ctx.stage.controller.dpad();
    if direction != glam::Vec2::ZERO {
        ctx.state.exec = Some(true);
        ctx.state.direction = Some(direction);
    }
}

/// Writes an explicit false when released so edge filters can see the press.
pub(super) fn button(ctx: &mut RuleContext<'_>, button: Button) {
    ctx.state.exec = Some(ctx.stage.controller.is_pressed(button));
}
