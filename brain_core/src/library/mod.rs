//! Tile behaviors, bound by tile id.
//!
//! Each behavior reads and writes the rule's [`RuleState`](crate::brain::RuleState)
//! through a [`RuleContext`]. Ids without a binding resolve to [`Behavior::Noop`].

mod actuators;
mod filters;
mod modifiers;
mod sensors;

use crate::brain::RuleContext;
use crate::entities::Feeling;
use crate::stage::Button;

/// The runtime function behind a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Noop,

    // Sensors
    Always,
    See,
    Bump,
    DPad,
    Button(Button),

    // Filters
    FilterMe,
    FilterIt,
    FilterKind(&'static str),
    Nearby,
    Faraway,

    // Actuators
    Move,
    SwitchPage,
    CallPage,
    Vanish,
    CameraFollow,
    Express,

    // Modifiers
    ModifierMe,
    ModifierIt,
    ModifierKind(&'static str),
    Toward,
    Away,
    Avoid,
    Quickly,
    Slowly,
    Page(usize),
    Feel(Feeling),
}

impl Behavior {
    pub fn resolve(id: Option<&str>) -> Self {
        id.map_or(Behavior::Noop, Self::from_id)
    }

    pub fn from_id(id: &str) -> Self {
        match id {
            "sensor.always" => Behavior::Always,
            "sensor.see" => Behavior::See,
            "sensor.bump" => Behavior::Bump,
            "sensor.dpad" => Behavior::DPad,
            "sensor.button.a" => Behavior::Button(Button::A),
            "sensor.button.b" => Behavior::Button(Button::B),

            "filter.me" => Behavior::FilterMe,
            "filter.it" => Behavior::FilterIt,
            "filter.kodu" => Behavior::FilterKind("kodu"),
            "filter.tree" => Behavior::FilterKind("tree"),
            "filter.apple" => Behavior::FilterKind("apple"),
            "filter.nearby" => Behavior::Nearby,
            "filter.faraway" => Behavior::Faraway,
            // Edge and negation filters act through the rule's condition policy.
            "filter.not" | "filter.pressed" | "filter.released" => Behavior::Noop,

            "actuator.move" => Behavior::Move,
            "actuator.switch-page" => Behavior::SwitchPage,
            "actuator.call-page" => Behavior::CallPage,
            "actuator.vanish" => Behavior::Vanish,
            "actuator.camera.follow" => Behavior::CameraFollow,
            "actuator.express" => Behavior::Express,

            "modifier.me" => Behavior::ModifierMe,
            "modifier.it" => Behavior::ModifierIt,
            "modifier.kodu" => Behavior::ModifierKind("kodu"),
            "modifier.tree" => Behavior::ModifierKind("tree"),
            "modifier.apple" => Behavior::ModifierKind("apple"),
            "modifier.toward" => Behavior::Toward,
            "modifier.away" => Behavior::Away,
            "modifier.avoid" => Behavior::Avoid,
            "modifier.quickly" => Behavior::Quickly,
            "modifier.slowly" => Behavior::Slowly,
            "modifier.page-1" => Behavior::Page(0),
            "modifier.page-2" => Behavior::Page(1),
            "modifier.page-3" => Behavior::Page(2),
            "modifier.page-4" => Behavior::Page(3),
            "modifier.page-5" => Behavior::Page(4),
            "modifier.happy" => Behavior::Feel(Feeling::Happy),
            "modifier.sad" => Behavior::Feel(Feeling::Sad),
            "modifier.angry" => Behavior::Feel(Feeling::Angry),
            "modifier.love" => Behavior::Feel(Feeling::Love),

            _ => Behavior::Noop,
        }
    }

    pub fn is_noop(&self) -> bool {
        *self == Behavior::Noop
    }

    pub fn run(self, ctx: &mut RuleContext<'_>) {
        match self {
            Behavior::Noop => {}

            Behavior::Always => sensors::always(ctx),
            Behavior::See => sensors::see(ctx),
            Behavior::Bump => sensors::bump(ctx),
            Behavior::DPad => sensors::dpad(ctx),
            Behavior::Button(button) => sensors::button(ctx, button),

            Behavior::FilterMe => filters::me(ctx),
            Behavior::FilterIt => filters::it(ctx),
            Behavior::FilterKind(kind) => filters::kind(ctx, kind),
            Behavior::Nearby => filters::nearby(ctx),
            Behavior::Faraway => filters::faraway(ctx),

            Behavior::Move => actuators::movement(ctx),
            Behavior::SwitchPage => actuators::switch_page(ctx),
            Behavior::CallPage => actuators::call_page(ctx),
            Behavior::Vanish => actuators::vanish(ctx),
            Behavior::CameraFollow => actuators::camera_follow(ctx),
            Behavior::Express => actuators::express(ctx),

            Behavior::ModifierMe => modifiers::me(ctx),
            Behavior::ModifierIt => modifiers::it(ctx),
            Behavior::ModifierKind(kind) => modifiers::kind(ctx, kind),
            Behavior::Toward => modifiers::toward(ctx),
            Behavior::Away => modifiers::away(ctx),
            Behavior::Avoid => modifiers::avoid(ctx),
            Behavior::Quickly => modifiers::quickly(ctx),
            Behavior::Slowly => modifiers::slowly(ctx),
            Behavior::Page(index) => modifiers::page(ctx, index),
            Behavior::Feel(feeling) => modifiers::feel(ctx, feeling),
        }
    }
}
