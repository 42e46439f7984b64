//! # Brain Core
//!
//! The runtime half of the tile programming system. Every tick, each character's brain
//! evaluates the rules on its current page, and the movement its actuators propose is
//! blended into one velocity change.
//!
//! ## Core Components
//!
//! - **entities**: characters, their physics body and the per-tick impulse queue
//! - **stage**: the arena that owns characters, the camera, input and the event outbox
//! - **library**: the behavior bound to each tile id
//! - **brain**: the page/rule interpreter, rule scratch state and the wander fallback
//!
//! ## Design
//!
//! - **Single-threaded**: a brain runs to completion within one call
//! - **Fail-soft**: unknown tiles do nothing; malformed programs never halt the tick
//! - **Arena-owned**: rules and brains refer to their character by id, never by pointer

pub mod brain;
pub mod config;
pub mod entities;
pub mod error;
pub mod library;
pub mod stage;

pub use brain::*;
pub use config::*;
pub use entities::*;
pub use error::*;
pub use library::*;
pub use stage::*;
