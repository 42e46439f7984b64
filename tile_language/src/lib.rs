//! # Tile Language
//!
//! The data half of the tile programming system: tile definitions, the tile catalog,
//! the rule/page/brain definitions users edit, and the constraint engine that decides
//! which tiles may follow a partially built rule.
//! This crate holds no runtime behavior; the interpreter lives in `brain_core`.

pub mod error;
pub mod language;
pub mod mechanics;
pub mod program;
pub mod tiles;

pub use error::*;
pub use language::*;
pub use mechanics::*;
pub use program::*;
pub use tiles::*;
