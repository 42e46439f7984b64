//! Tiles - the atomic units of a program.
//!
//! - **TileKind**: which rule slot a tile occupies
//! - **Constraints**: what a tile provides, requires, allows and disallows after it
//! - **TileDefinition**: one immutable catalog entry
//! - **TileCatalog**: the registry, loaded once at startup

mod catalog;
mod constraints;
mod definition;
mod kind;

pub use catalog::*;
pub use constraints::*;
pub use definition::*;
pub use kind::*;
