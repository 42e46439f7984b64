//! Program definitions - what users build out of tiles.
//!
//! A brain has a fixed number of pages, a page is an ordered list of rules and a rule
//! is a sensor with filters plus an actuator with modifiers.

mod brain;
mod page;
mod record;
mod rule;

pub use brain::*;
pub use page::*;
pub use record::*;
pub use rule::*;
