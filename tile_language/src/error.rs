//! Error types for catalog loading and brain (de)serialization.

use thiserror::Error;

use crate::tiles::TileKind;

/// Errors raised at the load/save boundaries of the tile language.
#[derive(Error, Debug)]
pub enum TileError {
    /// The catalog document is not valid TOML or does not match the tile schema.
    #[error("Catalog parse error: {0}")]
    CatalogParse(#[from] toml::de::Error),

    /// Two catalog entries share an id.
    #[error("Duplicate tile id: {0}")]
    DuplicateId(String),

    /// Filters and modifiers must carry a category.
    #[error("Tile {id} ({kind}) has no category")]
    MissingCategory { id: String, kind: TileKind },

    /// A saved brain is not valid JSON or does not match the save format.
    #[error("Brain serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, TileError>;
