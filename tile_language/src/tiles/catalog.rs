//! Tile Catalog - the static registry of tile definitions.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::{TileDefinition, TileKind};
use crate::error::{Result, TileError};

/// The catalog shipped with the crate.
const BUILTIN_TILES: &str = include_str!("../../assets/tiles.toml");

/// On-disk shape of a catalog document: a list of `[[tile]]` tables.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default, rename = "tile")]
    tiles: Vec<TileDefinition>,
}

/// All known tiles, in catalog order.
///
/// Populated once at startup and never mutated afterwards; definitions are shared
/// with rule definitions through `Arc`.
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    tiles: Vec<Arc<TileDefinition>>,

    /// Index: id -> position in `tiles`.
    by_id: HashMap<String, usize>,
}

impl TileCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the built-in catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_toml(BUILTIN_TILES)
    }

    /// Parse a catalog from a TOML document.
    pub fn from_toml(source: &str) -> Result<Self> {
        let document: CatalogDocument = toml::from_str(source)?;
        let catalog = Self::from_tiles(document.tiles)?;
        tracing::info!(tiles = catalog.len(), "loaded tile catalog");
        Ok(catalog)
    }

    /// Build a catalog from definitions, preserving their order.
    pub fn from_tiles(tiles: impl IntoIterator<Item = TileDefinition>) -> Result<Self> {
        let mut catalog = Self::new();
        for tile in tiles {
            catalog.add(tile)?;
        }
        Ok(catalog)
    }

    /// Register a tile. Fails on duplicate ids and on uncategorized filters/modifiers.
    pub fn add(&mut self, tile: TileDefinition) -> Result<Arc<TileDefinition>> {
        if self.by_id.contains_key(&tile.id) {
            return Err(TileError::DuplicateId(tile.id));
        }
        if tile.kind.requires_category() && tile.category.is_none() {
            return Err(TileError::MissingCategory {
                id: tile.id,
                kind: tile.kind,
            });
        }

        let tile = Arc::new(tile);
        self.by_id.insert(tile.id.clone(), self.tiles.len());
        self.tiles.push(Arc::clone(&tile));
        Ok(tile)
    }

    /// Get a tile by id.
    pub fn get(&self, id: &str) -> Option<&Arc<TileDefinition>> {
        self.by_id.get(id).map(|&index| &self.tiles[index])
    }

    /// Get a tile by id, only if it is of the given kind.
    pub fn get_of_kind(&self, id: &str, kind: TileKind) -> Option<&Arc<TileDefinition>> {
        self.get(id).filter(|tile| tile.kind == kind)
    }

    /// All tiles of a kind, in catalog order.
    pub fn of_kind(&self, kind: TileKind) -> impl Iterator<Item = &Arc<TileDefinition>> {
        self.tiles.iter().filter(move |tile| tile.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TileDefinition>> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }
}
