//! # Catalog Error Types
//!
//! All errors that can occur while loading or validating catalog data.

use thiserror::Error;

use crate::item::{ItemRef, ModifierRef};

/// Errors that can occur in the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog file is not valid TOML or does not match the schema.
    #[error("invalid catalog file: {0}")]
    Parse(String),

    /// Two entries share the same identity.
    #[error("duplicate item: {0}")]
    DuplicateItem(ItemRef),

    /// Two arcana share the same key.
    #[error("duplicate arcana: {0}")]
    DuplicateModifier(ModifierRef),

    /// Two entries claim the same sprite name.
    #[error("visual key {key:?} is claimed by more than one entry")]
    DuplicateVisualKey {
        /// The contested sprite name.
        key: String,
    },

    /// A recipe or arcana references an item that is not defined.
    #[error("unknown item referenced: {0}")]
    UnknownItem(ItemRef),

    /// A recipe without ingredients.
    #[error("recipe for {result} has no ingredients")]
    EmptyRecipe {
        /// The item the recipe produces.
        result: ItemRef,
    },

    /// An item is (transitively) an ingredient of itself.
    #[error("evolution cycle detected at {0}")]
    CycleDetected(ItemRef),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
