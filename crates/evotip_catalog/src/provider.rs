//! # Data Provider Contract
//!
//! Everything the tooltip core knows about the host game comes through this
//! trait. Implementations read the live host (or, for tests and offline
//! tooling, a [`Catalog`](crate::Catalog)).
//!
//! Every method is infallible from the caller's point of view: "not found"
//! and "not ready yet" are both `None` / empty, and the core treats them as
//! a missing tooltip rather than an error.

use crate::item::{ItemInfo, ItemRef, ModifierInfo, ModifierRef};
use crate::recipe::Recipe;

/// Read-only view of host game data.
pub trait DataProvider {
    /// Resolves a host sprite name to the item it depicts.
    fn lookup(&self, visual_key: &str) -> Option<ItemRef>;

    /// Resolves a host sprite name to the arcana it depicts.
    fn lookup_modifier(&self, visual_key: &str) -> Option<ModifierRef> {
        let _ = visual_key;
        None
    }

    /// Header and description for an item.
    fn describe(&self, item: ItemRef) -> Option<ItemInfo>;

    /// The evolution whose base is `item`.
    fn evolution_recipe(&self, item: ItemRef) -> Option<Recipe>;

    /// Evolutions that use `item` as a passive component.
    fn recipes_using(&self, item: ItemRef) -> Vec<Recipe>;

    /// Active arcana whose effect set includes `item`.
    fn active_modifiers(&self, item: ItemRef) -> Vec<ModifierRef>;

    /// Header, description and affected items of an arcana.
    fn modifier_detail(&self, modifier: ModifierRef) -> Option<ModifierInfo>;

    /// Whether the player currently holds `item`.
    fn player_owns(&self, item: ItemRef) -> bool;

    /// Whether the host is in its paused / in-run menu context.
    fn is_paused(&self) -> bool;
}
