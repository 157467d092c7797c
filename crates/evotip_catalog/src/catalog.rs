//! # TOML Catalog
//!
//! An in-memory [`DataProvider`] built from a catalog file plus live run
//! state. Static data (items, evolutions, arcana) is loaded once; run state
//! sits behind a lock so the host can update it through a shared reference
//! while the tooltip session reads it.
//!
//! ## File Format
//!
//! ```toml
//! [[weapon]]
//! key = 42
//! name = "Whip"
//! description = "Attacks horizontally."
//! icon = "weapon_42"
//!
//! [[accessory]]
//! key = 10
//! name = "Hollow Heart"
//! icon = "accessory_10"
//!
//! [[recipe]]
//! ingredients = [{ kind = "weapon", key = 42 }, { kind = "accessory", key = 10 }]
//! result = { kind = "weapon", key = 43 }
//!
//! [[arcana]]
//! key = 1
//! name = "Game Killer"
//! icon = "arcana_1"
//! affects = [{ kind = "weapon", key = 42 }]
//! ```

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};
use crate::item::{ItemInfo, ItemKind, ItemRef, ModifierInfo, ModifierRef};
use crate::provider::DataProvider;
use crate::recipe::{Recipe, RecipeBook};
use crate::run_state::RunState;

/// One `[[weapon]]` or `[[accessory]]` table.
#[derive(Debug, Deserialize)]
struct ItemEntry {
    key: u32,
    name: String,
    #[serde(default)]
    description: String,
    icon: String,
    /// Extra sprite names that depict the same item.
    #[serde(default)]
    visual_keys: Vec<String>,
}

/// One `[[recipe]]` table.
#[derive(Debug, Deserialize)]
struct RecipeEntry {
    ingredients: Vec<ItemRef>,
    result: ItemRef,
}

/// One `[[arcana]]` table.
#[derive(Debug, Deserialize)]
struct ArcanaEntry {
    key: u32,
    name: String,
    #[serde(default)]
    description: String,
    icon: String,
    #[serde(default)]
    affects: Vec<ItemRef>,
}

/// Top-level catalog file.
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "weapon")]
    weapons: Vec<ItemEntry>,
    #[serde(default, rename = "accessory")]
    accessories: Vec<ItemEntry>,
    #[serde(default, rename = "recipe")]
    recipes: Vec<RecipeEntry>,
    #[serde(default)]
    arcana: Vec<ArcanaEntry>,
}

/// In-memory game data plus live run state.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Item headers.
    items: HashMap<ItemRef, ItemInfo>,
    /// Arcana details.
    arcana: HashMap<ModifierRef, ModifierInfo>,
    /// Sprite name -> item.
    item_sprites: HashMap<String, ItemRef>,
    /// Sprite name -> arcana.
    arcana_sprites: HashMap<String, ModifierRef>,
    /// Evolution recipes.
    recipes: RecipeBook,
    /// Mutable host state.
    run: RwLock<RunState>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a catalog file.
    ///
    /// # Errors
    ///
    /// Returns error if the TOML is malformed, identities or sprite names
    /// collide, a recipe or arcana references an undefined item, or the
    /// evolution graph has a cycle.
    pub fn from_toml_str(source: &str) -> CatalogResult<Self> {
        let file: CatalogFile = toml::from_str(source)?;
        let mut catalog = Self::new();

        let kinds = [(ItemKind::Weapon, file.weapons), (ItemKind::Accessory, file.accessories)];
        for (kind, entries) in kinds {
            for entry in entries {
                let item = ItemRef::new(kind, entry.key);
                let info = ItemInfo {
                    name: entry.name,
                    description: entry.description,
                    icon: entry.icon,
                };
                catalog.add_item(item, info, &entry.visual_keys)?;
            }
        }

        for entry in file.recipes {
            catalog.add_recipe(Recipe::new(entry.ingredients, entry.result)?)?;
        }

        for entry in file.arcana {
            let info = ModifierInfo {
                name: entry.name,
                description: entry.description,
                icon: entry.icon,
                affected: entry.affects,
            };
            catalog.add_arcana(ModifierRef(entry.key), info)?;
        }

        catalog.validate()?;
        tracing::info!(
            items = catalog.items.len(),
            recipes = catalog.recipes.recipe_count(),
            arcana = catalog.arcana.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Adds an item. Its icon and any extra `visual_keys` resolve to it.
    ///
    /// # Errors
    ///
    /// Returns error if the item or one of its sprite names already exists.
    pub fn add_item(&mut self, item: ItemRef, info: ItemInfo, visual_keys: &[String]) -> CatalogResult<()> {
        if self.items.contains_key(&item) {
            return Err(CatalogError::DuplicateItem(item));
        }
        let sprites: Vec<String> = std::iter::once(info.icon.clone())
            .chain(visual_keys.iter().cloned())
            .collect();
        for sprite in &sprites {
            self.claim_sprite(sprite)?;
        }
        for sprite in sprites {
            self.item_sprites.insert(sprite, item);
        }
        self.items.insert(item, info);
        Ok(())
    }

    /// Adds an evolution recipe.
    ///
    /// References are checked by [`Catalog::validate`].
    ///
    /// # Errors
    ///
    /// Returns error if the recipe has no ingredients.
    pub fn add_recipe(&mut self, recipe: Recipe) -> CatalogResult<()> {
        self.recipes.add_recipe(recipe)
    }

    /// Adds an arcana.
    ///
    /// # Errors
    ///
    /// Returns error if the arcana or its sprite name already exists.
    pub fn add_arcana(&mut self, arcana: ModifierRef, info: ModifierInfo) -> CatalogResult<()> {
        if self.arcana.contains_key(&arcana) {
            return Err(CatalogError::DuplicateModifier(arcana));
        }
        self.claim_sprite(&info.icon)?;
        self.arcana_sprites.insert(info.icon.clone(), arcana);
        self.arcana.insert(arcana, info);
        Ok(())
    }

    fn claim_sprite(&self, sprite: &str) -> CatalogResult<()> {
        if self.item_sprites.contains_key(sprite) || self.arcana_sprites.contains_key(sprite) {
            return Err(CatalogError::DuplicateVisualKey { key: sprite.to_string() });
        }
        Ok(())
    }

    /// Checks cross references and the evolution graph.
    ///
    /// # Errors
    ///
    /// Returns the first dangling reference or cycle found.
    pub fn validate(&self) -> CatalogResult<()> {
        for recipe in self.recipes.all_recipes() {
            for &item in recipe.ingredients.iter().chain(std::iter::once(&recipe.result)) {
                if !self.items.contains_key(&item) {
                    return Err(CatalogError::UnknownItem(item));
                }
            }
        }
        for info in self.arcana.values() {
            if let Some(&missing) = info.affected.iter().find(|i| !self.items.contains_key(*i)) {
                return Err(CatalogError::UnknownItem(missing));
            }
        }
        if let Some(item) = self.recipes.find_cycle_member() {
            return Err(CatalogError::CycleDetected(item));
        }
        Ok(())
    }

    /// The evolution recipes.
    #[must_use]
    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    /// Sets the paused flag.
    pub fn set_paused(&self, paused: bool) {
        self.run.write().paused = paused;
    }

    /// Gives the player an item. Returns false if held already or slots are full.
    pub fn grant(&self, item: ItemRef) -> bool {
        self.run.write().loadout.grant(item)
    }

    /// Takes an item from the player. Returns false if it was not held.
    pub fn revoke(&self, item: ItemRef) -> bool {
        self.run.write().loadout.revoke(item)
    }

    /// Activates an arcana. Returns false if unknown or already active.
    pub fn activate_arcana(&self, arcana: ModifierRef) -> bool {
        if !self.arcana.contains_key(&arcana) {
            return false;
        }
        self.run.write().activate(arcana)
    }

    /// Starts a new run: clears the loadout and arcana, unpauses.
    pub fn reset_run(&self) {
        *self.run.write() = RunState::new();
    }

    /// Snapshot of the current run state.
    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.run.read().clone()
    }
}

impl DataProvider for Catalog {
    fn lookup(&self, visual_key: &str) -> Option<ItemRef> {
        self.item_sprites.get(visual_key).copied()
    }

    fn lookup_modifier(&self, visual_key: &str) -> Option<ModifierRef> {
        self.arcana_sprites.get(visual_key).copied()
    }

    fn describe(&self, item: ItemRef) -> Option<ItemInfo> {
        self.items.get(&item).cloned()
    }

    fn evolution_recipe(&self, item: ItemRef) -> Option<Recipe> {
        self.recipes.recipe_for(item).cloned()
    }

    fn recipes_using(&self, item: ItemRef) -> Vec<Recipe> {
        self.recipes.recipes_using(item).cloned().collect()
    }

    fn active_modifiers(&self, item: ItemRef) -> Vec<ModifierRef> {
        let run = self.run.read();
        run.active_arcana
            .iter()
            .copied()
            .filter(|a| self.arcana.get(a).is_some_and(|info| info.affected.contains(&item)))
            .collect()
    }

    fn modifier_detail(&self, modifier: ModifierRef) -> Option<ModifierInfo> {
        self.arcana.get(&modifier).cloned()
    }

    fn player_owns(&self, item: ItemRef) -> bool {
        self.run.read().loadout.holds(item)
    }

    fn is_paused(&self) -> bool {
        self.run.read().paused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [[weapon]]
        key = 42
        name = "Whip"
        description = "Attacks horizontally."
        icon = "weapon_42"
        visual_keys = ["whip_level_up"]

        [[weapon]]
        key = 43
        name = "Bloody Tear"
        icon = "weapon_43"

        [[accessory]]
        key = 10
        name = "Hollow Heart"
        icon = "accessory_10"

        [[recipe]]
        ingredients = [{ kind = "weapon", key = 42 }, { kind = "accessory", key = 10 }]
        result = { kind = "weapon", key = 43 }

        [[arcana]]
        key = 1
        name = "Game Killer"
        icon = "arcana_1"
        affects = [{ kind = "weapon", key = 42 }]
    "#;

    #[test]
    fn test_load_and_lookup() {
        let catalog = Catalog::from_toml_str(SAMPLE).unwrap();

        assert_eq!(catalog.lookup("weapon_42"), Some(ItemRef::weapon(42)));
        assert_eq!(catalog.lookup("whip_level_up"), Some(ItemRef::weapon(42)));
        assert_eq!(catalog.lookup("tree_01"), None);
        assert_eq!(catalog.lookup_modifier("arcana_1"), Some(ModifierRef(1)));

        let whip = catalog.describe(ItemRef::weapon(42)).unwrap();
        assert_eq!(whip.name, "Whip");
        assert_eq!(whip.description, "Attacks horizontally.");
    }

    #[test]
    fn test_recipe_views() {
        let catalog = Catalog::from_toml_str(SAMPLE).unwrap();

        let own = catalog.evolution_recipe(ItemRef::weapon(42)).unwrap();
        assert_eq!(own.result, ItemRef::weapon(43));

        let passive = catalog.recipes_using(ItemRef::accessory(10));
        assert_eq!(passive.len(), 1);
        assert_eq!(passive[0].result, ItemRef::weapon(43));
    }

    #[test]
    fn test_run_state_through_shared_reference() {
        let catalog = Catalog::from_toml_str(SAMPLE).unwrap();
        let whip = ItemRef::weapon(42);

        assert!(!catalog.player_owns(whip));
        assert!(catalog.grant(whip));
        assert!(catalog.player_owns(whip));

        assert!(catalog.active_modifiers(whip).is_empty());
        assert!(catalog.activate_arcana(ModifierRef(1)));
        assert_eq!(catalog.active_modifiers(whip), vec![ModifierRef(1)]);
        assert!(catalog.active_modifiers(ItemRef::weapon(43)).is_empty());

        catalog.set_paused(true);
        assert!(catalog.is_paused());

        catalog.reset_run();
        assert!(!catalog.is_paused());
        assert!(!catalog.player_owns(whip));
    }

    #[test]
    fn test_unknown_arcana_not_activated() {
        let catalog = Catalog::from_toml_str(SAMPLE).unwrap();
        assert!(!catalog.activate_arcana(ModifierRef(99)));
    }

    #[test]
    fn test_dangling_recipe_rejected() {
        let source = r#"
            [[weapon]]
            key = 1
            name = "Knife"
            icon = "weapon_1"

            [[recipe]]
            ingredients = [{ kind = "weapon", key = 1 }, { kind = "accessory", key = 5 }]
            result = { kind = "weapon", key = 2 }
        "#;

        assert!(matches!(
            Catalog::from_toml_str(source),
            Err(CatalogError::UnknownItem(_))
        ));
    }

    #[test]
    fn test_duplicate_sprite_rejected() {
        let source = r#"
            [[weapon]]
            key = 1
            name = "Knife"
            icon = "shared"

            [[accessory]]
            key = 1
            name = "Spinach"
            icon = "shared"
        "#;

        assert_eq!(
            Catalog::from_toml_str(source).unwrap_err(),
            CatalogError::DuplicateVisualKey { key: "shared".to_string() }
        );
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        assert!(matches!(
            Catalog::from_toml_str("[[weapon]]\nkey = \"not a number\""),
            Err(CatalogError::Parse(_))
        ));
    }
}
