//! # Evolution Recipes
//!
//! An evolution turns a weapon (the *base*) plus one or more companion items
//! into a new weapon. The book indexes recipes both ways:
//!
//! 1. **Producers**: which recipe evolves a given base item
//! 2. **Consumers**: which recipes use an item as a passive component
//!
//! The graph is validated to be acyclic when the catalog is loaded, so
//! drill-down popups following ingredients always terminate.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut book = RecipeBook::new();
//! book.add_recipe(Recipe::new(
//!     vec![ItemRef::weapon(WHIP), ItemRef::accessory(HOLLOW_HEART)],
//!     ItemRef::weapon(BLOODY_TEAR),
//! )?)?;
//!
//! assert!(book.validate_no_cycles());
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::{CatalogError, CatalogResult};
use crate::item::ItemRef;

/// One evolution: `ingredients` (base first) combine into `result`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recipe {
    /// Items consumed, the evolving base item first.
    pub ingredients: Vec<ItemRef>,
    /// Item produced.
    pub result: ItemRef,
}

impl Recipe {
    /// Creates a new recipe with basic validation.
    ///
    /// # Errors
    ///
    /// Returns error if recipe has no ingredients.
    pub fn new(ingredients: Vec<ItemRef>, result: ItemRef) -> CatalogResult<Self> {
        if ingredients.is_empty() {
            return Err(CatalogError::EmptyRecipe { result });
        }
        Ok(Self { ingredients, result })
    }

    /// The item that evolves; `None` only for a recipe built by hand with no
    /// ingredients.
    #[must_use]
    pub fn base(&self) -> Option<ItemRef> {
        self.ingredients.first().copied()
    }

    /// Returns true if `item` is one of the ingredients.
    #[must_use]
    pub fn uses(&self, item: ItemRef) -> bool {
        self.ingredients.contains(&item)
    }
}

/// Index of all evolution recipes.
#[derive(Debug, Default)]
pub struct RecipeBook {
    /// All recipes, in insertion order.
    recipes: Vec<Recipe>,
    /// Base item -> recipe that evolves it.
    item_producers: HashMap<ItemRef, usize>,
    /// Item -> recipes that use it as a non-base ingredient.
    item_consumers: HashMap<ItemRef, Vec<usize>>,
}

impl RecipeBook {
    /// Creates a new empty recipe book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recipe to the book.
    ///
    /// A base item evolves through at most one recipe; a later recipe for
    /// the same base is kept for the reverse index but not as the base's own
    /// evolution.
    ///
    /// # Errors
    ///
    /// Returns error if the recipe has no ingredients.
    pub fn add_recipe(&mut self, recipe: Recipe) -> CatalogResult<()> {
        let Some(base) = recipe.base() else {
            return Err(CatalogError::EmptyRecipe { result: recipe.result });
        };

        let index = self.recipes.len();

        if self.item_producers.contains_key(&base) {
            tracing::debug!(%base, result = %recipe.result, "base already evolves; keeping first recipe");
        } else {
            self.item_producers.insert(base, index);
        }

        for &ingredient in recipe.ingredients.iter().skip(1) {
            let consumers = self.item_consumers.entry(ingredient).or_default();
            if !consumers.contains(&index) {
                consumers.push(index);
            }
        }

        self.recipes.push(recipe);
        Ok(())
    }

    /// The recipe that evolves `item`, if any.
    #[must_use]
    pub fn recipe_for(&self, item: ItemRef) -> Option<&Recipe> {
        self.item_producers.get(&item).map(|&i| &self.recipes[i])
    }

    /// Recipes that use `item` as a passive component, in insertion order.
    pub fn recipes_using(&self, item: ItemRef) -> impl Iterator<Item = &Recipe> {
        self.item_consumers
            .get(&item)
            .into_iter()
            .flatten()
            .map(|&i| &self.recipes[i])
    }

    /// Returns all recipes.
    #[must_use]
    pub fn all_recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Returns the number of recipes.
    #[must_use]
    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    /// Validates that no item is (transitively) an ingredient of itself.
    ///
    /// Uses Kahn's algorithm over the item graph (ingredient -> result).
    #[must_use]
    pub fn validate_no_cycles(&self) -> bool {
        self.find_cycle_member().is_none()
    }

    /// Returns an item that sits on an evolution cycle, if any.
    #[must_use]
    pub fn find_cycle_member(&self) -> Option<ItemRef> {
        let mut in_degree: HashMap<ItemRef, usize> = HashMap::new();
        let mut adjacency: HashMap<ItemRef, Vec<ItemRef>> = HashMap::new();

        for recipe in &self.recipes {
            in_degree.entry(recipe.result).or_insert(0);
            for &ingredient in &recipe.ingredients {
                in_degree.entry(ingredient).or_insert(0);
                adjacency.entry(ingredient).or_default().push(recipe.result);
                *in_degree.entry(recipe.result).or_insert(0) += 1;
            }
        }

        let mut queue: VecDeque<ItemRef> = in_degree
            .iter()
            .filter(|(_, &deg)| deg == 0)
            .map(|(&item, _)| item)
            .collect();

        while let Some(item) = queue.pop_front() {
            if let Some(neighbors) = adjacency.get(&item) {
                for neighbor in neighbors {
                    if let Some(deg) = in_degree.get_mut(neighbor) {
                        *deg -= 1;
                        if *deg == 0 {
                            queue.push_back(*neighbor);
                        }
                    }
                }
            }
        }

        // Anything left with incoming edges never drained: it is on a cycle
        // or downstream of one. Report the smallest for a stable message.
        in_degree
            .into_iter()
            .filter(|(_, deg)| *deg > 0)
            .map(|(item, _)| item)
            .min()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHIP: ItemRef = ItemRef::weapon(1);
    const BLOODY_TEAR: ItemRef = ItemRef::weapon(2);
    const HOLLOW_HEART: ItemRef = ItemRef::accessory(10);
    const WAND: ItemRef = ItemRef::weapon(3);
    const HOLY_WAND: ItemRef = ItemRef::weapon(4);
    const TOME: ItemRef = ItemRef::accessory(11);

    #[test]
    fn test_hand_built_empty_recipe_is_rejected() {
        let recipe = Recipe {
            ingredients: Vec::new(),
            result: BLOODY_TEAR,
        };
        assert_eq!(recipe.base(), None);

        let mut book = RecipeBook::new();
        let result = book.add_recipe(recipe);
        assert!(matches!(result, Err(CatalogError::EmptyRecipe { result }) if result == BLOODY_TEAR));
        assert!(book.recipes.is_empty());
    }

    fn create_test_book() -> RecipeBook {
        let mut book = RecipeBook::new();
        book.add_recipe(Recipe::new(vec![WHIP, HOLLOW_HEART], BLOODY_TEAR).unwrap())
            .unwrap();
        book.add_recipe(Recipe::new(vec![WAND, TOME], HOLY_WAND).unwrap())
            .unwrap();
        book
    }

    #[test]
    fn test_empty_recipe_rejected() {
        assert_eq!(
            Recipe::new(Vec::new(), BLOODY_TEAR),
            Err(CatalogError::EmptyRecipe { result: BLOODY_TEAR })
        );
    }

    #[test]
    fn test_recipe_for_base() {
        let book = create_test_book();

        assert_eq!(book.recipe_for(WHIP).map(|r| r.result), Some(BLOODY_TEAR));
        assert!(book.recipe_for(HOLLOW_HEART).is_none());
        assert!(book.recipe_for(BLOODY_TEAR).is_none());
    }

    #[test]
    fn test_recipes_using_passive_component() {
        let book = create_test_book();

        let using: Vec<_> = book.recipes_using(HOLLOW_HEART).map(|r| r.result).collect();
        assert_eq!(using, vec![BLOODY_TEAR]);

        // The base is not a passive component of its own evolution
        assert_eq!(book.recipes_using(WHIP).count(), 0);
    }

    #[test]
    fn test_valid_dag() {
        let book = create_test_book();
        assert!(book.validate_no_cycles());
    }

    #[test]
    fn test_detect_cycle() {
        let mut book = create_test_book();
        book.add_recipe(Recipe::new(vec![BLOODY_TEAR, TOME], WHIP).unwrap())
            .unwrap();

        assert!(!book.validate_no_cycles());
        assert!(book.find_cycle_member().is_some());
    }
}
