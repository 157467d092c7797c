//! # EVOTIP Catalog
//!
//! Game data the tooltip overlay describes, behind one read-only contract.
//!
//! ## Design Principles
//!
//! 1. **Opaque identities** - The overlay compares [`ItemRef`]s, never interprets them
//! 2. **Typed contract** - All host reads go through [`DataProvider`]
//! 3. **Acyclic evolutions** - Drill-down through ingredients always terminates
//! 4. **External configuration** - Offline catalogs are TOML files
//!
//! ## Example
//!
//! ```rust,ignore
//! use evotip_catalog::{Catalog, DataProvider};
//!
//! let catalog = Catalog::from_toml_str(&std::fs::read_to_string("data/catalog.toml")?)?;
//! let whip = catalog.lookup("weapon_42").expect("known sprite");
//! catalog.grant(whip);
//! assert!(catalog.player_owns(whip));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod error;
pub mod item;
pub mod provider;
pub mod recipe;
pub mod run_state;

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult};
pub use item::{ItemInfo, ItemKind, ItemRef, ModifierInfo, ModifierRef};
pub use provider::DataProvider;
pub use recipe::{Recipe, RecipeBook};
pub use run_state::{Loadout, RunState, MAX_LOADOUT_SLOTS};
