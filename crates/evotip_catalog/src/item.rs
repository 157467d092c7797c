//! # Item Identities
//!
//! Opaque tokens for the things a tooltip can describe. The overlay never
//! interprets a key; it only compares identities and hands them back to the
//! [`DataProvider`](crate::DataProvider).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which host table an item lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A weapon.
    Weapon,
    /// A passive accessory.
    Accessory,
}

/// Identity of a weapon or accessory. Equality is by kind and key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemRef {
    /// Host table.
    pub kind: ItemKind,
    /// Raw host key within that table.
    pub key: u32,
}

impl ItemRef {
    /// Creates a new item identity.
    #[inline]
    #[must_use]
    pub const fn new(kind: ItemKind, key: u32) -> Self {
        Self { kind, key }
    }

    /// Shorthand for a weapon identity.
    #[inline]
    #[must_use]
    pub const fn weapon(key: u32) -> Self {
        Self::new(ItemKind::Weapon, key)
    }

    /// Shorthand for an accessory identity.
    #[inline]
    #[must_use]
    pub const fn accessory(key: u32) -> Self {
        Self::new(ItemKind::Accessory, key)
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ItemKind::Weapon => write!(f, "weapon:{}", self.key),
            ItemKind::Accessory => write!(f, "accessory:{}", self.key),
        }
    }
}

/// Identity of an arcana, a run-wide modifier affecting several items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModifierRef(pub u32);

impl fmt::Display for ModifierRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arcana:{}", self.0)
    }
}

/// What a tooltip shows for an item header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemInfo {
    /// Display name.
    pub name: String,
    /// Description text (may be empty).
    pub description: String,
    /// Host sprite key for the icon.
    pub icon: String,
}

/// What a tooltip shows for an arcana.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModifierInfo {
    /// Display name.
    pub name: String,
    /// Description text (may be empty).
    pub description: String,
    /// Host sprite key for the icon.
    pub icon: String,
    /// Every weapon and accessory the arcana affects, in catalog order.
    pub affected: Vec<ItemRef>,
}
