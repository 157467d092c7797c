//! What a popup is about.

use std::fmt;

use evotip_catalog::{ItemRef, ModifierRef};

/// Payload of a popup: an item or an arcana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PopupSubject {
    /// A weapon or accessory.
    Item(ItemRef),
    /// An arcana, shown with the items it affects.
    Modifier(ModifierRef),
}

impl From<ItemRef> for PopupSubject {
    fn from(item: ItemRef) -> Self {
        Self::Item(item)
    }
}

impl From<ModifierRef> for PopupSubject {
    fn from(modifier: ModifierRef) -> Self {
        Self::Modifier(modifier)
    }
}

impl fmt::Display for PopupSubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(item) => item.fmt(f),
            Self::Modifier(modifier) => modifier.fmt(f),
        }
    }
}
