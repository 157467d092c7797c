//! # Run State
//!
//! The part of the host that changes during a run: what the player holds,
//! which arcana are active, and whether the game is paused.
//! Slots are pre-allocated; the host grants and revokes every level-up.

use crate::item::{ItemKind, ItemRef, ModifierRef};

/// Weapon and accessory slots per run.
pub const MAX_LOADOUT_SLOTS: usize = 6;

/// The player's current weapons and accessories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    /// Held weapons, in acquisition order.
    weapons: Vec<ItemRef>,
    /// Held accessories, in acquisition order.
    accessories: Vec<ItemRef>,
}

impl Loadout {
    /// Creates an empty loadout with pre-allocated slots.
    #[must_use]
    pub fn new() -> Self {
        Self {
            weapons: Vec::with_capacity(MAX_LOADOUT_SLOTS),
            accessories: Vec::with_capacity(MAX_LOADOUT_SLOTS),
        }
    }

    fn slots(&self, kind: ItemKind) -> &Vec<ItemRef> {
        match kind {
            ItemKind::Weapon => &self.weapons,
            ItemKind::Accessory => &self.accessories,
        }
    }

    fn slots_mut(&mut self, kind: ItemKind) -> &mut Vec<ItemRef> {
        match kind {
            ItemKind::Weapon => &mut self.weapons,
            ItemKind::Accessory => &mut self.accessories,
        }
    }

    /// Adds an item. Returns false if it is already held or its slots are full.
    pub fn grant(&mut self, item: ItemRef) -> bool {
        let slots = self.slots_mut(item.kind);
        if slots.contains(&item) || slots.len() >= MAX_LOADOUT_SLOTS {
            return false;
        }
        slots.push(item);
        true
    }

    /// Removes an item. Returns false if it was not held.
    pub fn revoke(&mut self, item: ItemRef) -> bool {
        let slots = self.slots_mut(item.kind);
        let before = slots.len();
        slots.retain(|&held| held != item);
        slots.len() != before
    }

    /// Returns true if the item is held.
    #[inline]
    #[must_use]
    pub fn holds(&self, item: ItemRef) -> bool {
        self.slots(item.kind).contains(&item)
    }

    /// Returns true if every slot of `kind` is taken.
    #[must_use]
    pub fn is_full(&self, kind: ItemKind) -> bool {
        self.slots(kind).len() >= MAX_LOADOUT_SLOTS
    }

    /// All held items, weapons first.
    pub fn iter(&self) -> impl Iterator<Item = ItemRef> + '_ {
        self.weapons.iter().chain(self.accessories.iter()).copied()
    }
}

/// Mutable host state sampled by the tooltip core every frame.
#[derive(Clone, Debug, Default)]
pub struct RunState {
    /// What the player holds.
    pub loadout: Loadout,
    /// Active arcana, in activation order.
    pub active_arcana: Vec<ModifierRef>,
    /// Whether the host is in its paused / in-run menu context.
    pub paused: bool,
}

impl RunState {
    /// Creates a fresh, unpaused run state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loadout: Loadout::new(),
            active_arcana: Vec::new(),
            paused: false,
        }
    }

    /// Activates an arcana. Returns false if it was already active.
    pub fn activate(&mut self, arcana: ModifierRef) -> bool {
        if self.active_arcana.contains(&arcana) {
            return false;
        }
        self.active_arcana.push(arcana);
        true
    }

    /// Returns true if the arcana is active.
    #[must_use]
    pub fn is_active(&self, arcana: ModifierRef) -> bool {
        self.active_arcana.contains(&arcana)
    }
}
