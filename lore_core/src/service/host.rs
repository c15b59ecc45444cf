//! Interfaces to the excluded host layer
//!
//! The core never talks to the game server directly; the host hands in
//! equipment views and receives health updates through these types.

use crate::types::{EquipmentSlot, PlayerId};
use std::collections::HashMap;

/// One equipped item as the host sees it: its type name (consulted by the
/// weapon matcher for hand slots) and its lore text block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquippedItem {
    pub type_name: String,
    pub lore: Vec<String>,
}

impl EquippedItem {
    pub fn new(type_name: impl Into<String>, lore: Vec<String>) -> Self {
        EquippedItem {
            type_name: type_name.into(),
            lore,
        }
    }
}

/// A point-in-time view of a player's six equipment slots.
#[derive(Debug, Clone, Default)]
pub struct EquipmentSnapshot {
    items: HashMap<EquipmentSlot, EquippedItem>,
}

impl EquipmentSnapshot {
    pub fn new() -> Self {
        EquipmentSnapshot::default()
    }

    /// Chainable slot assignment, for callers building a snapshot inline.
    pub fn with_item(mut self, slot: EquipmentSlot, item: EquippedItem) -> Self {
        self.items.insert(slot, item);
        self
    }

    /// Set or clear a slot.
    pub fn set(&mut self, slot: EquipmentSlot, item: Option<EquippedItem>) {
        match item {
            Some(item) => {
                self.items.insert(slot, item);
            }
            None => {
                self.items.remove(&slot);
            }
        }
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&EquippedItem> {
        self.items.get(&slot)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Supplies players and their equipment for recomputation sweeps.
pub trait EquipmentSource {
    /// Players currently known to the host.
    fn players(&self) -> Vec<PlayerId>;

    /// A point-in-time view of one player's equipment.
    fn equipment(&self, player: PlayerId) -> EquipmentSnapshot;
}

/// Applies derived health values back to the host.
///
/// A missing player is a normal empty result; the core skips the update.
pub trait HealthBackend {
    fn max_health(&self, player: PlayerId) -> Option<f64>;
    fn set_max_health(&self, player: PlayerId, value: f64);
    fn health(&self, player: PlayerId) -> Option<f64>;
    fn set_health(&self, player: PlayerId, value: f64);
}
