//! PlayerStats - aggregated equipment stats for one player

use crate::stats::ItemStats;
use crate::types::{EquipmentSlot, PlayerId, StatKind};
use serde::Serialize;
use std::collections::HashMap;

/// A player's stats across all equipment slots.
///
/// Value object: the `total` field is always exactly the merge of every
/// per-slot bundle and is recomputed whenever a slot changes; slot
/// mutations produce new instances. Empty per-slot bundles are dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStats {
    player_id: PlayerId,
    equipment: HashMap<EquipmentSlot, ItemStats>,
    total: ItemStats,
}

impl PlayerStats {
    fn build(player_id: PlayerId, equipment: HashMap<EquipmentSlot, ItemStats>) -> Self {
        let total = equipment
            .values()
            .fold(ItemStats::empty(), |acc, stats| acc.merge(stats));
        PlayerStats {
            player_id,
            equipment,
            total,
        }
    }

    /// Empty stats for a player with no recognized equipment.
    pub fn empty(player_id: PlayerId) -> Self {
        PlayerStats::build(player_id, HashMap::new())
    }

    /// The owning player.
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// The merge of all per-slot bundles.
    pub fn total(&self) -> &ItemStats {
        &self.total
    }

    /// Stats contributed by one slot; empty if the slot holds nothing.
    pub fn slot(&self, slot: EquipmentSlot) -> ItemStats {
        self.equipment.get(&slot).copied().unwrap_or_default()
    }

    /// All slots that currently contribute stats.
    pub fn equipped_slots(&self) -> impl Iterator<Item = (&EquipmentSlot, &ItemStats)> {
        self.equipment.iter()
    }

    /// New instance with one slot's stats replaced.
    ///
    /// An empty bundle removes the slot entry.
    pub fn with_slot(&self, slot: EquipmentSlot, stats: ItemStats) -> Self {
        let mut equipment = self.equipment.clone();
        if stats.is_empty() {
            equipment.remove(&slot);
        } else {
            equipment.insert(slot, stats);
        }
        PlayerStats::build(self.player_id, equipment)
    }

    /// New instance with one slot's stats removed.
    pub fn without_slot(&self, slot: EquipmentSlot) -> Self {
        let mut equipment = self.equipment.clone();
        equipment.remove(&slot);
        PlayerStats::build(self.player_id, equipment)
    }

    /// New instance with every slot cleared.
    pub fn clear(&self) -> Self {
        PlayerStats::empty(self.player_id)
    }

    /// Maximum health derived from the health stat.
    pub fn max_health(&self, base_health: f64) -> f64 {
        base_health + self.total.get(StatKind::Health)
    }
}
