//! PlayerStatsService - compute, clamp, cache and publish player stats

use crate::cache::StatsCache;
use crate::config::{ConfigHandle, RuntimeConfig};
use crate::metrics::Metrics;
use crate::service::host::{EquipmentSnapshot, EquippedItem, HealthBackend};
use crate::stats::{ItemStats, PlayerStats};
use crate::types::{EquipmentSlot, PlayerId, StatKind};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// Two applied max-health values closer than this are treated as equal.
const MAX_HEALTH_EPSILON: f64 = 1e-9;

/// Recomputes a player's aggregate stats from equipped items and publishes
/// them: cache first, then the derived maximum health.
pub struct PlayerStatsService {
    cache: Arc<StatsCache>,
    config: ConfigHandle,
    metrics: Arc<Metrics>,
}

impl PlayerStatsService {
    pub fn new(cache: Arc<StatsCache>, config: ConfigHandle, metrics: Arc<Metrics>) -> Self {
        PlayerStatsService {
            cache,
            config,
            metrics,
        }
    }

    /// Compute a player's stats from an equipment snapshot, without
    /// touching the cache.
    ///
    /// Hand-slot items failing the weapon check contribute nothing; every
    /// parsed stat is clamped to its configured maximum.
    pub fn calculate(&self, player_id: PlayerId, equipment: &EquipmentSnapshot) -> PlayerStats {
        let start = Instant::now();
        let config = self.config.current();

        let mut stats = PlayerStats::empty(player_id);
        for slot in EquipmentSlot::all() {
            let Some(item) = equipment.get(*slot) else {
                continue;
            };
            if slot.is_weapon() && !config.is_weapon(&item.type_name) {
                continue;
            }
            let parsed = self.parse_item(&config, item);
            stats = stats.with_slot(*slot, clamp_stats(&config, &parsed));
        }

        self.metrics
            .record_stat_calc(start.elapsed().as_nanos() as u64);
        stats
    }

    /// Compute, cache and publish a player's stats.
    pub fn calculate_and_cache(
        &self,
        player_id: PlayerId,
        equipment: &EquipmentSnapshot,
        health: &dyn HealthBackend,
    ) -> PlayerStats {
        let stats = self.calculate(player_id, equipment);
        self.cache.put(stats.clone());
        self.update_max_health(&stats, health);
        stats
    }

    /// Recompute exactly one slot against the cached bundle and republish.
    pub fn update_slot(
        &self,
        player_id: PlayerId,
        slot: EquipmentSlot,
        item: Option<&EquippedItem>,
        health: &dyn HealthBackend,
    ) -> PlayerStats {
        let config = self.config.current();
        let current = self.cache.get_or_empty(player_id);

        let slot_stats = match item {
            Some(item) if !slot.is_weapon() || config.is_weapon(&item.type_name) => {
                let parsed = self.parse_item(&config, item);
                clamp_stats(&config, &parsed)
            }
            _ => ItemStats::empty(),
        };

        let updated = current.with_slot(slot, slot_stats);
        self.cache.put(updated.clone());
        self.update_max_health(&updated, health);
        updated
    }

    /// Cached stats for a player, empty when never computed.
    pub fn get_stats(&self, player_id: PlayerId) -> PlayerStats {
        self.cache.get_or_empty(player_id)
    }

    /// Drop a player's cache entry.
    pub fn remove_stats(&self, player_id: PlayerId) {
        self.cache.remove(player_id);
    }

    /// Drop every cache entry.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Apply the derived maximum health to the host.
    ///
    /// A non-finite result is rejected and logged, leaving the previous
    /// value untouched. The value is floored at 1.0 and only applied when
    /// it differs from the current maximum; current health is capped
    /// downward when it would exceed the new maximum.
    pub fn update_max_health(&self, stats: &PlayerStats, health: &dyn HealthBackend) {
        let config = self.config.current();
        let new_max = stats.max_health(config.base_health());
        if !new_max.is_finite() {
            warn!(
                player = %stats.player_id(),
                base = config.base_health(),
                health_stat = stats.total().get(StatKind::Health),
                "invalid max health computed, keeping previous value"
            );
            return;
        }
        let new_max = new_max.max(1.0);

        let player_id = stats.player_id();
        let Some(current_max) = health.max_health(player_id) else {
            return;
        };
        if (current_max - new_max).abs() > MAX_HEALTH_EPSILON {
            health.set_max_health(player_id, new_max);
            if let Some(current) = health.health(player_id) {
                if current > new_max {
                    health.set_health(player_id, new_max);
                }
            }
        }
    }

    /// Restore the host's base maximum health for a player.
    pub fn reset_max_health(&self, player_id: PlayerId, health: &dyn HealthBackend) {
        health.set_max_health(player_id, self.config.current().base_health());
    }

    fn parse_item(&self, config: &RuntimeConfig, item: &EquippedItem) -> ItemStats {
        let start = Instant::now();
        let parsed = config.lore().parse_lore(&item.lore);
        self.metrics
            .record_lore_parse(start.elapsed().as_nanos() as u64);
        parsed
    }
}

fn clamp_stats(config: &RuntimeConfig, stats: &ItemStats) -> ItemStats {
    if stats.is_empty() {
        return ItemStats::empty();
    }
    ItemStats::from_pairs(
        StatKind::ALL
            .into_iter()
            .map(|kind| (kind, config.clamp_stat_value(kind, stats.get(kind)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_toml, Settings};
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Host stub recording health values per player.
    #[derive(Default)]
    struct TestHealth {
        state: Mutex<std::collections::HashMap<PlayerId, (f64, f64)>>,
    }

    impl TestHealth {
        fn join(&self, player: PlayerId, max: f64) {
            self.state.lock().unwrap().insert(player, (max, max));
        }

        fn values(&self, player: PlayerId) -> Option<(f64, f64)> {
            self.state.lock().unwrap().get(&player).copied()
        }
    }

    impl HealthBackend for TestHealth {
        fn max_health(&self, player: PlayerId) -> Option<f64> {
            self.state.lock().unwrap().get(&player).map(|(max, _)| *max)
        }

        fn set_max_health(&self, player: PlayerId, value: f64) {
            if let Some(entry) = self.state.lock().unwrap().get_mut(&player) {
                entry.0 = value;
            }
        }

        fn health(&self, player: PlayerId) -> Option<f64> {
            self.state
                .lock()
                .unwrap()
                .get(&player)
                .map(|(_, health)| *health)
        }

        fn set_health(&self, player: PlayerId, value: f64) {
            if let Some(entry) = self.state.lock().unwrap().get_mut(&player) {
                entry.1 = value;
            }
        }
    }

    fn service() -> PlayerStatsService {
        service_with(&Settings::default())
    }

    fn service_with(settings: &Settings) -> PlayerStatsService {
        PlayerStatsService::new(
            Arc::new(StatsCache::new()),
            ConfigHandle::new(RuntimeConfig::from_settings(settings)),
            Arc::new(Metrics::default()),
        )
    }

    fn sword_with_attack(attack: f64) -> EquippedItem {
        EquippedItem::new(
            "DIAMOND_SWORD",
            vec![format!("&c⚔ 공격력 &f+{attack}")],
        )
    }

    fn helmet_with_health(health: f64) -> EquippedItem {
        EquippedItem::new("IRON_HELMET", vec![format!("&6❤ 체력 &f+{health}")])
    }

    #[test]
    fn test_calculate_merges_slots() {
        let service = service();
        let player = Uuid::new_v4();
        let equipment = EquipmentSnapshot::new()
            .with_item(EquipmentSlot::MainHand, sword_with_attack(50.0))
            .with_item(EquipmentSlot::Helmet, helmet_with_health(30.0));

        let stats = service.calculate(player, &equipment);
        assert_eq!(stats.total().get(StatKind::Attack), 50.0);
        assert_eq!(stats.total().get(StatKind::Health), 30.0);
    }

    #[test]
    fn test_non_weapon_in_hand_slot_contributes_nothing() {
        let service = service();
        let player = Uuid::new_v4();
        let equipment = EquipmentSnapshot::new().with_item(
            EquipmentSlot::MainHand,
            EquippedItem::new("STICK", vec!["&c⚔ 공격력 &f+50".to_string()]),
        );

        let stats = service.calculate(player, &equipment);
        assert!(stats.total().is_empty());
    }

    #[test]
    fn test_armor_slot_ignores_weapon_check() {
        let service = service();
        let player = Uuid::new_v4();
        let equipment = EquipmentSnapshot::new().with_item(
            EquipmentSlot::Helmet,
            EquippedItem::new("STICK", vec!["&6❤ 체력 &f+10".to_string()]),
        );

        let stats = service.calculate(player, &equipment);
        assert_eq!(stats.total().get(StatKind::Health), 10.0);
    }

    #[test]
    fn test_parsed_stats_clamped_to_max() {
        let settings: Settings = parse_toml(
            r#"
[stats.attack]
max = 40
"#,
        )
        .unwrap();
        let service = service_with(&settings);
        let equipment = EquipmentSnapshot::new()
            .with_item(EquipmentSlot::MainHand, sword_with_attack(100.0));

        let stats = service.calculate(Uuid::new_v4(), &equipment);
        assert_eq!(stats.total().get(StatKind::Attack), 40.0);
    }

    #[test]
    fn test_calculate_and_cache_publishes() {
        let service = service();
        let health = TestHealth::default();
        let player = Uuid::new_v4();
        health.join(player, 20.0);

        let equipment =
            EquipmentSnapshot::new().with_item(EquipmentSlot::Helmet, helmet_with_health(30.0));
        service.calculate_and_cache(player, &equipment, &health);

        assert_eq!(service.get_stats(player).total().get(StatKind::Health), 30.0);
        assert_eq!(health.values(player), Some((50.0, 20.0)));
    }

    #[test]
    fn test_max_health_caps_current_downward() {
        let service = service();
        let health = TestHealth::default();
        let player = Uuid::new_v4();
        health.join(player, 50.0);

        // no health stat: max drops back to base 20, current 50 capped
        service.calculate_and_cache(player, &EquipmentSnapshot::new(), &health);
        assert_eq!(health.values(player), Some((20.0, 20.0)));
    }

    #[test]
    fn test_update_slot_targets_one_slot() {
        let service = service();
        let health = TestHealth::default();
        let player = Uuid::new_v4();
        health.join(player, 20.0);

        let equipment = EquipmentSnapshot::new()
            .with_item(EquipmentSlot::Helmet, helmet_with_health(30.0))
            .with_item(EquipmentSlot::MainHand, sword_with_attack(50.0));
        service.calculate_and_cache(player, &equipment, &health);

        // swap the sword out; helmet stats must survive
        let updated = service.update_slot(player, EquipmentSlot::MainHand, None, &health);
        assert_eq!(updated.total().get(StatKind::Attack), 0.0);
        assert_eq!(updated.total().get(StatKind::Health), 30.0);
        assert_eq!(service.get_stats(player).total().get(StatKind::Attack), 0.0);
    }

    #[test]
    fn test_update_slot_rejects_non_weapon() {
        let service = service();
        let health = TestHealth::default();
        let player = Uuid::new_v4();
        health.join(player, 20.0);

        let stick = EquippedItem::new("STICK", vec!["&c⚔ 공격력 &f+50".to_string()]);
        let updated = service.update_slot(player, EquipmentSlot::OffHand, Some(&stick), &health);
        assert!(updated.total().is_empty());
    }

    #[test]
    fn test_remove_and_reset() {
        let service = service();
        let health = TestHealth::default();
        let player = Uuid::new_v4();
        health.join(player, 44.0);

        let equipment =
            EquipmentSnapshot::new().with_item(EquipmentSlot::Helmet, helmet_with_health(30.0));
        service.calculate_and_cache(player, &equipment, &health);

        service.remove_stats(player);
        assert!(service.get_stats(player).total().is_empty());

        service.reset_max_health(player, &health);
        assert_eq!(health.max_health(player), Some(20.0));
    }

    #[test]
    fn test_unknown_player_health_left_alone() {
        let service = service();
        let health = TestHealth::default();
        // never joined: the backend knows nothing, update is a no-op
        let stats = PlayerStats::empty(Uuid::new_v4());
        service.update_max_health(&stats, &health);
        assert!(health.values(stats.player_id()).is_none());
    }
}
