//! Engine - the narrow inbound interface the host layer drives

use crate::cache::StatsCache;
use crate::config::{ConfigHandle, RuntimeConfig, Settings};
use crate::metrics::Metrics;
use crate::service::combat::{CombatOutcome, CombatService};
use crate::service::host::{EquipmentSnapshot, EquipmentSource, EquippedItem, HealthBackend};
use crate::service::item_lore::ItemLoreService;
use crate::service::player_stats::PlayerStatsService;
use crate::stats::PlayerStats;
use crate::types::{EquipmentSlot, PlayerId};
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// A sweep slower than this is surfaced in debug mode.
const SLOW_SWEEP_NANOS: u64 = 10_000_000;

/// The assembled core, one method per host event kind.
///
/// Constructed once from settings and threaded explicitly to whoever
/// drives it; there is no global instance. The engine holds no event loop
/// or threading assumptions of its own — every method completes
/// synchronously against the configuration snapshot it started with.
pub struct Engine {
    config: ConfigHandle,
    cache: Arc<StatsCache>,
    metrics: Arc<Metrics>,
    player_stats: Arc<PlayerStatsService>,
    item_lore: ItemLoreService,
    combat: CombatService,
}

impl Engine {
    /// Assemble the core from raw settings.
    pub fn new(settings: &Settings) -> Self {
        let config = ConfigHandle::new(RuntimeConfig::from_settings(settings));
        let cache = Arc::new(StatsCache::new());
        let metrics = Arc::new(Metrics::default());
        let player_stats = Arc::new(PlayerStatsService::new(
            cache.clone(),
            config.clone(),
            metrics.clone(),
        ));
        let item_lore = ItemLoreService::new(config.clone(), metrics.clone());
        let combat = CombatService::new(player_stats.clone(), config.clone(), metrics.clone());
        Engine {
            config,
            cache,
            metrics,
            player_stats,
            item_lore,
            combat,
        }
    }

    /// A player joined: compute and publish their stats.
    pub fn handle_join(
        &self,
        player: PlayerId,
        equipment: &EquipmentSnapshot,
        health: &dyn HealthBackend,
    ) -> PlayerStats {
        self.player_stats
            .calculate_and_cache(player, equipment, health)
    }

    /// A player left: drop their cache entry and restore base health.
    pub fn handle_quit(&self, player: PlayerId, health: &dyn HealthBackend) {
        self.player_stats.remove_stats(player);
        self.player_stats.reset_max_health(player, health);
    }

    /// One equipment slot changed: recompute just that slot.
    pub fn handle_equipment_change(
        &self,
        player: PlayerId,
        slot: EquipmentSlot,
        item: Option<&EquippedItem>,
        health: &dyn HealthBackend,
    ) -> PlayerStats {
        self.player_stats.update_slot(player, slot, item, health)
    }

    /// A damage event fired: resolve it against the cached stats.
    ///
    /// The caller owns the side effects the [`CombatOutcome`] asks for.
    pub fn handle_damage(
        &self,
        attacker: PlayerId,
        victim: PlayerId,
        base_damage: f64,
    ) -> CombatOutcome {
        self.combat.calculate_damage(attacker, victim, base_damage)
    }

    /// [`Engine::handle_damage`] with a provided RNG.
    pub fn handle_damage_with_rng(
        &self,
        attacker: PlayerId,
        victim: PlayerId,
        base_damage: f64,
        rng: &mut impl Rng,
    ) -> CombatOutcome {
        self.combat
            .calculate_damage_with_rng(attacker, victim, base_damage, rng)
    }

    /// Periodic sweep: recompute every known player.
    ///
    /// Each player is recomputed and published atomically; the host
    /// scheduler may interrupt between players but never observes a
    /// half-published bundle. Returns the number of players swept.
    pub fn run_update_sweep(
        &self,
        source: &dyn EquipmentSource,
        health: &dyn HealthBackend,
    ) -> usize {
        let start = Instant::now();
        let players = source.players();
        let swept = players.len();
        for player in players {
            let equipment = source.equipment(player);
            self.player_stats
                .calculate_and_cache(player, &equipment, health);
        }

        let nanos = start.elapsed().as_nanos() as u64;
        self.metrics.record_sweep(nanos);
        if self.config.current().debug() && nanos > SLOW_SWEEP_NANOS {
            debug!(
                players = swept,
                elapsed_ms = nanos as f64 / 1_000_000.0,
                "slow stat update sweep"
            );
        }
        swept
    }

    /// Swap in freshly loaded settings and drop all cached stats.
    ///
    /// In-flight operations finish against the snapshot they started
    /// with; the next sweep repopulates the cache under the new config.
    pub fn reload(&self, settings: &Settings) {
        self.config.replace(RuntimeConfig::from_settings(settings));
        self.cache.clear();
    }

    /// Cached total stats for a player (empty when never computed).
    pub fn cached_stats(&self, player: PlayerId) -> PlayerStats {
        self.player_stats.get_stats(player)
    }

    /// The current configuration snapshot.
    pub fn config(&self) -> Arc<RuntimeConfig> {
        self.config.current()
    }

    pub fn player_stats(&self) -> &PlayerStatsService {
        &self.player_stats
    }

    pub fn item_lore(&self) -> &ItemLoreService {
        &self.item_lore
    }

    pub fn combat(&self) -> &CombatService {
        &self.combat
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }
}
