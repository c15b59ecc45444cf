//! CombatService - resolve damage between two cached players

use crate::combat::{resolve_damage_with_rng, DamageOutcome};
use crate::config::ConfigHandle;
use crate::metrics::Metrics;
use crate::service::player_stats::PlayerStatsService;
use crate::stats::PlayerStats;
use crate::types::PlayerId;
use rand::Rng;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// A combat calc slower than this is surfaced in debug mode.
const SLOW_COMBAT_NANOS: u64 = 2_000_000;

/// A resolved hit together with the stat bundles it was resolved from.
///
/// Side effects (health mutation, messaging, event cancellation) belong to
/// the caller.
#[derive(Debug, Clone)]
pub struct CombatOutcome {
    pub outcome: DamageOutcome,
    pub attacker_stats: PlayerStats,
    pub victim_stats: PlayerStats,
}

/// Resolves PVP hits against the cached aggregate stats.
pub struct CombatService {
    player_stats: Arc<PlayerStatsService>,
    config: ConfigHandle,
    metrics: Arc<Metrics>,
}

impl CombatService {
    pub fn new(
        player_stats: Arc<PlayerStatsService>,
        config: ConfigHandle,
        metrics: Arc<Metrics>,
    ) -> Self {
        CombatService {
            player_stats,
            config,
            metrics,
        }
    }

    /// Resolve a hit (RNG handled internally).
    pub fn calculate_damage(
        &self,
        attacker: PlayerId,
        victim: PlayerId,
        base_damage: f64,
    ) -> CombatOutcome {
        self.calculate_damage_with_rng(attacker, victim, base_damage, &mut rand::thread_rng())
    }

    /// Resolve a hit with a provided RNG (for deterministic testing).
    pub fn calculate_damage_with_rng(
        &self,
        attacker: PlayerId,
        victim: PlayerId,
        base_damage: f64,
        rng: &mut impl Rng,
    ) -> CombatOutcome {
        let start = Instant::now();
        let config = self.config.current();

        let attacker_stats = self.player_stats.get_stats(attacker);
        let victim_stats = self.player_stats.get_stats(victim);

        let outcome = resolve_damage_with_rng(
            base_damage,
            attacker_stats.total(),
            victim_stats.total(),
            config.damage_config(),
            rng,
        );

        let nanos = start.elapsed().as_nanos() as u64;
        self.metrics.record_combat_calc(nanos);
        if config.debug() && nanos > SLOW_COMBAT_NANOS {
            debug!(
                elapsed_ms = nanos as f64 / 1_000_000.0,
                "slow combat calculation"
            );
        }

        CombatOutcome {
            outcome,
            attacker_stats,
            victim_stats,
        }
    }

    /// Whether stats also apply outside player-vs-player damage.
    pub fn applies_to_pve(&self) -> bool {
        !self.config.current().pvp_only()
    }
}
