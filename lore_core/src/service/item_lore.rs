//! ItemLoreService - the lore operations behind commands and GUIs

use crate::config::ConfigHandle;
use crate::metrics::Metrics;
use crate::stats::ItemStats;
use crate::types::StatKind;
use std::sync::Arc;
use std::time::Instant;

/// Result of applying one stat to an item's lore: the value actually
/// applied after clamping, and the rewritten lore lines.
#[derive(Debug, Clone, PartialEq)]
pub struct StatApplyResult {
    pub applied: f64,
    pub lore: Vec<String>,
}

/// Pure lore-line operations invoked by the command/GUI layer.
///
/// Item storage stays with the caller: every operation takes the current
/// lore lines and returns the rewritten ones.
pub struct ItemLoreService {
    config: ConfigHandle,
    metrics: Arc<Metrics>,
}

impl ItemLoreService {
    pub fn new(config: ConfigHandle, metrics: Arc<Metrics>) -> Self {
        ItemLoreService { config, metrics }
    }

    /// Parse the stat bundle encoded in an item's lore.
    pub fn parse_stats(&self, lore: &[String]) -> ItemStats {
        let start = Instant::now();
        let stats = self.config.current().lore().parse_lore(lore);
        self.metrics
            .record_lore_parse(start.elapsed().as_nanos() as u64);
        stats
    }

    /// Set or replace one stat, clamped to its configured maximum.
    pub fn set_stat(&self, lore: &[String], kind: StatKind, value: f64) -> StatApplyResult {
        let config = self.config.current();
        let applied = config.clamp_stat_value(kind, value);
        let updated = self.parse_stats(lore).with_stat(kind, applied);
        StatApplyResult {
            applied,
            lore: config.lore().add_or_update_stats(lore, &updated, 0),
        }
    }

    /// Replace the whole stat block, each value clamped.
    pub fn set_stats(&self, lore: &[String], stats: &ItemStats) -> Vec<String> {
        let config = self.config.current();
        let clamped = ItemStats::from_pairs(
            StatKind::ALL
                .into_iter()
                .map(|kind| (kind, config.clamp_stat_value(kind, stats.get(kind)))),
        );
        config.lore().add_or_update_stats(lore, &clamped, 0)
    }

    /// Remove one stat from the lore.
    pub fn remove_stat(&self, lore: &[String], kind: StatKind) -> Vec<String> {
        self.config.current().lore().remove_stat(lore, kind)
    }

    /// Strip every stat and separator line from the lore.
    pub fn clear_stats(&self, lore: &[String]) -> Vec<String> {
        self.config.current().lore().remove_all_stats(lore)
    }

    /// Clamp a requested value the same way a write would.
    pub fn clamp_stat_value(&self, kind: StatKind, value: f64) -> f64 {
        self.config.current().clamp_stat_value(kind, value)
    }
}
