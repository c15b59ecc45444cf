//! Lightweight operational metrics for the hot paths

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call counts and accumulated latency for the core's hot paths.
///
/// Cheap enough to record unconditionally; read back through
/// [`Metrics::snapshot`] for operator diagnostics.
#[derive(Debug, Default)]
pub struct Metrics {
    lore_parse_count: AtomicU64,
    lore_parse_nanos: AtomicU64,
    stat_calc_count: AtomicU64,
    stat_calc_nanos: AtomicU64,
    combat_calc_count: AtomicU64,
    combat_calc_nanos: AtomicU64,
    sweep_runs: AtomicU64,
    sweep_nanos: AtomicU64,
}

impl Metrics {
    pub fn record_lore_parse(&self, nanos: u64) {
        self.lore_parse_count.fetch_add(1, Ordering::Relaxed);
        self.lore_parse_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn record_stat_calc(&self, nanos: u64) {
        self.stat_calc_count.fetch_add(1, Ordering::Relaxed);
        self.stat_calc_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn record_combat_calc(&self, nanos: u64) {
        self.combat_calc_count.fetch_add(1, Ordering::Relaxed);
        self.combat_calc_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    pub fn record_sweep(&self, nanos: u64) {
        self.sweep_runs.fetch_add(1, Ordering::Relaxed);
        self.sweep_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lore_parse_count: self.lore_parse_count.load(Ordering::Relaxed),
            lore_parse_nanos: self.lore_parse_nanos.load(Ordering::Relaxed),
            stat_calc_count: self.stat_calc_count.load(Ordering::Relaxed),
            stat_calc_nanos: self.stat_calc_nanos.load(Ordering::Relaxed),
            combat_calc_count: self.combat_calc_count.load(Ordering::Relaxed),
            combat_calc_nanos: self.combat_calc_nanos.load(Ordering::Relaxed),
            sweep_runs: self.sweep_runs.load(Ordering::Relaxed),
            sweep_nanos: self.sweep_nanos.load(Ordering::Relaxed),
        }
    }
}

/// Frozen metrics values with derived averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub lore_parse_count: u64,
    pub lore_parse_nanos: u64,
    pub stat_calc_count: u64,
    pub stat_calc_nanos: u64,
    pub combat_calc_count: u64,
    pub combat_calc_nanos: u64,
    pub sweep_runs: u64,
    pub sweep_nanos: u64,
}

impl MetricsSnapshot {
    pub fn lore_parse_avg_ms(&self) -> f64 {
        avg_millis(self.lore_parse_nanos, self.lore_parse_count)
    }

    pub fn stat_calc_avg_ms(&self) -> f64 {
        avg_millis(self.stat_calc_nanos, self.stat_calc_count)
    }

    pub fn combat_calc_avg_ms(&self) -> f64 {
        avg_millis(self.combat_calc_nanos, self.combat_calc_count)
    }

    pub fn sweep_avg_ms(&self) -> f64 {
        avg_millis(self.sweep_nanos, self.sweep_runs)
    }
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "loreParse={} ({:.3}ms avg), statCalc={} ({:.3}ms avg), \
             combatCalc={} ({:.3}ms avg), sweeps={} ({:.3}ms avg)",
            self.lore_parse_count,
            self.lore_parse_avg_ms(),
            self.stat_calc_count,
            self.stat_calc_avg_ms(),
            self.combat_calc_count,
            self.combat_calc_avg_ms(),
            self.sweep_runs,
            self.sweep_avg_ms(),
        )
    }
}

fn avg_millis(nanos: u64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    nanos as f64 / 1_000_000.0 / count as f64
}
