//! lore_core - PVP stats derived from item lore
//!
//! This library provides:
//! - StatKind/ItemStats/PlayerStats: the stat catalog and immutable bundles
//! - LoreManager: template-driven parsing and editing of lore stat blocks
//! - Damage resolution: dodge, critical, defense and lifesteal handling
//! - StatsCache: concurrent per-player stat storage
//! - Services and the Engine facade the host event layer drives

pub mod cache;
pub mod combat;
pub mod config;
pub mod lore;
pub mod metrics;
pub mod service;
pub mod stats;
pub mod types;

pub mod prelude;

// Re-export core types for convenience
pub use cache::StatsCache;
pub use combat::{resolve_damage, resolve_damage_with_rng, DamageConfig, DamageOutcome};
pub use config::{ConfigHandle, ConfigError, RuntimeConfig, Settings, WeaponMatcher};
pub use lore::{strip_color, LoreManager, LoreTemplate};
pub use metrics::{Metrics, MetricsSnapshot};
pub use service::{
    CombatOutcome, CombatService, Engine, EquipmentSnapshot, EquipmentSource, EquippedItem,
    HealthBackend, ItemLoreService, PlayerStatsService, StatApplyResult,
};
pub use stats::{ItemStats, PlayerStats};
pub use types::{EquipmentSlot, PlayerId, StatKind};
