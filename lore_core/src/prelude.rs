//! Prelude module for convenient imports
//!
//! ```rust
//! use lore_core::prelude::*;
//! ```

// Core types
pub use crate::stats::{ItemStats, PlayerStats};
pub use crate::types::{EquipmentSlot, PlayerId, StatKind};

// Lore handling
pub use crate::lore::{strip_color, LoreManager, LoreTemplate};

// Combat
pub use crate::combat::{resolve_damage, resolve_damage_with_rng, DamageConfig, DamageOutcome};

// Cache
pub use crate::cache::StatsCache;

// Config
pub use crate::config::{ConfigHandle, RuntimeConfig, Settings};

// Services
pub use crate::service::{
    CombatOutcome, Engine, EquipmentSnapshot, EquipmentSource, EquippedItem, HealthBackend,
};
