//! Application services wiring the stat pipeline together

mod combat;
mod engine;
mod host;
mod item_lore;
mod player_stats;

pub use combat::{CombatOutcome, CombatService};
pub use engine::Engine;
pub use host::{EquipmentSnapshot, EquipmentSource, EquippedItem, HealthBackend};
pub use item_lore::{ItemLoreService, StatApplyResult};
pub use player_stats::PlayerStatsService;
