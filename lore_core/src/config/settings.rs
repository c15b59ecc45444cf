//! Raw settings as deserialized from the operator's config file

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level configuration document.
///
/// Every field has a safe default so a partial or empty file still yields
/// a working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub settings: GeneralSettings,
    pub stats: StatSettings,
    /// Glob patterns for item types accepted in hand slots
    /// (`*` = any run, `?` = any single character, case-insensitive).
    pub weapons: Vec<String>,
    pub lore: LoreSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            settings: GeneralSettings::default(),
            stats: StatSettings::default(),
            weapons: default_weapons(),
            lore: LoreSettings::default(),
        }
    }
}

fn default_weapons() -> Vec<String> {
    ["*_SWORD", "*_AXE", "TRIDENT", "BOW", "CROSSBOW", "MACE"]
        .map(str::to_string)
        .to_vec()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Ticks between periodic stat sweeps; non-positive values are coerced
    /// to 1 when the runtime config is built.
    #[serde(default = "default_update_interval")]
    pub update_interval: i64,
    /// Whether stats apply only to player-vs-player damage.
    #[serde(default = "default_pvp_only")]
    pub pvp_only: bool,
    #[serde(default)]
    pub debug: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        GeneralSettings {
            update_interval: 10,
            pvp_only: true,
            debug: false,
        }
    }
}

fn default_update_interval() -> i64 {
    10
}

fn default_pvp_only() -> bool {
    true
}

/// Per-kind stat tuning. A `max` of 0 means unlimited.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatSettings {
    pub attack: DivisorEntry,
    pub defense: DivisorEntry,
    pub health: HealthEntry,
    pub lifesteal: MaxEntry,
    pub crit_chance: MaxEntry,
    pub crit_damage: DivisorEntry,
    pub dodge: MaxEntry,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisorEntry {
    /// Raw stat is divided by this before contributing to damage.
    #[serde(default = "default_divisor")]
    pub divisor: f64,
    #[serde(default)]
    pub max: f64,
}

impl Default for DivisorEntry {
    fn default() -> Self {
        DivisorEntry {
            divisor: 2.0,
            max: 0.0,
        }
    }
}

fn default_divisor() -> f64 {
    2.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthEntry {
    /// Base maximum health before the health stat is added.
    #[serde(default = "default_base_health")]
    pub base: f64,
    #[serde(default)]
    pub max: f64,
}

impl Default for HealthEntry {
    fn default() -> Self {
        HealthEntry {
            base: 20.0,
            max: 0.0,
        }
    }
}

fn default_base_health() -> f64 {
    20.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxEntry {
    #[serde(default)]
    pub max: f64,
}

impl Default for MaxEntry {
    fn default() -> Self {
        MaxEntry { max: 0.0 }
    }
}

/// Lore rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoreSettings {
    pub separator: SeparatorSettings,
    /// Format string per stat config key; must contain `{value}`.
    pub format: HashMap<String, String>,
    /// Display order as stat keywords; unknown entries are skipped.
    pub order: Vec<String>,
}

impl Default for LoreSettings {
    fn default() -> Self {
        LoreSettings {
            separator: SeparatorSettings::default(),
            format: default_formats(),
            order: Vec::new(),
        }
    }
}

fn default_formats() -> HashMap<String, String> {
    [
        ("attack", "&c⚔ 공격력 &f+{value}"),
        ("defense", "&9🛡 방어력 &f+{value}"),
        ("health", "&6❤ 체력 &f+{value}"),
        ("lifesteal", "&4🩸 피흡수 &f{value}%"),
        ("crit_chance", "&e⚡ 치명타 확률 &f{value}%"),
        ("crit_damage", "&5💥 치명타 데미지 &f+{value}"),
        ("dodge", "&b💨 회피율 &f{value}%"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeparatorSettings {
    #[serde(default = "default_separator_enabled")]
    pub enabled: bool,
    #[serde(default = "default_separator_top")]
    pub top: String,
    #[serde(default = "default_separator_bottom")]
    pub bottom: String,
}

impl Default for SeparatorSettings {
    fn default() -> Self {
        SeparatorSettings {
            enabled: true,
            top: default_separator_top(),
            bottom: default_separator_bottom(),
        }
    }
}

fn default_separator_enabled() -> bool {
    true
}

fn default_separator_top() -> String {
    "&8&m─────&r &6✦ 스탯 &8&m─────".to_string()
}

fn default_separator_bottom() -> String {
    "&8&m──────────────────".to_string()
}
