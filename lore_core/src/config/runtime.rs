//! Compiled runtime configuration and the shared snapshot handle

use crate::combat::DamageConfig;
use crate::config::settings::Settings;
use crate::config::weapons::WeaponMatcher;
use crate::lore::{LoreManager, LoreTemplate};
use crate::types::StatKind;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::warn;

/// Configuration compiled into its ready-to-use form: divisors sanitized,
/// globs and lore patterns compiled, order keywords resolved.
///
/// Immutable once built; a reload builds a fresh instance and swaps it in
/// via [`ConfigHandle`].
#[derive(Debug)]
pub struct RuntimeConfig {
    update_interval: u32,
    pvp_only: bool,
    debug: bool,
    base_health: f64,
    damage: DamageConfig,
    max_stats: HashMap<StatKind, f64>,
    weapons: WeaponMatcher,
    lore: LoreManager,
}

impl RuntimeConfig {
    /// Compile raw settings, defaulting every invalid entry.
    pub fn from_settings(settings: &Settings) -> Self {
        let general = &settings.settings;
        let update_interval = if general.update_interval >= 1 {
            general.update_interval as u32
        } else {
            warn!(
                configured = general.update_interval,
                "non-positive update interval, using 1"
            );
            1
        };

        let stats = &settings.stats;
        let damage = DamageConfig::new(
            stats.attack.divisor,
            stats.defense.divisor,
            stats.crit_damage.divisor,
        );

        let base_health = if stats.health.base >= 1.0 && stats.health.base.is_finite() {
            stats.health.base
        } else {
            warn!(
                configured = stats.health.base,
                "invalid base health, using 20"
            );
            20.0
        };

        let max_stats = HashMap::from([
            (StatKind::Attack, sanitize_max(stats.attack.max)),
            (StatKind::Defense, sanitize_max(stats.defense.max)),
            (StatKind::Health, sanitize_max(stats.health.max)),
            (StatKind::Lifesteal, sanitize_max(stats.lifesteal.max)),
            (StatKind::CritChance, sanitize_max(stats.crit_chance.max)),
            (StatKind::CritDamage, sanitize_max(stats.crit_damage.max)),
            (StatKind::Dodge, sanitize_max(stats.dodge.max)),
        ]);

        let weapons = WeaponMatcher::from_globs(&settings.weapons);
        let lore = LoreManager::new(build_template(settings));

        RuntimeConfig {
            update_interval,
            pvp_only: general.pvp_only,
            debug: general.debug,
            base_health,
            damage,
            max_stats,
            weapons,
            lore,
        }
    }

    /// Ticks between periodic stat sweeps, always >= 1.
    pub fn update_interval(&self) -> u32 {
        self.update_interval
    }

    pub fn pvp_only(&self) -> bool {
        self.pvp_only
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Base maximum health before the health stat is added.
    pub fn base_health(&self) -> f64 {
        self.base_health
    }

    pub fn damage_config(&self) -> &DamageConfig {
        &self.damage
    }

    /// Configured cap for a stat kind; 0 means unlimited.
    pub fn max_stat(&self, kind: StatKind) -> f64 {
        self.max_stats.get(&kind).copied().unwrap_or(0.0)
    }

    /// Clamp a requested stat value: never negative, capped by the
    /// configured per-kind maximum when one is set.
    pub fn clamp_stat_value(&self, kind: StatKind, value: f64) -> f64 {
        let clamped = if value.is_finite() { value.max(0.0) } else { 0.0 };
        let max = self.max_stat(kind);
        if max > 0.0 {
            clamped.min(max)
        } else {
            clamped
        }
    }

    /// Whether an item type is accepted in hand slots.
    pub fn is_weapon(&self, type_name: &str) -> bool {
        self.weapons.matches(type_name)
    }

    pub fn lore(&self) -> &LoreManager {
        &self.lore
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        RuntimeConfig::from_settings(&Settings::default())
    }
}

fn sanitize_max(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        max
    } else {
        0.0
    }
}

/// Resolve the lore section into a template: format keys resolved by
/// config key, order entries resolved by keyword, unknown entries logged
/// and skipped.
fn build_template(settings: &Settings) -> LoreTemplate {
    let lore = &settings.lore;

    let mut formats = HashMap::new();
    for (key, format) in &lore.format {
        match StatKind::ALL.iter().find(|kind| kind.config_key() == key) {
            Some(kind) => {
                formats.insert(*kind, format.clone());
            }
            None => warn!(key = %key, "unknown stat key in lore format section, skipped"),
        }
    }

    let mut order = Vec::new();
    for keyword in &lore.order {
        match StatKind::find_by_keyword(keyword) {
            Some(kind) => order.push(kind),
            None => warn!(keyword = %keyword, "unknown stat keyword in lore order, skipped"),
        }
    }

    LoreTemplate::new(
        formats,
        order,
        lore.separator.top.clone(),
        lore.separator.bottom.clone(),
        lore.separator.enabled,
    )
}

/// Shared handle to the active configuration snapshot.
///
/// Readers take an `Arc` to the snapshot they start with; a reload swaps
/// the single reference, so in-flight operations finish against the old
/// snapshot and nobody ever observes a half-updated configuration.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<Arc<RuntimeConfig>>>,
}

impl ConfigHandle {
    pub fn new(config: RuntimeConfig) -> Self {
        ConfigHandle {
            inner: Arc::new(RwLock::new(Arc::new(config))),
        }
    }

    /// The current snapshot.
    pub fn current(&self) -> Arc<RuntimeConfig> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swap in a new snapshot.
    pub fn replace(&self, config: RuntimeConfig) {
        let mut slot = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Arc::new(config);
    }
}

impl std::fmt::Debug for ConfigHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigHandle").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_toml;

    #[test]
    fn test_defaults_compile() {
        let config = RuntimeConfig::default();
        assert_eq!(config.update_interval(), 10);
        assert!(config.pvp_only());
        assert_eq!(config.base_health(), 20.0);
        assert_eq!(config.damage_config().damage_divisor(), 2.0);
        assert!(config.is_weapon("DIAMOND_SWORD"));
        assert!(!config.is_weapon("STICK"));
    }

    #[test]
    fn test_invalid_entries_coerced() {
        let settings: Settings = parse_toml(
            r#"
[settings]
update_interval = -5

[stats.attack]
divisor = 0.0

[stats.health]
base = 0.5
"#,
        )
        .unwrap();
        let config = RuntimeConfig::from_settings(&settings);
        assert_eq!(config.update_interval(), 1);
        assert_eq!(config.damage_config().damage_divisor(), 1.0);
        assert_eq!(config.base_health(), 20.0);
    }

    #[test]
    fn test_clamp_stat_value() {
        let settings: Settings = parse_toml(
            r#"
[stats.dodge]
max = 80
"#,
        )
        .unwrap();
        let config = RuntimeConfig::from_settings(&settings);
        assert_eq!(config.clamp_stat_value(StatKind::Dodge, 95.0), 80.0);
        assert_eq!(config.clamp_stat_value(StatKind::Dodge, 40.0), 40.0);
        assert_eq!(config.clamp_stat_value(StatKind::Dodge, -5.0), 0.0);
        // max 0 means unlimited
        assert_eq!(config.clamp_stat_value(StatKind::Attack, 1e6), 1e6);
    }

    #[test]
    fn test_order_resolved_by_keyword() {
        let settings: Settings = parse_toml(
            r#"
[lore]
order = ["회피율", "attack", "unknown_stat"]
"#,
        )
        .unwrap();
        let config = RuntimeConfig::from_settings(&settings);
        assert_eq!(
            config.lore().template().order(),
            &[StatKind::Dodge, StatKind::Attack]
        );
    }

    #[test]
    fn test_unknown_format_key_skipped() {
        let settings: Settings = parse_toml(
            r#"
[lore.format]
attack = "공격력: {value}"
mana = "마나: {value}"
"#,
        )
        .unwrap();
        let config = RuntimeConfig::from_settings(&settings);
        assert!(config.lore().template().format(StatKind::Attack).is_some());
        // only explicitly configured formats are installed
        assert!(config.lore().template().format(StatKind::Defense).is_none());
    }

    #[test]
    fn test_handle_snapshot_swap() {
        let handle = ConfigHandle::new(RuntimeConfig::default());
        let before = handle.current();
        assert!(before.pvp_only());

        let settings: Settings = parse_toml("[settings]\npvp_only = false\n").unwrap();
        handle.replace(RuntimeConfig::from_settings(&settings));

        // the old snapshot is untouched, the new one is visible
        assert!(before.pvp_only());
        assert!(!handle.current().pvp_only());
    }
}
