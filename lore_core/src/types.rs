//! Core types: the stat catalog and equipment slots

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Player identity as handed to us by the host server.
pub type PlayerId = uuid::Uuid;

/// The seven combat stats carried in item lore.
///
/// Each kind has a stable config key, Korean/English display names, a
/// percent flag (display only) and a set of case-insensitive keyword
/// aliases for reverse lookup from chat commands and config entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    /// Flat bonus damage dealt in PVP
    Attack,
    /// Flat damage reduction
    Defense,
    /// Added maximum health
    Health,
    /// Percent of dealt damage returned as healing
    Lifesteal,
    /// Chance to land a critical hit
    CritChance,
    /// Bonus damage on a critical hit
    CritDamage,
    /// Chance to avoid an incoming hit entirely
    Dodge,
}

impl StatKind {
    /// All stat kinds in catalog declaration order.
    ///
    /// This order is the deterministic kind-iteration order used when
    /// several lore patterns could match the same line.
    pub const ALL: [StatKind; 7] = [
        StatKind::Attack,
        StatKind::Defense,
        StatKind::Health,
        StatKind::Lifesteal,
        StatKind::CritChance,
        StatKind::CritDamage,
        StatKind::Dodge,
    ];

    /// Stable identifier used in config files.
    pub fn config_key(self) -> &'static str {
        match self {
            StatKind::Attack => "attack",
            StatKind::Defense => "defense",
            StatKind::Health => "health",
            StatKind::Lifesteal => "lifesteal",
            StatKind::CritChance => "crit_chance",
            StatKind::CritDamage => "crit_damage",
            StatKind::Dodge => "dodge",
        }
    }

    /// Korean display name.
    pub fn display_name(self) -> &'static str {
        match self {
            StatKind::Attack => "공격력",
            StatKind::Defense => "방어력",
            StatKind::Health => "체력",
            StatKind::Lifesteal => "피흡수",
            StatKind::CritChance => "치명타 확률",
            StatKind::CritDamage => "치명타 데미지",
            StatKind::Dodge => "회피율",
        }
    }

    /// English display name.
    pub fn display_name_en(self) -> &'static str {
        match self {
            StatKind::Attack => "Attack",
            StatKind::Defense => "Defense",
            StatKind::Health => "Health",
            StatKind::Lifesteal => "Lifesteal",
            StatKind::CritChance => "Crit Chance",
            StatKind::CritDamage => "Crit Damage",
            StatKind::Dodge => "Dodge",
        }
    }

    /// Whether the stat is displayed as a percentage.
    ///
    /// Affects the text suffix only, never the numeric value.
    pub fn is_percent(self) -> bool {
        matches!(
            self,
            StatKind::Lifesteal | StatKind::CritChance | StatKind::Dodge
        )
    }

    /// Keyword aliases accepted by [`StatKind::find_by_keyword`].
    ///
    /// Invariant: aliases are globally unique across kinds.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            StatKind::Attack => &["공격력", "atk", "attack", "damage"],
            StatKind::Defense => &["방어력", "def", "defense"],
            StatKind::Health => &["체력", "hp", "health", "추가체력"],
            StatKind::Lifesteal => &["피흡수", "흡혈", "lifesteal"],
            StatKind::CritChance => &[
                "치명타 확률",
                "치명타확률",
                "치확",
                "crit",
                "critchance",
                "crit_chance",
            ],
            StatKind::CritDamage => &[
                "치명타 데미지",
                "치명타데미지",
                "치뎀",
                "critdamage",
                "crit_damage",
            ],
            StatKind::Dodge => &["회피율", "회피", "dodge"],
        }
    }

    /// Look up a stat kind by keyword, case-insensitively.
    ///
    /// Unknown or empty input is a normal empty result, not an error.
    pub fn find_by_keyword(keyword: &str) -> Option<StatKind> {
        if keyword.is_empty() {
            return None;
        }
        keyword_map().get(keyword.to_lowercase().as_str()).copied()
    }
}

fn keyword_map() -> &'static HashMap<String, StatKind> {
    static MAP: OnceLock<HashMap<String, StatKind>> = OnceLock::new();
    MAP.get_or_init(|| {
        let mut map = HashMap::new();
        for kind in StatKind::ALL {
            for keyword in kind.keywords() {
                map.insert(keyword.to_lowercase(), kind);
            }
        }
        map
    })
}

/// Equipment slot a stat-bearing item can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Helmet,
    Chestplate,
    Leggings,
    Boots,
    MainHand,
    OffHand,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Helmet,
            EquipmentSlot::Chestplate,
            EquipmentSlot::Leggings,
            EquipmentSlot::Boots,
            EquipmentSlot::MainHand,
            EquipmentSlot::OffHand,
        ]
    }

    /// Stable identifier used in config files.
    pub fn config_key(self) -> &'static str {
        match self {
            EquipmentSlot::Helmet => "helmet",
            EquipmentSlot::Chestplate => "chestplate",
            EquipmentSlot::Leggings => "leggings",
            EquipmentSlot::Boots => "boots",
            EquipmentSlot::MainHand => "main_hand",
            EquipmentSlot::OffHand => "off_hand",
        }
    }

    /// Korean display name.
    pub fn display_name(self) -> &'static str {
        match self {
            EquipmentSlot::Helmet => "투구",
            EquipmentSlot::Chestplate => "갑옷",
            EquipmentSlot::Leggings => "레깅스",
            EquipmentSlot::Boots => "부츠",
            EquipmentSlot::MainHand => "주무기",
            EquipmentSlot::OffHand => "보조무기",
        }
    }

    /// Whether this is an armor slot.
    pub fn is_armor(self) -> bool {
        matches!(
            self,
            EquipmentSlot::Helmet
                | EquipmentSlot::Chestplate
                | EquipmentSlot::Leggings
                | EquipmentSlot::Boots
        )
    }

    /// Whether this is a hand slot, gated by the weapon type check.
    pub fn is_weapon(self) -> bool {
        matches!(self, EquipmentSlot::MainHand | EquipmentSlot::OffHand)
    }
}
