//! LoreTemplate - configured per-kind lore line formats

use crate::lore::color::translate_color_codes;
use crate::types::StatKind;
use std::collections::HashMap;

/// Placeholder substituted with the stat value when rendering a line.
pub(crate) const VALUE_PLACEHOLDER: &str = "{value}";

/// The configured shape of a stat block in item lore: one format string
/// per kind, a display order, and optional separator lines.
///
/// Built once from configuration and replaced wholesale on reload.
#[derive(Debug, Clone)]
pub struct LoreTemplate {
    formats: HashMap<StatKind, String>,
    order: Vec<StatKind>,
    separator_top: String,
    separator_bottom: String,
    separator_enabled: bool,
}

impl LoreTemplate {
    /// Create a template from its parts.
    ///
    /// An empty order falls back to catalog order.
    pub fn new(
        formats: HashMap<StatKind, String>,
        order: Vec<StatKind>,
        separator_top: impl Into<String>,
        separator_bottom: impl Into<String>,
        separator_enabled: bool,
    ) -> Self {
        let order = if order.is_empty() {
            StatKind::ALL.to_vec()
        } else {
            order
        };
        LoreTemplate {
            formats,
            order,
            separator_top: separator_top.into(),
            separator_bottom: separator_bottom.into(),
            separator_enabled,
        }
    }

    /// Raw format string for a kind, if configured.
    pub fn format(&self, kind: StatKind) -> Option<&str> {
        self.formats.get(&kind).map(String::as_str)
    }

    /// Render one stat line; `None` when the kind has no format.
    ///
    /// Integral values render without a decimal point.
    pub fn format_stat(&self, kind: StatKind, value: f64) -> Option<String> {
        let format = self.formats.get(&kind)?;
        let value_text = if value.is_finite() && value.fract() == 0.0 {
            (value as i64).to_string()
        } else {
            value.to_string()
        };
        Some(translate_color_codes(
            &format.replace(VALUE_PLACEHOLDER, &value_text),
        ))
    }

    /// Display order of kinds.
    pub fn order(&self) -> &[StatKind] {
        &self.order
    }

    /// Top separator line, color codes translated.
    pub fn separator_top(&self) -> String {
        translate_color_codes(&self.separator_top)
    }

    /// Bottom separator line, color codes translated.
    pub fn separator_bottom(&self) -> String {
        translate_color_codes(&self.separator_bottom)
    }

    /// Whether separator lines wrap the stat block.
    pub fn separator_enabled(&self) -> bool {
        self.separator_enabled
    }
}

impl Default for LoreTemplate {
    fn default() -> Self {
        let formats = HashMap::from([
            (StatKind::Attack, "&c⚔ 공격력 &f+{value}".to_string()),
            (StatKind::Defense, "&9🛡 방어력 &f+{value}".to_string()),
            (StatKind::Health, "&6❤ 체력 &f+{value}".to_string()),
            (StatKind::Lifesteal, "&4🩸 피흡수 &f{value}%".to_string()),
            (StatKind::CritChance, "&e⚡ 치명타 확률 &f{value}%".to_string()),
            (StatKind::CritDamage, "&5💥 치명타 데미지 &f+{value}".to_string()),
            (StatKind::Dodge, "&b💨 회피율 &f{value}%".to_string()),
        ]);
        LoreTemplate::new(
            formats,
            StatKind::ALL.to_vec(),
            "&8&m─────&r &6✦ 스탯 &8&m─────",
            "&8&m──────────────────",
            true,
        )
    }
}
