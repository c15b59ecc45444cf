//! LoreManager - parse, generate and edit stat blocks in item lore

use crate::lore::color::strip_color;
use crate::lore::pattern::LinePattern;
use crate::lore::template::LoreTemplate;
use crate::stats::ItemStats;
use crate::types::StatKind;
use tracing::warn;

/// Characters a generic separator line may consist of.
const SEPARATOR_CHARS: [char; 4] = ['─', '-', '━', '═'];

/// Parses stat bundles out of lore lines and writes them back, using only
/// the line formats of the active [`LoreTemplate`]. Lines that are neither
/// stat lines nor separators are preserved untouched with their relative
/// order.
#[derive(Debug)]
pub struct LoreManager {
    template: LoreTemplate,
    /// Compiled patterns in catalog order; this order decides which kind
    /// wins when several patterns could match one line.
    patterns: Vec<(StatKind, LinePattern)>,
    separator_top_stripped: String,
    separator_bottom_stripped: String,
}

impl LoreManager {
    /// Build a manager for a template.
    ///
    /// Kinds whose format lacks the `{value}` placeholder are logged and
    /// excluded from parsing; a misconfigured format must not take the
    /// whole parser down.
    pub fn new(template: LoreTemplate) -> Self {
        let mut patterns = Vec::new();
        for kind in StatKind::ALL {
            let Some(format) = template.format(kind) else {
                continue;
            };
            if format.is_empty() {
                continue;
            }
            match LinePattern::compile(format, kind.is_percent()) {
                Some(pattern) => patterns.push((kind, pattern)),
                None => warn!(
                    stat = kind.config_key(),
                    "lore format has no {{value}} placeholder, stat excluded from parsing"
                ),
            }
        }
        let separator_top_stripped = strip_color(&template.separator_top()).into_owned();
        let separator_bottom_stripped = strip_color(&template.separator_bottom()).into_owned();
        LoreManager {
            template,
            patterns,
            separator_top_stripped,
            separator_bottom_stripped,
        }
    }

    /// The active template.
    pub fn template(&self) -> &LoreTemplate {
        &self.template
    }

    /// Parse the stat bundle encoded in lore lines.
    ///
    /// Each line yields at most one kind: the first pattern in catalog
    /// order that matches wins, and a later line overwrites an earlier
    /// value for the same kind. Lines with an unparseable or negative
    /// captured value, and lines matching no pattern, contribute nothing.
    pub fn parse_lore(&self, lore: &[String]) -> ItemStats {
        if lore.is_empty() {
            return ItemStats::empty();
        }

        let mut found: Vec<(StatKind, f64)> = Vec::new();
        for line in lore {
            let stripped = strip_color(line);
            for (kind, pattern) in &self.patterns {
                if let Some(raw) = pattern.find_raw(&stripped) {
                    if let Ok(value) = raw.parse::<f64>() {
                        if value >= 0.0 {
                            found.push((*kind, value));
                        }
                    }
                    break;
                }
            }
        }
        ItemStats::from_pairs(found)
    }

    /// Render the lore lines for a stat bundle.
    ///
    /// Emits one line per non-zero kind in display order, wrapped by the
    /// configured separators when enabled. An empty bundle, or a bundle
    /// whose non-zero kinds all lack formats, yields no lines at all —
    /// never separator-only output.
    pub fn generate_lore(&self, stats: &ItemStats) -> Vec<String> {
        if stats.is_empty() {
            return Vec::new();
        }

        let mut lore = Vec::new();
        if self.template.separator_enabled() {
            lore.push(self.template.separator_top());
        }
        for kind in self.template.order() {
            let value = stats.get(*kind);
            if value > 0.0 {
                if let Some(line) = self.template.format_stat(*kind, value) {
                    lore.push(line);
                }
            }
        }
        if self.template.separator_enabled() {
            if lore.len() > 1 {
                lore.push(self.template.separator_bottom());
            } else {
                // a lone top separator means no stat lines were emitted
                lore.clear();
            }
        }
        lore
    }

    /// Replace or insert the stat block within existing lore.
    ///
    /// Stat and separator lines are excised in a single scan; the freshly
    /// generated block lands at the position of the first excised line, or
    /// at `insert_index` (clamped) when no prior block existed. An empty
    /// bundle leaves the lore unchanged.
    pub fn add_or_update_stats(
        &self,
        existing: &[String],
        new_stats: &ItemStats,
        insert_index: usize,
    ) -> Vec<String> {
        if new_stats.is_empty() {
            return existing.to_vec();
        }

        let mut before = Vec::new();
        let mut after = Vec::new();
        let mut found_block = false;
        for line in existing {
            if self.is_stat_line(line) || self.is_separator_line(line) {
                found_block = true;
            } else if !found_block {
                before.push(line.clone());
            } else {
                after.push(line.clone());
            }
        }

        let block = self.generate_lore(new_stats);
        let mut result = Vec::with_capacity(before.len() + block.len() + after.len());
        if found_block {
            result.extend(before);
            result.extend(block);
            result.extend(after);
        } else {
            let at = insert_index.min(before.len());
            result.extend_from_slice(&before[..at]);
            result.extend(block);
            result.extend_from_slice(&before[at..]);
        }
        result
    }

    /// Remove one stat from the lore.
    ///
    /// When the removed stat was the last one, all stat and separator
    /// lines disappear; otherwise the block is regenerated in place.
    pub fn remove_stat(&self, existing: &[String], kind: StatKind) -> Vec<String> {
        if existing.is_empty() {
            return Vec::new();
        }

        let current = self.parse_lore(existing);
        let reduced = current.without_stat(kind);
        if reduced.is_empty() {
            return self.remove_all_stats(existing);
        }
        self.add_or_update_stats(existing, &reduced, 0)
    }

    /// Remove every stat and separator line, preserving the rest.
    pub fn remove_all_stats(&self, existing: &[String]) -> Vec<String> {
        existing
            .iter()
            .filter(|line| !self.is_stat_line(line) && !self.is_separator_line(line))
            .cloned()
            .collect()
    }

    /// Whether the color-stripped line matches any configured stat format.
    pub fn is_stat_line(&self, line: &str) -> bool {
        if line.is_empty() {
            return false;
        }
        let stripped = strip_color(line);
        self.patterns
            .iter()
            .any(|(_, pattern)| pattern.find_raw(&stripped).is_some())
    }

    /// Whether the color-stripped line is a separator: one of the
    /// configured separators, or a generic run of dash characters.
    pub fn is_separator_line(&self, line: &str) -> bool {
        if line.is_empty() {
            return false;
        }
        let stripped = strip_color(line);
        if stripped == self.separator_top_stripped.as_str()
            || stripped == self.separator_bottom_stripped.as_str()
        {
            return true;
        }
        let is_dash_run =
            !stripped.is_empty() && stripped.chars().all(|c| SEPARATOR_CHARS.contains(&c));
        is_dash_run || stripped.contains("────") || stripped.contains("----")
    }
}

impl Default for LoreManager {
    fn default() -> Self {
        LoreManager::new(LoreTemplate::default())
    }
}
