//! Lore text handling: color markup, templates, parsing and editing
//!
//! Item lore is the encoding medium for stats. A [`LoreTemplate`] defines
//! the per-kind line format; [`LoreManager`] renders bundles to lore lines
//! and parses them back using matchers compiled from the same templates,
//! while preserving unrelated lore content.

mod color;
mod manager;
mod pattern;
mod template;

pub use color::{strip_color, translate_color_codes};
pub use manager::LoreManager;
pub use template::LoreTemplate;
