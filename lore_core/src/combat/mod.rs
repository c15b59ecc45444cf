//! Combat resolution - resolve PVP damage from two stat bundles

mod resolution;
mod result;

pub use resolution::{resolve_damage, resolve_damage_with_rng, DamageConfig};
pub use result::DamageOutcome;
