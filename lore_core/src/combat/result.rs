//! DamageOutcome - the result of one damage resolution

use serde::Serialize;

/// Outcome of resolving one hit.
///
/// A dodge forces every other field to its zero/false state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageOutcome {
    /// Final damage after all modifiers, never negative.
    pub final_damage: f64,
    /// Whether the hit was critical.
    pub critical: bool,
    /// Bonus damage added by the critical hit.
    pub critical_bonus: f64,
    /// Health the attacker recovers from lifesteal.
    pub lifesteal: f64,
    /// Whether the victim dodged the hit entirely.
    pub dodged: bool,
}

impl DamageOutcome {
    /// The outcome of a dodged hit.
    pub fn dodged() -> Self {
        DamageOutcome {
            final_damage: 0.0,
            critical: false,
            critical_bonus: 0.0,
            lifesteal: 0.0,
            dodged: true,
        }
    }
}
