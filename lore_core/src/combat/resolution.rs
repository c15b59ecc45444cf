//! Damage resolution - pure calculation from attacker and victim bundles

use crate::combat::result::DamageOutcome;
use crate::stats::ItemStats;
use crate::types::StatKind;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Divisors scaling raw stats before they contribute to damage.
///
/// Non-positive configured values are coerced to 1.0 at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageConfig {
    damage_divisor: f64,
    defense_divisor: f64,
    crit_damage_divisor: f64,
}

impl DamageConfig {
    /// Create a config, coercing each non-positive divisor to 1.0.
    pub fn new(damage_divisor: f64, defense_divisor: f64, crit_damage_divisor: f64) -> Self {
        DamageConfig {
            damage_divisor: sanitize_divisor(damage_divisor),
            defense_divisor: sanitize_divisor(defense_divisor),
            crit_damage_divisor: sanitize_divisor(crit_damage_divisor),
        }
    }

    pub fn damage_divisor(&self) -> f64 {
        self.damage_divisor
    }

    pub fn defense_divisor(&self) -> f64 {
        self.defense_divisor
    }

    pub fn crit_damage_divisor(&self) -> f64 {
        self.crit_damage_divisor
    }
}

impl Default for DamageConfig {
    fn default() -> Self {
        DamageConfig::new(2.0, 2.0, 2.0)
    }
}

fn sanitize_divisor(divisor: f64) -> f64 {
    if divisor.is_finite() && divisor > 0.0 {
        divisor
    } else {
        1.0
    }
}

/// Resolve one hit (RNG handled internally).
pub fn resolve_damage(
    base_damage: f64,
    attacker: &ItemStats,
    victim: &ItemStats,
    config: &DamageConfig,
) -> DamageOutcome {
    resolve_damage_with_rng(base_damage, attacker, victim, config, &mut rand::thread_rng())
}

/// Resolve one hit with a provided RNG (for deterministic testing).
///
/// Steps, in order: sanitize the base damage, dodge check, attack
/// contribution, critical check, defense reduction, floor at zero,
/// lifesteal. A dodge returns immediately; nothing after it is computed.
pub fn resolve_damage_with_rng(
    base_damage: f64,
    attacker: &ItemStats,
    victim: &ItemStats,
    config: &DamageConfig,
    rng: &mut impl Rng,
) -> DamageOutcome {
    let base_damage = if base_damage.is_finite() && base_damage >= 0.0 {
        base_damage
    } else {
        0.0
    };

    // dodge first: a dodged hit skips everything, lifesteal included
    if roll_chance(victim.get(StatKind::Dodge), rng) {
        return DamageOutcome::dodged();
    }

    let mut damage = base_damage + attacker.get(StatKind::Attack) / config.damage_divisor;

    let critical = roll_chance(attacker.get(StatKind::CritChance), rng);
    let critical_bonus = if critical {
        attacker.get(StatKind::CritDamage) / config.crit_damage_divisor
    } else {
        0.0
    };
    damage += critical_bonus;

    damage -= victim.get(StatKind::Defense) / config.defense_divisor;
    damage = damage.max(0.0);

    let lifesteal_percent = attacker.get(StatKind::Lifesteal);
    let lifesteal = if lifesteal_percent > 0.0 && damage > 0.0 {
        damage * lifesteal_percent / 100.0
    } else {
        0.0
    };

    DamageOutcome {
        final_damage: damage,
        critical,
        critical_bonus,
        lifesteal,
        dodged: false,
    }
}

/// Percentage chance check: <= 0 never fires, >= 100 always fires,
/// otherwise a uniform [0, 100) draw decides. No draw happens outside the
/// proportional range, so seeded sequences stay stable.
fn roll_chance(chance: f64, rng: &mut impl Rng) -> bool {
    if chance <= 0.0 {
        return false;
    }
    if chance >= 100.0 {
        return true;
    }
    rng.gen::<f64>() * 100.0 < chance
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn resolve(base: f64, attacker: &ItemStats, victim: &ItemStats) -> DamageOutcome {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        resolve_damage_with_rng(base, attacker, victim, &DamageConfig::default(), &mut rng)
    }

    #[test]
    fn test_attack_adds_scaled_damage() {
        let attacker = ItemStats::of(StatKind::Attack, 100.0);
        let outcome = resolve(10.0, &attacker, &ItemStats::empty());
        // 10 + 100/2 = 60
        assert_eq!(outcome.final_damage, 60.0);
        assert!(!outcome.critical);
        assert_eq!(outcome.lifesteal, 0.0);
    }

    #[test]
    fn test_attack_ratio_cases() {
        for (base, attack, expected) in [(10.0, 100.0, 60.0), (5.0, 50.0, 30.0), (0.0, 100.0, 50.0)]
        {
            let attacker = ItemStats::of(StatKind::Attack, attack);
            let outcome = resolve(base, &attacker, &ItemStats::empty());
            assert_eq!(outcome.final_damage, expected);
        }
    }

    #[test]
    fn test_defense_reduces_damage() {
        let victim = ItemStats::of(StatKind::Defense, 50.0);
        let outcome = resolve(100.0, &ItemStats::empty(), &victim);
        // 100 - 50/2 = 75
        assert_eq!(outcome.final_damage, 75.0);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let victim = ItemStats::of(StatKind::Defense, 500.0);
        let outcome = resolve(10.0, &ItemStats::empty(), &victim);
        assert_eq!(outcome.final_damage, 0.0);
        assert_eq!(outcome.lifesteal, 0.0);
    }

    #[test]
    fn test_guaranteed_critical() {
        let attacker = ItemStats::of(StatKind::Attack, 100.0)
            .with_stat(StatKind::CritChance, 100.0)
            .with_stat(StatKind::CritDamage, 100.0);
        let outcome = resolve(10.0, &attacker, &ItemStats::empty());
        // 10 + 50 + 50 = 110
        assert!(outcome.critical);
        assert_eq!(outcome.critical_bonus, 50.0);
        assert_eq!(outcome.final_damage, 110.0);
    }

    #[test]
    fn test_zero_crit_chance_never_crits() {
        let attacker = ItemStats::of(StatKind::CritDamage, 100.0);
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let outcome = resolve_damage_with_rng(
                10.0,
                &attacker,
                &ItemStats::empty(),
                &DamageConfig::default(),
                &mut rng,
            );
            assert!(!outcome.critical);
            assert_eq!(outcome.critical_bonus, 0.0);
        }
    }

    #[test]
    fn test_guaranteed_dodge_short_circuits() {
        let attacker = ItemStats::of(StatKind::Attack, 1000.0)
            .with_stat(StatKind::CritChance, 100.0)
            .with_stat(StatKind::CritDamage, 500.0)
            .with_stat(StatKind::Lifesteal, 50.0);
        let victim = ItemStats::of(StatKind::Dodge, 100.0);
        let outcome = resolve(100.0, &attacker, &victim);
        assert_eq!(outcome, DamageOutcome::dodged());
    }

    #[test]
    fn test_zero_dodge_never_dodges() {
        for seed in 0..1000 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let outcome = resolve_damage_with_rng(
                50.0,
                &ItemStats::empty(),
                &ItemStats::empty(),
                &DamageConfig::default(),
                &mut rng,
            );
            assert!(!outcome.dodged);
        }
    }

    #[test]
    fn test_dodge_rate_converges() {
        let victim = ItemStats::of(StatKind::Dodge, 30.0);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let trials = 10_000;
        let dodges = (0..trials)
            .filter(|_| {
                resolve_damage_with_rng(
                    10.0,
                    &ItemStats::empty(),
                    &victim,
                    &DamageConfig::default(),
                    &mut rng,
                )
                .dodged
            })
            .count();
        let rate = dodges as f64 / trials as f64;
        assert!((rate - 0.30).abs() < 0.02, "observed dodge rate {rate}");
    }

    #[test]
    fn test_lifesteal_from_final_damage() {
        let attacker = ItemStats::of(StatKind::Attack, 100.0).with_stat(StatKind::Lifesteal, 10.0);
        let outcome = resolve(50.0, &attacker, &ItemStats::empty());
        // final 100, 10% of it healed
        assert_eq!(outcome.final_damage, 100.0);
        assert_eq!(outcome.lifesteal, 10.0);
    }

    #[test]
    fn test_full_scenario() {
        let attacker = ItemStats::of(StatKind::Attack, 100.0)
            .with_stat(StatKind::CritChance, 100.0)
            .with_stat(StatKind::CritDamage, 60.0)
            .with_stat(StatKind::Lifesteal, 20.0);
        let victim = ItemStats::of(StatKind::Defense, 40.0);
        let outcome = resolve(10.0, &attacker, &victim);
        // 10 + 50 + 30 - 20 = 70; lifesteal 70 * 0.2 = 14
        assert_eq!(outcome.final_damage, 70.0);
        assert!(outcome.critical);
        assert_eq!(outcome.critical_bonus, 30.0);
        assert_eq!(outcome.lifesteal, 14.0);
    }

    #[test]
    fn test_invalid_base_damage_sanitized() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -25.0] {
            let outcome = resolve(bad, &ItemStats::empty(), &ItemStats::empty());
            assert_eq!(outcome.final_damage, 0.0);
        }
    }

    #[test]
    fn test_custom_divisors() {
        let config = DamageConfig::new(4.0, 4.0, 4.0);
        let attacker = ItemStats::of(StatKind::Attack, 100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome =
            resolve_damage_with_rng(10.0, &attacker, &ItemStats::empty(), &config, &mut rng);
        // 10 + 100/4 = 35
        assert_eq!(outcome.final_damage, 35.0);
    }

    #[test]
    fn test_non_positive_divisors_coerced() {
        let config = DamageConfig::new(0.0, -3.0, f64::NAN);
        assert_eq!(config.damage_divisor(), 1.0);
        assert_eq!(config.defense_divisor(), 1.0);
        assert_eq!(config.crit_damage_divisor(), 1.0);
    }

    #[test]
    fn test_damage_never_negative() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let config = DamageConfig::default();
        for i in 0..200 {
            let attacker = ItemStats::of(StatKind::Attack, (i * 3) as f64);
            let victim = ItemStats::of(StatKind::Defense, (i * 17) as f64)
                .with_stat(StatKind::Dodge, (i % 50) as f64);
            let outcome =
                resolve_damage_with_rng((i % 7) as f64, &attacker, &victim, &config, &mut rng);
            assert!(outcome.final_damage >= 0.0);
        }
    }
}
