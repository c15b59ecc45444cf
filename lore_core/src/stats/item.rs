//! ItemStats - the stat bundle carried by a single item

use crate::types::StatKind;
use serde::{Deserialize, Serialize};

/// Stats parsed from one item's lore.
///
/// Value object: every value is non-negative (negative and non-finite
/// inputs are clamped to 0 at construction) and instances are never
/// mutated after construction; modifications produce new instances.
/// A value of 0 and an absent stat are equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    attack: f64,
    defense: f64,
    health: f64,
    lifesteal: f64,
    crit_chance: f64,
    crit_damage: f64,
    dodge: f64,
}

impl ItemStats {
    /// Create a bundle from the seven values, clamping negatives to 0.
    pub fn new(
        attack: f64,
        defense: f64,
        health: f64,
        lifesteal: f64,
        crit_chance: f64,
        crit_damage: f64,
        dodge: f64,
    ) -> Self {
        ItemStats {
            attack: clamp(attack),
            defense: clamp(defense),
            health: clamp(health),
            lifesteal: clamp(lifesteal),
            crit_chance: clamp(crit_chance),
            crit_damage: clamp(crit_damage),
            dodge: clamp(dodge),
        }
    }

    /// The empty bundle (all values 0).
    pub fn empty() -> Self {
        ItemStats::default()
    }

    /// Create a bundle with a single stat set.
    pub fn of(kind: StatKind, value: f64) -> Self {
        ItemStats::empty().with_stat(kind, value)
    }

    /// Create a bundle from (kind, value) pairs; later pairs overwrite
    /// earlier ones for the same kind.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (StatKind, f64)>,
    {
        let mut stats = ItemStats::empty();
        for (kind, value) in pairs {
            stats = stats.with_stat(kind, value);
        }
        stats
    }

    /// Get the value for a stat kind.
    pub fn get(&self, kind: StatKind) -> f64 {
        match kind {
            StatKind::Attack => self.attack,
            StatKind::Defense => self.defense,
            StatKind::Health => self.health,
            StatKind::Lifesteal => self.lifesteal,
            StatKind::CritChance => self.crit_chance,
            StatKind::CritDamage => self.crit_damage,
            StatKind::Dodge => self.dodge,
        }
    }

    /// Whether the stat is set (value > 0).
    pub fn has(&self, kind: StatKind) -> bool {
        self.get(kind) > 0.0
    }

    /// Whether every value is 0.
    pub fn is_empty(&self) -> bool {
        *self == ItemStats::empty()
    }

    /// The non-zero stats in catalog order.
    pub fn non_zero(&self) -> Vec<(StatKind, f64)> {
        StatKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let value = self.get(kind);
                (value > 0.0).then_some((kind, value))
            })
            .collect()
    }

    /// New instance with one stat replaced.
    pub fn with_stat(&self, kind: StatKind, value: f64) -> Self {
        let mut next = *self;
        let slot = match kind {
            StatKind::Attack => &mut next.attack,
            StatKind::Defense => &mut next.defense,
            StatKind::Health => &mut next.health,
            StatKind::Lifesteal => &mut next.lifesteal,
            StatKind::CritChance => &mut next.crit_chance,
            StatKind::CritDamage => &mut next.crit_damage,
            StatKind::Dodge => &mut next.dodge,
        };
        *slot = clamp(value);
        next
    }

    /// New instance with one stat removed (set to 0).
    pub fn without_stat(&self, kind: StatKind) -> Self {
        self.with_stat(kind, 0.0)
    }

    /// New instance with the pairwise sum of both bundles.
    pub fn merge(&self, other: &ItemStats) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        ItemStats {
            attack: self.attack + other.attack,
            defense: self.defense + other.defense,
            health: self.health + other.health,
            lifesteal: self.lifesteal + other.lifesteal,
            crit_chance: self.crit_chance + other.crit_chance,
            crit_damage: self.crit_damage + other.crit_damage,
            dodge: self.dodge + other.dodge,
        }
    }
}

fn clamp(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_is_empty() {
        assert!(ItemStats::empty().is_empty());
        assert!(!ItemStats::of(StatKind::Attack, 1.0).is_empty());
    }

    #[test]
    fn test_negative_values_clamped() {
        let stats = ItemStats::new(-5.0, -0.1, 10.0, 0.0, 0.0, 0.0, -100.0);
        assert_eq!(stats.get(StatKind::Attack), 0.0);
        assert_eq!(stats.get(StatKind::Defense), 0.0);
        assert_eq!(stats.get(StatKind::Health), 10.0);
        assert_eq!(stats.get(StatKind::Dodge), 0.0);
    }

    #[test]
    fn test_non_finite_values_clamped() {
        let stats = ItemStats::of(StatKind::Attack, f64::NAN)
            .with_stat(StatKind::Defense, f64::INFINITY);
        assert_eq!(stats.get(StatKind::Attack), 0.0);
        assert_eq!(stats.get(StatKind::Defense), 0.0);
    }

    #[test]
    fn test_with_and_without_stat() {
        let stats = ItemStats::of(StatKind::Attack, 50.0).with_stat(StatKind::Dodge, 15.0);
        assert_eq!(stats.get(StatKind::Attack), 50.0);
        assert_eq!(stats.get(StatKind::Dodge), 15.0);

        let reduced = stats.without_stat(StatKind::Attack);
        assert_eq!(reduced.get(StatKind::Attack), 0.0);
        assert_eq!(reduced.get(StatKind::Dodge), 15.0);
        // original untouched
        assert_eq!(stats.get(StatKind::Attack), 50.0);
    }

    #[test]
    fn test_merge_sums_pairwise() {
        let a = ItemStats::of(StatKind::Attack, 30.0).with_stat(StatKind::Health, 20.0);
        let b = ItemStats::of(StatKind::Attack, 20.0).with_stat(StatKind::Dodge, 5.0);
        let merged = a.merge(&b);
        assert_eq!(merged.get(StatKind::Attack), 50.0);
        assert_eq!(merged.get(StatKind::Health), 20.0);
        assert_eq!(merged.get(StatKind::Dodge), 5.0);
    }

    #[test]
    fn test_merge_with_empty_is_identity() {
        let a = ItemStats::of(StatKind::CritChance, 25.0);
        assert_eq!(a.merge(&ItemStats::empty()), a);
        assert_eq!(ItemStats::empty().merge(&a), a);
    }

    #[test]
    fn test_from_pairs_last_wins() {
        let stats = ItemStats::from_pairs([
            (StatKind::Attack, 10.0),
            (StatKind::Attack, 40.0),
            (StatKind::Defense, 5.0),
        ]);
        assert_eq!(stats.get(StatKind::Attack), 40.0);
        assert_eq!(stats.get(StatKind::Defense), 5.0);
    }

    #[test]
    fn test_non_zero_in_catalog_order() {
        let stats = ItemStats::of(StatKind::Dodge, 10.0).with_stat(StatKind::Attack, 5.0);
        assert_eq!(
            stats.non_zero(),
            vec![(StatKind::Attack, 5.0), (StatKind::Dodge, 10.0)]
        );
    }

    fn arb_stats() -> impl Strategy<Value = ItemStats> {
        let v = -100.0..1000.0f64;
        (
            v.clone(),
            v.clone(),
            v.clone(),
            v.clone(),
            v.clone(),
            v.clone(),
            v,
        )
            .prop_map(|(a, d, h, l, cc, cd, dg)| ItemStats::new(a, d, h, l, cc, cd, dg))
    }

    proptest! {
        #[test]
        fn prop_values_never_negative(stats in arb_stats()) {
            for kind in StatKind::ALL {
                prop_assert!(stats.get(kind) >= 0.0);
            }
        }

        #[test]
        fn prop_merge_commutative(a in arb_stats(), b in arb_stats()) {
            prop_assert_eq!(a.merge(&b), b.merge(&a));
        }

        #[test]
        fn prop_merge_associative(a in arb_stats(), b in arb_stats(), c in arb_stats()) {
            let left = a.merge(&b).merge(&c);
            let right = a.merge(&b.merge(&c));
            for kind in StatKind::ALL {
                prop_assert!((left.get(kind) - right.get(kind)).abs() < 1e-9);
            }
        }
    }
}
