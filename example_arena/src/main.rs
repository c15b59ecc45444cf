//! Example Arena - a scripted PVP bout demonstrating lore_core
//!
//! Plays the host server's role: it owns the fighters, their equipment and
//! health, feeds events into the engine and applies the side effects the
//! combat outcomes ask for. Run with an optional config path:
//!
//! ```text
//! example_arena [arena.toml]
//! ```

use lore_core::config::load_toml;
use lore_core::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;
use uuid::Uuid;

/// One fighter as the host tracks it.
struct Fighter {
    name: String,
    health: f64,
    max_health: f64,
    equipment: EquipmentSnapshot,
}

/// The arena is the host: equipment source and health backend in one.
#[derive(Default)]
struct Arena {
    fighters: RefCell<HashMap<PlayerId, Fighter>>,
}

impl Arena {
    fn join(&self, name: &str, equipment: EquipmentSnapshot) -> PlayerId {
        let id = Uuid::new_v4();
        self.fighters.borrow_mut().insert(
            id,
            Fighter {
                name: name.to_string(),
                health: 20.0,
                max_health: 20.0,
                equipment,
            },
        );
        id
    }

    fn name(&self, player: PlayerId) -> String {
        self.fighters
            .borrow()
            .get(&player)
            .map(|f| f.name.clone())
            .unwrap_or_else(|| player.to_string())
    }

    fn hp(&self, player: PlayerId) -> (f64, f64) {
        self.fighters
            .borrow()
            .get(&player)
            .map(|f| (f.health, f.max_health))
            .unwrap_or((0.0, 0.0))
    }

    fn damage(&self, player: PlayerId, amount: f64) {
        if let Some(fighter) = self.fighters.borrow_mut().get_mut(&player) {
            fighter.health = (fighter.health - amount).max(0.0);
        }
    }

    fn heal(&self, player: PlayerId, amount: f64) {
        if let Some(fighter) = self.fighters.borrow_mut().get_mut(&player) {
            fighter.health = (fighter.health + amount).min(fighter.max_health);
        }
    }

    fn alive(&self, player: PlayerId) -> bool {
        self.hp(player).0 > 0.0
    }
}

impl EquipmentSource for Arena {
    fn players(&self) -> Vec<PlayerId> {
        self.fighters.borrow().keys().copied().collect()
    }

    fn equipment(&self, player: PlayerId) -> EquipmentSnapshot {
        self.fighters
            .borrow()
            .get(&player)
            .map(|f| f.equipment.clone())
            .unwrap_or_default()
    }
}

impl HealthBackend for Arena {
    fn max_health(&self, player: PlayerId) -> Option<f64> {
        self.fighters.borrow().get(&player).map(|f| f.max_health)
    }

    fn set_max_health(&self, player: PlayerId, value: f64) {
        if let Some(fighter) = self.fighters.borrow_mut().get_mut(&player) {
            fighter.max_health = value;
        }
    }

    fn health(&self, player: PlayerId) -> Option<f64> {
        self.fighters.borrow().get(&player).map(|f| f.health)
    }

    fn set_health(&self, player: PlayerId, value: f64) {
        if let Some(fighter) = self.fighters.borrow_mut().get_mut(&player) {
            fighter.health = value;
        }
    }
}

fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {title}");
    println!("{}\n", "=".repeat(60));
}

/// Craft an item by writing stats into its lore, the way the command
/// layer would.
fn craft(engine: &Engine, type_name: &str, desc: &str, stats: &[(StatKind, f64)]) -> EquippedItem {
    let mut lore = vec![desc.to_string()];
    for (kind, value) in stats {
        let result = engine.item_lore().set_stat(&lore, *kind, *value);
        if result.applied != *value {
            println!(
                "  (capped {} {} -> {})",
                kind.display_name_en(),
                value,
                result.applied
            );
        }
        lore = result.lore;
    }
    EquippedItem::new(type_name, lore)
}

fn print_item(item: &EquippedItem) {
    println!("  [{}]", item.type_name);
    for line in &item.lore {
        println!("    {}", strip_color(line));
    }
}

fn print_fighter(arena: &Arena, engine: &Engine, player: PlayerId) {
    let (health, max_health) = arena.hp(player);
    let stats = engine.cached_stats(player);
    println!("  {}: {health:.0}/{max_health:.0} HP", arena.name(player));
    for (kind, value) in stats.total().non_zero() {
        let suffix = if kind.is_percent() { "%" } else { "" };
        println!("    {} {value}{suffix}", kind.display_name_en());
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = match std::env::args().nth(1) {
        Some(path) => load_toml(Path::new(&path)).unwrap_or_else(|err| {
            warn!(%err, "could not load config, using defaults");
            Settings::default()
        }),
        None => Settings::default(),
    };
    let engine = Engine::new(&settings);
    let arena = Arena::default();

    separator("Crafting gear");
    let sword = craft(
        &engine,
        "DIAMOND_SWORD",
        "&7오래된 결투용 검",
        &[
            (StatKind::Attack, 60.0),
            (StatKind::CritChance, 35.0),
            (StatKind::CritDamage, 80.0),
            (StatKind::Lifesteal, 15.0),
        ],
    );
    let helmet = craft(
        &engine,
        "IRON_HELMET",
        "&7단단한 투구",
        &[(StatKind::Health, 20.0), (StatKind::Defense, 10.0)],
    );
    let boots = craft(
        &engine,
        "LEATHER_BOOTS",
        "&7가벼운 부츠",
        &[(StatKind::Dodge, 25.0)],
    );
    print_item(&sword);
    print_item(&helmet);
    print_item(&boots);

    separator("Fighters join");
    let duelist = arena.join(
        "Duelist",
        EquipmentSnapshot::new()
            .with_item(EquipmentSlot::MainHand, sword)
            .with_item(EquipmentSlot::Helmet, helmet),
    );
    let rogue = arena.join(
        "Rogue",
        EquipmentSnapshot::new().with_item(EquipmentSlot::Boots, boots),
    );
    engine.handle_join(duelist, &arena.equipment(duelist), &arena);
    engine.handle_join(rogue, &arena.equipment(rogue), &arena);
    print_fighter(&arena, &engine, duelist);
    print_fighter(&arena, &engine, rogue);

    println!(
        "\n  Duelist total as JSON: {}",
        serde_json::to_string(engine.cached_stats(duelist).total()).unwrap()
    );

    separator("Fight");
    let mut rng = ChaCha8Rng::seed_from_u64(0xA12E);
    let mut round = 0;
    while arena.alive(duelist) && arena.alive(rogue) && round < 50 {
        round += 1;
        let (attacker, victim) = if round % 2 == 1 {
            (duelist, rogue)
        } else {
            (rogue, duelist)
        };

        // the host would read the base damage off its own damage event
        let result = engine.handle_damage_with_rng(attacker, victim, 4.0, &mut rng);
        let outcome = &result.outcome;

        if outcome.dodged {
            println!(
                "  r{round}: {} attacks - {} dodges!",
                arena.name(attacker),
                arena.name(victim)
            );
            continue;
        }

        // side effects are the host's job
        arena.damage(victim, outcome.final_damage);
        if outcome.lifesteal > 0.0 {
            arena.heal(attacker, outcome.lifesteal);
        }

        let crit = if outcome.critical {
            format!(" CRIT +{:.0}!", outcome.critical_bonus)
        } else {
            String::new()
        };
        let (hp, _) = arena.hp(victim);
        println!(
            "  r{round}: {} hits {} for {:.1}{crit} ({} at {hp:.1} HP)",
            arena.name(attacker),
            arena.name(victim),
            outcome.final_damage,
            arena.name(victim),
        );
    }

    let winner = if arena.alive(duelist) { duelist } else { rogue };
    println!("\n  Winner: {}", arena.name(winner));

    separator("Periodic sweep + reload");
    let swept = engine.run_update_sweep(&arena, &arena);
    println!("  swept {swept} players");
    engine.reload(&settings);
    println!("  config reloaded, cache cleared");
    let swept = engine.run_update_sweep(&arena, &arena);
    println!("  swept {swept} players again");

    separator("Metrics");
    println!("  {}", engine.metrics().snapshot());

    engine.handle_quit(duelist, &arena);
    engine.handle_quit(rogue, &arena);
}
