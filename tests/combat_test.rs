use kadath::character::player::Player;
use kadath::combat::logic::CombatEngine;
use kadath::combat::types::{CombatAction, CombatEvent, CombatOutcome, EnemyTemplate};
use kadath::items::DamageType;
use kadath::registry::Registry;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn brute(health: i32, (min_damage, max_damage): (i32, i32)) -> EnemyTemplate {
    EnemyTemplate {
        id: "brute",
        name: "Brute",
        max_health: health,
        min_damage,
        max_damage,
        damage_type: DamageType::Physical,
        defense: 0,
        speed: 10,
        xp: 5,
        gold: (1, 3),
        loot: vec![],
        boss: false,
        cosmic: false,
        combative: true,
        sanity_damage: 0,
    }
}

#[test]
fn test_fatal_hit_clamps_health_and_reports_death() {
    let registry = Registry::standard();
    let mut player = Player::new(&registry);
    player.health = 10;
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    // fists cannot fell the brute in one blow, so the enemy always answers
    let (mut engine, _) = CombatEngine::start(&brute(500, (15, 15)), &mut player, &mut rng);
    let events = engine.round(CombatAction::Attack, &mut player, &registry, &mut rng);

    assert_eq!(player.health, 0);
    assert_eq!(engine.outcome(), Some(CombatOutcome::Death));
    assert_eq!(events.last(), Some(&CombatEvent::Outcome(CombatOutcome::Death)));
}

#[test]
fn test_seeded_fights_are_identical() {
    let registry = Registry::standard();
    let template = brute(60, (4, 9));
    let actions = [
        CombatAction::Attack,
        CombatAction::Dodge,
        CombatAction::Attack,
        CombatAction::Attack,
        CombatAction::Attack,
        CombatAction::Attack,
        CombatAction::Attack,
        CombatAction::Attack,
        CombatAction::Attack,
        CombatAction::Attack,
        CombatAction::Attack,
        CombatAction::Attack,
    ];

    let fight = || {
        let mut player = Player::new(&registry);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let report = CombatEngine::run(&template, &mut player, &registry, actions, &mut rng);
        (report, player.health)
    };
    let (first, health_a) = fight();
    let (second, health_b) = fight();

    assert_eq!(first, second);
    assert_eq!(health_a, health_b);
    assert!(first
        .events
        .iter()
        .any(|e| matches!(e, CombatEvent::PlayerAttack { .. })));
}

#[test]
fn test_loot_entries_roll_independently() {
    let registry = Registry::standard();
    let mut template = brute(1, (1, 1));
    template.loot = vec![("sanity_potion", 0.4), ("dream_balm", 0.6)];
    let potion = registry.item("sanity_potion").unwrap().name;
    let balm = registry.item("dream_balm").unwrap().name;

    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let trials = 4000;
    let (mut potions, mut balms, mut both) = (0, 0, 0);
    for _ in 0..trials {
        let mut player = Player::new(&registry);
        let report = CombatEngine::run(
            &template,
            &mut player,
            &registry,
            [CombatAction::Attack],
            &mut rng,
        );
        assert_eq!(report.outcome, Some(CombatOutcome::Victory));
        let loot = report
            .events
            .iter()
            .find_map(|e| match e {
                CombatEvent::Victory { loot, .. } => Some(loot.clone()),
                _ => None,
            })
            .unwrap();
        let got_potion = loot.contains(&potion);
        let got_balm = loot.contains(&balm);
        potions += got_potion as u32;
        balms += got_balm as u32;
        both += (got_potion && got_balm) as u32;
    }

    let rate = |n: u32| n as f64 / trials as f64;
    assert!((rate(potions) - 0.4).abs() < 0.03, "potion rate {}", rate(potions));
    assert!((rate(balms) - 0.6).abs() < 0.03, "balm rate {}", rate(balms));
    // independent draws: both drop about 0.4 * 0.6 of the time
    assert!((rate(both) - 0.24).abs() < 0.03, "joint rate {}", rate(both));
}

#[test]
fn test_weapon_wears_out_over_a_fight() {
    let registry = Registry::standard();
    let mut player = Player::new(&registry);
    let mut dagger = registry.item("dream_dagger").unwrap().clone();
    dagger.set_durability(Some(3));
    player.weapon = dagger;
    player.health = 100;
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let report = CombatEngine::run(
        &brute(1000, (1, 1)),
        &mut player,
        &registry,
        [CombatAction::Attack; 4],
        &mut rng,
    );

    assert!(report
        .events
        .iter()
        .any(|e| matches!(e, CombatEvent::WeaponBroke { .. })));
    assert_eq!(player.weapon.id, "fists");
}

#[test]
fn test_flight_eventually_succeeds_and_keeps_the_player_alive() {
    let registry = Registry::standard();
    let mut player = Player::new(&registry);
    player.health_max = 10_000;
    player.health = 10_000;
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    let report = CombatEngine::run(
        &brute(1000, (1, 2)),
        &mut player,
        &registry,
        [CombatAction::Flee; 40],
        &mut rng,
    );

    assert_eq!(report.outcome, Some(CombatOutcome::Flight));
    assert!(player.health > 0);
    assert!(player.statuses.is_empty());
}

#[test]
fn test_victory_pays_out_and_records_the_kill() {
    let registry = Registry::standard();
    let mut player = Player::new(&registry);
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let report = CombatEngine::run(
        &brute(1, (1, 1)),
        &mut player,
        &registry,
        [CombatAction::Attack],
        &mut rng,
    );

    assert_eq!(report.outcome, Some(CombatOutcome::Victory));
    assert_eq!(player.experience, 5);
    assert!((21..=23).contains(&player.gold));
    assert_eq!(player.bestiary.get("brute"), Some(&1));
    assert_eq!(player.enemies_slain, 1);
}
