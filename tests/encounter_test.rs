use kadath::character::player::{DayCycle, LunarPhase, Player};
use kadath::registry::Registry;
use kadath::zones::{dream_chance, maybe_dream, resolve, Encounter};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn combat_rate(zone_id: &str, player: &Player, seed: u64) -> f64 {
    let registry = Registry::standard();
    let zone = registry.zone(zone_id).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let trials = 4000;
    let fights = (0..trials)
        .filter(|_| matches!(resolve(zone, player, &registry, &mut rng), Encounter::Combat(_)))
        .count();
    fights as f64 / trials as f64
}

#[test]
fn test_peaceful_zones_never_fight() {
    let registry = Registry::standard();
    let player = Player::new(&registry);
    assert_eq!(combat_rate("celephais", &player, 1), 0.0);
    assert_eq!(combat_rate("kadath", &player, 1), 0.0);
}

#[test]
fn test_night_and_full_moon_raise_the_danger() {
    let registry = Registry::standard();
    let mut player = Player::new(&registry);
    let day = combat_rate("zoog_forest", &player, 2);

    player.cycle = DayCycle::Night;
    let night = combat_rate("zoog_forest", &player, 2);

    player.lunar_phase = LunarPhase::Full;
    let full_moon = combat_rate("zoog_forest", &player, 2);

    assert!(day < night, "day {} night {}", day, night);
    assert!(night < full_moon, "night {} full moon {}", night, full_moon);
}

#[test]
fn test_zone_encounters_name_known_enemies() {
    let registry = Registry::standard();
    let mut player = Player::new(&registry);
    player.cycle = DayCycle::Night;
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for zone in registry.zones() {
        for _ in 0..200 {
            if let Encounter::Combat(id) = resolve(zone, &player, &registry, &mut rng) {
                assert!(registry.enemy(id).is_some(), "{} in {}", id, zone.id);
            }
        }
    }
}

#[test]
fn test_starting_stone_is_not_found_twice() {
    let registry = Registry::standard();
    let player = Player::new(&registry);
    let ulthar = registry.zone("ulthar").unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    for _ in 0..200 {
        let found = resolve(ulthar, &player, &registry, &mut rng);
        assert!(!matches!(
            found,
            Encounter::Discovery {
                item: "common_stone",
                ..
            }
        ));
    }
}

#[test]
fn test_full_moon_dreams_more() {
    let registry = Registry::standard();
    let mut player = Player::new(&registry);
    let new_moon = dream_chance(&player);
    player.lunar_phase = LunarPhase::Full;
    assert!(dream_chance(&player) > new_moon);

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let dreams = (0..2000)
        .filter(|_| maybe_dream(&mut player.clone(), &registry, &mut rng).is_some())
        .count();
    let rate = dreams as f64 / 2000.0;
    assert!((rate - dream_chance(&player)).abs() < 0.04, "rate {}", rate);
}
