use kadath::character::player::{Player, Stat};
use kadath::core::constants::{GOLD_MAX, INVENTORY_CAPACITY, LEVEL_CAP};
use kadath::error::ActionError;
use kadath::items::purchase;
use kadath::registry::Registry;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_sanity_losses_step_down_and_disorders_follow_tiers() {
    let registry = Registry::standard();
    let mut acquired_at_40 = 0;
    let mut acquired_at_10 = 0;

    for seed in 0..200 {
        let mut player = Player::new(&registry);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        player.modify_stat(Stat::Sanity, -30, &mut rng);
        assert_eq!(player.sanity, 70);
        assert!(player.disorders.is_empty());

        player.modify_stat(Stat::Sanity, -30, &mut rng);
        assert_eq!(player.sanity, 40);
        assert!(player.disorders.len() <= 1);
        acquired_at_40 += player.disorders.len();

        let held = player.disorders.len();
        player.modify_stat(Stat::Sanity, -30, &mut rng);
        assert_eq!(player.sanity, 10);
        assert!(player.disorders.len() <= 2);
        acquired_at_10 += player.disorders.len() - held;
    }

    assert!(acquired_at_40 > 0);
    assert!(acquired_at_10 > 0);
}

#[test]
fn test_sanity_never_drops_below_zero() {
    let registry = Registry::standard();
    let mut player = Player::new(&registry);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    player.sanity = 10;
    let applied = player.modify_stat(Stat::Sanity, -30, &mut rng);
    assert_eq!(player.sanity, 0);
    assert_eq!(applied, -10);
    assert!(player.is_mad());
}

#[test]
fn test_sanity_resistance_scales_losses_only() {
    let registry = Registry::standard();
    let mut player = Player::new(&registry);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    player.sanity_resist_bonus = 0.5;
    player.sanity = 60;
    player.modify_stat(Stat::Sanity, -20, &mut rng);
    assert_eq!(player.sanity, 50);
    player.modify_stat(Stat::Sanity, 20, &mut rng);
    assert_eq!(player.sanity, 70);
}

#[test]
fn test_purchase_rejected_without_enough_gold() {
    let registry = Registry::standard();
    let mut player = Player::new(&registry);
    assert_eq!(player.gold, 20);
    let inventory = player.inventory.clone();

    // sanity potion costs 30
    let result = purchase(&mut player, &registry, "ulthar", 0);
    assert_eq!(
        result,
        Err(ActionError::InsufficientGold {
            cost: 30,
            available: 20
        })
    );
    assert_eq!(player.gold, 20);
    assert_eq!(player.inventory, inventory);
}

#[test]
fn test_purchase_rejected_when_full() {
    let registry = Registry::standard();
    let mut player = Player::new(&registry);
    player.gold = 1000;
    let stone = registry.item("common_stone").unwrap().clone();
    while player.inventory.len() < INVENTORY_CAPACITY {
        player.inventory.push(stone.clone());
    }
    assert_eq!(
        purchase(&mut player, &registry, "ulthar", 0),
        Err(ActionError::InventoryFull)
    );
    assert_eq!(player.gold, 1000);
}

#[test]
fn test_purchase_succeeds() {
    let registry = Registry::standard();
    let mut player = Player::new(&registry);
    player.gold = 100;
    assert_eq!(
        purchase(&mut player, &registry, "ulthar", 0),
        Ok("Sanity Potion")
    );
    assert_eq!(player.gold, 70);
    assert!(player.has_item("sanity_potion"));
}

fn any_stat() -> impl Strategy<Value = Stat> {
    prop_oneof![
        Just(Stat::Health),
        Just(Stat::Sanity),
        Just(Stat::Willpower),
        Just(Stat::Gold),
        Just(Stat::Reputation),
    ]
}

proptest! {
    #[test]
    fn prop_resources_stay_in_range(
        changes in prop::collection::vec((any_stat(), -500i32..500), 0..60),
        seed in any::<u64>(),
    ) {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for (stat, delta) in changes {
            player.modify_stat(stat, delta, &mut rng);
            prop_assert!((0..=player.health_max).contains(&player.health));
            prop_assert!((0..=player.sanity_max).contains(&player.sanity));
            prop_assert!((0..=player.willpower_max).contains(&player.willpower));
            prop_assert!((0..=GOLD_MAX).contains(&player.gold));
            prop_assert!((-100..=100).contains(&player.reputation));
        }
    }

    #[test]
    fn prop_inventory_never_exceeds_capacity(adds in 0usize..40) {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        let potion = registry.item("sanity_potion").unwrap().clone();
        for _ in 0..adds {
            let had = player.inventory.len();
            let added = player.add_item(potion.clone());
            prop_assert_eq!(added, had < INVENTORY_CAPACITY);
            prop_assert!(player.inventory.len() <= INVENTORY_CAPACITY);
        }
    }

    #[test]
    fn prop_level_is_monotonic(gains in prop::collection::vec(0u32..800, 0..30)) {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        let mut last = player.level;
        for amount in gains {
            player.gain_experience(amount);
            while let Some(up) = player.level_up() {
                prop_assert_eq!(up.level, last + 1);
                last = up.level;
            }
            prop_assert!(player.level >= 1 && player.level <= LEVEL_CAP);
            prop_assert!(!player.can_level_up());
        }
    }
}
