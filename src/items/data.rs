//! Item catalog.

use super::types::{Armor, Consumable, DamageType, Effect, Item, ItemKind, Weapon};
use crate::character::player::Stat;

fn weapon(
    id: &'static str,
    name: &'static str,
    (min_damage, max_damage): (i32, i32),
    damage_type: DamageType,
    durability: Option<u32>,
    (buy_value, sell_value): (i32, i32),
) -> Item {
    Item {
        id,
        name,
        kind: ItemKind::Weapon(Weapon {
            min_damage,
            max_damage,
            damage_type,
            durability,
        }),
        buy_value,
        sell_value,
    }
}

fn armor(
    id: &'static str,
    name: &'static str,
    (defense, resist, speed_modifier): (i32, i32, i32),
    (buy_value, sell_value): (i32, i32),
) -> Item {
    Item {
        id,
        name,
        kind: ItemKind::Armor(Armor {
            defense,
            resist,
            speed_modifier,
            durability: None,
        }),
        buy_value,
        sell_value,
    }
}

fn consumable(
    id: &'static str,
    name: &'static str,
    consumable: Consumable,
    (buy_value, sell_value): (i32, i32),
) -> Item {
    Item {
        id,
        name,
        kind: ItemKind::Consumable(consumable),
        buy_value,
        sell_value,
    }
}

fn plain(id: &'static str, name: &'static str, kind: ItemKind, sell_value: i32) -> Item {
    Item {
        id,
        name,
        kind,
        buy_value: sell_value * 2,
        sell_value,
    }
}

/// The unarmed baseline, equipped whenever no weapon is.
pub fn fists() -> Item {
    weapon("fists", "Bare Fists", (3, 8), DamageType::Physical, None, (0, 0))
}

/// The unarmored baseline.
pub fn unarmored() -> Item {
    armor("unarmored", "No Armor", (0, 0, 0), (0, 0))
}

/// Returns every item template in the game.
pub fn all_items() -> Vec<Item> {
    vec![
        // Weapons
        fists(),
        weapon(
            "dream_dagger",
            "Oneiric Dagger",
            (8, 15),
            DamageType::Oneiric,
            Some(10),
            (80, 32),
        ),
        weapon(
            "dream_sword",
            "Sword of Slumber",
            (15, 25),
            DamageType::Physical,
            Some(10),
            (200, 80),
        ),
        weapon(
            "ngranek_scepter",
            "Scepter of Ngranek",
            (20, 35),
            DamageType::Magical,
            Some(8),
            (300, 120),
        ),
        weapon(
            "moon_blade",
            "Moon Blade",
            (18, 30),
            DamageType::Oneiric,
            Some(12),
            (250, 100),
        ),
        weapon(
            "nodens_staff",
            "Staff of Nodens",
            (25, 45),
            DamageType::Cosmic,
            Some(15),
            (500, 200),
        ),
        // Armor
        unarmored(),
        armor("traveler_clothes", "Traveler's Clothes", (2, 0, 1), (40, 16)),
        armor("mist_cloak", "Cloak of Mist", (5, 3, 2), (120, 48)),
        armor("cat_armor", "Armor of the Cats", (4, 5, 0), (150, 60)),
        armor("sleepwalker_robe", "Sleepwalker's Robe", (3, 8, 0), (220, 88)),
        armor("abyssal_scales", "Abyssal Scales", (8, 4, -1), (300, 120)),
        // Consumables
        consumable(
            "sanity_potion",
            "Sanity Potion",
            Consumable::restoring(&[(Stat::Sanity, 25)]),
            (30, 12),
        ),
        consumable(
            "dream_balm",
            "Oneiric Balm",
            Consumable::restoring(&[(Stat::Health, 30)]),
            (25, 10),
        ),
        consumable(
            "willpower_elixir",
            "Elixir of Will",
            Consumable::restoring(&[(Stat::Willpower, 20)]),
            (35, 14),
        ),
        consumable(
            "cat_bread",
            "Bread of the Cats",
            Consumable::restoring(&[(Stat::Health, 10), (Stat::Sanity, 5)]),
            (15, 6),
        ),
        consumable(
            "sleep_incense",
            "Incense of Somnus",
            Consumable {
                effects: vec![Effect::InduceDream],
                willpower_cost: 0,
            },
            (50, 20),
        ),
        consumable(
            "protection_scroll",
            "Scroll of Warding",
            Consumable {
                effects: vec![Effect::Ward(2)],
                willpower_cost: 15,
            },
            (80, 32),
        ),
        // Story items
        plain("common_stone", "Common Stone", ItemKind::Quest, 0),
        plain("dream_kitten", "Oneiric Kitten", ItemKind::Quest, 0),
        plain("map_fragment", "Map Fragment", ItemKind::Quest, 0),
        plain("ancient_scroll", "Ancient Scroll", ItemKind::Quest, 0),
        plain("dream_crystal", "Dream Crystal", ItemKind::Quest, 0),
        plain("seal_of_zak", "Lunar Seal of Zak", ItemKind::Quest, 0),
        plain("seal_of_oriab", "Lunar Seal of Oriab", ItemKind::Quest, 0),
        plain("seal_of_leng", "Lunar Seal of Leng", ItemKind::Quest, 0),
        plain("catacomb_key", "Catacomb Key", ItemKind::Key, 0),
        plain("ghast_trophy", "Ghast Trophy", ItemKind::Relic, 50),
        plain("nodens_statue", "Statuette of Nodens", ItemKind::Relic, 100),
        plain("sonic_quartz", "Sonic Quartz", ItemKind::Relic, 75),
    ]
}
