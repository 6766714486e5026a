//! Enemy, cosmic entity and ally rosters.

use super::types::{AllyTemplate, EnemyTemplate};
use crate::items::DamageType;

#[allow(clippy::too_many_arguments)]
fn enemy(
    id: &'static str,
    name: &'static str,
    max_health: i32,
    (min_damage, max_damage): (i32, i32),
    damage_type: DamageType,
    defense: i32,
    speed: i32,
    xp: u32,
    gold: (i32, i32),
    loot: Vec<(&'static str, f64)>,
    sanity_damage: i32,
) -> EnemyTemplate {
    EnemyTemplate {
        id,
        name,
        max_health,
        min_damage,
        max_damage,
        damage_type,
        defense,
        speed,
        xp,
        gold,
        loot,
        boss: false,
        cosmic: false,
        combative: true,
        sanity_damage,
    }
}

fn boss(template: EnemyTemplate) -> EnemyTemplate {
    EnemyTemplate {
        boss: true,
        ..template
    }
}

/// Returns every regular enemy, bosses included.
pub fn all_enemies() -> Vec<EnemyTemplate> {
    use DamageType::*;
    vec![
        enemy(
            "zoog",
            "Zoog",
            10,
            (3, 8),
            Physical,
            0,
            15,
            22,
            (2, 8),
            vec![("cat_bread", 0.3)],
            2,
        ),
        enemy(
            "ghoul",
            "Ghoul",
            35,
            (8, 15),
            Physical,
            2,
            8,
            47,
            (5, 15),
            vec![("ghast_trophy", 0.4)],
            5,
        ),
        enemy(
            "ghast",
            "Ghast",
            60,
            (15, 25),
            Physical,
            5,
            18,
            82,
            (10, 25),
            vec![("ghast_trophy", 0.6)],
            8,
        ),
        enemy(
            "faceless_priest",
            "Faceless Priest",
            45,
            (10, 20),
            Oneiric,
            8,
            10,
            102,
            (20, 40),
            vec![("ancient_scroll", 0.3), ("map_fragment", 0.2)],
            15,
        ),
        enemy(
            "nightgaunt",
            "Nightgaunt",
            40,
            (12, 22),
            Oneiric,
            4,
            16,
            88,
            (8, 20),
            vec![("map_fragment", 0.25)],
            12,
        ),
        boss(enemy(
            "leng_guardian",
            "Guardian of Leng",
            150,
            (25, 40),
            Physical,
            10,
            12,
            252,
            (80, 120),
            vec![("nodens_staff", 0.5)],
            25,
        )),
        enemy(
            "shantak",
            "Shantak",
            80,
            (20, 35),
            Physical,
            6,
            20,
            150,
            (30, 60),
            vec![("map_fragment", 0.3)],
            10,
        ),
        enemy(
            "elder_ghoul",
            "Elder Ghoul",
            70,
            (18, 30),
            Physical,
            8,
            14,
            120,
            (25, 50),
            vec![("ancient_scroll", 0.5)],
            10,
        ),
        boss(enemy(
            "gnophkeh",
            "Gnoph-keh",
            100,
            (22, 38),
            Physical,
            12,
            10,
            200,
            (40, 80),
            vec![("abyssal_scales", 0.4)],
            20,
        )),
        enemy(
            "leng_sorcerer",
            "Sorcerer of Leng",
            80,
            (20, 35),
            Magical,
            6,
            14,
            150,
            (40, 80),
            vec![("ancient_scroll", 0.5)],
            10,
        ),
    ]
}

/// Outer entities that may surface anywhere in the Dreamlands.
pub fn all_entities() -> Vec<EnemyTemplate> {
    vec![
        EnemyTemplate {
            boss: true,
            cosmic: true,
            ..enemy(
                "nyarlathotep",
                "Nyarlathotep",
                200,
                (30, 60),
                DamageType::Cosmic,
                15,
                25,
                500,
                (0, 0),
                vec![],
                50,
            )
        },
        EnemyTemplate {
            cosmic: true,
            combative: false,
            ..enemy(
                "nodens",
                "Nodens, Lord of the Great Abyss",
                999,
                (0, 0),
                DamageType::Cosmic,
                0,
                10,
                0,
                (0, 0),
                vec![],
                0,
            )
        },
        EnemyTemplate {
            cosmic: true,
            combative: false,
            ..enemy(
                "hastur",
                "Hastur, the Unspeakable",
                999,
                (60, 120),
                DamageType::Cosmic,
                0,
                10,
                0,
                (0, 0),
                vec![],
                30,
            )
        },
    ]
}

pub fn all_allies() -> Vec<AllyTemplate> {
    vec![
        AllyTemplate {
            id: "dream_cat",
            name: "Oneiric Cat",
            max_health: 30,
            min_damage: 5,
            max_damage: 12,
            defense: 2,
        },
        AllyTemplate {
            id: "friendly_zoog",
            name: "Friendly Zoog",
            max_health: 20,
            min_damage: 4,
            max_damage: 10,
            defense: 1,
        },
        AllyTemplate {
            id: "tame_ghoul",
            name: "Tame Ghoul",
            max_health: 50,
            min_damage: 8,
            max_damage: 18,
            defense: 4,
        },
    ]
}
