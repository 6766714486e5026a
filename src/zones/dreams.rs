//! Dream events: triggered while sleeping, travelling or exploring.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::character::flags::StoryFlag;
use crate::character::player::{LunarPhase, Player, Stat};
use crate::core::constants::*;
use crate::registry::Registry;

/// Knowledge gained from a prophetic dream.
pub const PROPHECY_KEY: &str = "prophecy_of_kadath";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DreamKind {
    Prophetic,
    Nightmare,
    Revelation,
    Companion,
}

impl DreamKind {
    pub const ALL: [DreamKind; 4] = [
        DreamKind::Prophetic,
        DreamKind::Nightmare,
        DreamKind::Revelation,
        DreamKind::Companion,
    ];
}

/// What a dream did to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dream {
    Prophetic { sanity_gained: i32 },
    Nightmare { sanity_lost: i32 },
    /// Shows where something in the current zone is hidden, if anything is.
    Revelation {
        hint: Option<(&'static str, &'static str)>,
    },
    CompanionAlly(&'static str),
    CompanionGift(&'static str),
    /// The gift did not fit in the inventory.
    CompanionLost,
}

impl fmt::Display for Dream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dream::Prophetic { sanity_gained } => write!(
                f,
                "You dream of Kadath shining in the distance (+{} sanity)",
                sanity_gained
            ),
            Dream::Nightmare { sanity_lost } => {
                write!(f, "Nyarlathotep laughs in your nightmare (-{} sanity)", sanity_lost)
            }
            Dream::Revelation { hint: Some((item, location)) } => {
                write!(f, "In a dream you glimpse {} {}", item.replace('_', " "), location)
            }
            Dream::Revelation { hint: None } => write!(f, "You dream of empty places"),
            Dream::CompanionAlly(name) => write!(f, "A {} pads out of the dream beside you", name),
            Dream::CompanionGift(name) => write!(f, "You wake holding a {}", name),
            Dream::CompanionLost => write!(f, "Something slips from your full hands as you wake"),
        }
    }
}

/// Probability that a dream opportunity becomes a dream.
pub fn dream_chance(player: &Player) -> f64 {
    let chance = match player.lunar_phase {
        LunarPhase::Full => DREAM_CHANCE_FULL_MOON,
        LunarPhase::New => DREAM_CHANCE_NEW_MOON,
        _ => DREAM_CHANCE_OTHER,
    };
    if player.has_flag(StoryFlag::LucidDreaming) {
        chance * LUCID_DREAM_MULTIPLIER
    } else {
        chance
    }
}

/// Rolls the lunar dream chance and dreams on success.
pub fn maybe_dream(player: &mut Player, registry: &Registry, rng: &mut impl Rng) -> Option<Dream> {
    if rng.gen::<f64>() > dream_chance(player) {
        return None;
    }
    Some(dream(player, registry, rng))
}

/// Dreams unconditionally, picking the kind at random.
pub fn dream(player: &mut Player, registry: &Registry, rng: &mut impl Rng) -> Dream {
    let kind = DreamKind::ALL
        .choose(rng)
        .copied()
        .unwrap_or(DreamKind::Prophetic);
    log::debug!("Dream: {:?}", kind);
    dream_of(kind, player, registry, rng)
}

/// Applies a dream of the given kind.
pub fn dream_of(
    kind: DreamKind,
    player: &mut Player,
    registry: &Registry,
    rng: &mut impl Rng,
) -> Dream {
    match kind {
        DreamKind::Prophetic => {
            player.learn(PROPHECY_KEY);
            let gained = player.modify_stat(Stat::Sanity, 10, rng);
            Dream::Prophetic {
                sanity_gained: gained,
            }
        }
        DreamKind::Nightmare => {
            let loss = rng.gen_range(10..=25);
            let lost = -player.modify_stat(Stat::Sanity, -loss, rng);
            Dream::Nightmare { sanity_lost: lost }
        }
        DreamKind::Revelation => {
            let hint = registry
                .zone(player.zone)
                .and_then(|z| z.discoverables.choose(rng))
                .map(|d| (d.item, d.location));
            Dream::Revelation { hint }
        }
        DreamKind::Companion => {
            if rng.gen::<f64>() < COMPANION_DREAM_ALLY_CHANCE && player.allies.len() < MAX_ALLIES {
                if let Some(name) = registry
                    .ally(SUMMONED_ALLY)
                    .and_then(|t| player.add_ally(t).ok())
                {
                    return Dream::CompanionAlly(name);
                }
            }
            match registry.item("sanity_potion") {
                Some(potion) if player.add_item(potion.clone()) => {
                    Dream::CompanionGift(potion.name)
                }
                _ => Dream::CompanionLost,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_dream_chance_by_moon() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        assert_eq!(dream_chance(&player), 0.1);
        player.lunar_phase = LunarPhase::Waxing;
        assert_eq!(dream_chance(&player), 0.2);
        player.lunar_phase = LunarPhase::Full;
        assert_eq!(dream_chance(&player), 0.4);
        player.set_flag(StoryFlag::LucidDreaming);
        assert!((dream_chance(&player) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_prophetic_dream() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        player.sanity = 50;
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let dream = dream_of(DreamKind::Prophetic, &mut player, &registry, &mut rng);
        assert_eq!(dream, Dream::Prophetic { sanity_gained: 10 });
        assert_eq!(player.sanity, 60);
        assert!(player.knows(PROPHECY_KEY));
    }

    #[test]
    fn test_nightmare_range() {
        let registry = Registry::standard();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..50 {
            let mut player = Player::new(&registry);
            match dream_of(DreamKind::Nightmare, &mut player, &registry, &mut rng) {
                Dream::Nightmare { sanity_lost } => {
                    assert!((10..=25).contains(&sanity_lost));
                    assert_eq!(player.sanity, 100 - sanity_lost);
                }
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_revelation_hints_current_zone() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        player.zone = "zoog_forest";
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let dream = dream_of(DreamKind::Revelation, &mut player, &registry, &mut rng);
        assert_eq!(
            dream,
            Dream::Revelation {
                hint: Some(("dream_kitten", "among the oak roots"))
            }
        );

        player.zone = "kadath";
        let dream = dream_of(DreamKind::Revelation, &mut player, &registry, &mut rng);
        assert_eq!(dream, Dream::Revelation { hint: None });
    }

    #[test]
    fn test_companion_gift_when_allies_full() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        let cat = registry.ally("dream_cat").unwrap();
        player.add_ally(cat).unwrap();
        player.add_ally(cat).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let dream = dream_of(DreamKind::Companion, &mut player, &registry, &mut rng);
        assert_eq!(dream, Dream::CompanionGift("Sanity Potion"));
        assert!(player.has_item("sanity_potion"));
    }
}
