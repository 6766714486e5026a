//! Deciding what exploring a zone turns up.
//!
//! Resolution only reads the player; the caller applies whatever was found.

use rand::seq::SliceRandom;
use rand::Rng;

use super::data::{Discoverable, Zone};
use crate::character::flags::StoryFlag;
use crate::character::player::{DayCycle, LunarPhase, Player};
use crate::character::progression::Skill;
use crate::combat::types::EnemyTemplate;
use crate::core::constants::*;
use crate::registry::Registry;

/// What a single exploration turned up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encounter {
    Combat(&'static str),
    /// An item found at a named spot in the zone.
    Discovery {
        item: &'static str,
        location: &'static str,
    },
    DreamTrigger,
    Nothing,
}

/// Knowledge key marking a zone's discoverable as already found.
pub fn found_key(zone: &str, item: &str) -> String {
    format!("found:{}:{}", zone, item)
}

/// Discoverables of `zone` the player has neither found nor carries.
pub fn hidden_items<'z>(
    zone: &'z Zone,
    player: &Player,
    registry: &Registry,
) -> Vec<&'z Discoverable> {
    zone.discoverables
        .iter()
        .filter(|d| {
            registry.item(d.item).is_some()
                && !player.has_item(d.item)
                && !player.knows(&found_key(zone.id, d.item))
        })
        .collect()
}

/// Base encounter modifier for the time of day and moon.
pub fn encounter_modifier(player: &Player) -> f64 {
    let mut modifier = match player.cycle {
        DayCycle::Day => DAY_ENCOUNTER_MODIFIER,
        DayCycle::Night => NIGHT_ENCOUNTER_MODIFIER,
    };
    if player.lunar_phase == LunarPhase::Full {
        modifier *= FULL_MOON_ENCOUNTER_MULTIPLIER;
    }
    modifier
}

/// Resolves one exploration of `zone`.
pub fn resolve(zone: &Zone, player: &Player, registry: &Registry, rng: &mut impl Rng) -> Encounter {
    let mut modifier = encounter_modifier(player);
    if player.has_skill(Skill::SilentStep) && rng.gen::<f64>() < SILENT_STEP_CHANCE {
        log::debug!("Silent step: no encounters this time");
        modifier = 0.0;
    }

    for (enemy, probability) in &zone.encounters {
        // every entry consumes a roll, even when it cannot fire
        if rng.gen::<f64>() < probability * modifier && registry.enemy(enemy).is_some() {
            return Encounter::Combat(*enemy);
        }
    }

    if !player.inventory_full() {
        if let Some(d) = hidden_items(zone, player, registry).first() {
            return Encounter::Discovery {
                item: d.item,
                location: d.location,
            };
        }
    }

    if rng.gen::<f64>() < BACKGROUND_DREAM_CHANCE {
        return Encounter::DreamTrigger;
    }
    Encounter::Nothing
}

/// Rolls for an outer entity slipping through. Never fires once the veil is torn.
pub fn resolve_entity<'r>(
    player: &Player,
    registry: &'r Registry,
    rng: &mut impl Rng,
) -> Option<&'r EnemyTemplate> {
    if player.has_flag(StoryFlag::VeilTorn) {
        return None;
    }
    if rng.gen::<f64>() >= ENTITY_ENCOUNTER_CHANCE {
        return None;
    }
    let entities: Vec<&EnemyTemplate> = registry.entities().collect();
    entities.choose(rng).copied()
}
