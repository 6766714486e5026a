//! Player snapshots: the persisted JSON document and its conversion to and
//! from a live [`Player`].
//!
//! Loading is forgiving about content and strict about shape. Ids missing
//! from the registry are dropped, optional fields fall back to defaults, and
//! a version mismatch only logs a warning. A document that does not parse
//! into the expected structure is rejected as a whole.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::disorders::Disorder;
use super::flags::StoryFlag;
use super::player::{DayCycle, LunarPhase, Player};
use super::progression::Skill;
use super::spells::Spell;
use crate::achievements::AchievementId;
use crate::combat::types::Ally;
use crate::core::constants::*;
use crate::error::LoadError;
use crate::items::{fists, unarmored, Item, ItemKind};
use crate::registry::Registry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: String,
    pub timestamp: String,
    pub player: PlayerRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub health: i32,
    pub health_max: i32,
    pub sanity: i32,
    pub sanity_max: i32,
    pub willpower: i32,
    pub willpower_max: i32,
    pub base_speed: i32,
    pub reputation: i32,
    pub gold: i32,
    pub level: u32,
    pub experience: u32,
    pub damage_bonus: f64,
    pub resist_bonus: f64,
    pub sanity_resist_bonus: f64,
    pub weapon_id: String,
    pub armor_id: String,
    pub inventory: Vec<String>,
    pub skills: Vec<String>,
    pub flags: BTreeMap<String, bool>,
    pub map_fragments: u32,
    pub death_count: u32,
    pub active_quest_ids: Vec<String>,
    pub completed_quest_ids: Vec<String>,
    pub achievements: Vec<String>,
    pub bestiary: BTreeMap<String, u32>,
    pub zone: String,
    pub visited_zones: Vec<String>,
    pub rest_count_in_zone: u32,
    pub day_night_cycle: String,
    pub turn_counter: u64,

    // Optional
    #[serde(default)]
    pub allies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ally_health: Vec<i32>,
    #[serde(default)]
    pub spells: Vec<String>,
    #[serde(default)]
    pub knowledge: BTreeMap<String, bool>,
    #[serde(default)]
    pub disorders: Vec<String>,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub decisions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon_durability: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor_durability: Option<u32>,
    /// Durability per inventory entry, parallel to `inventory`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inventory_durability: Vec<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunar_phase: Option<String>,
    #[serde(default)]
    pub new_game_plus: bool,
    #[serde(default)]
    pub runs_completed: u32,
    #[serde(default)]
    pub enemies_slain: u32,
}

/// Captures everything needed to rebuild `player`.
///
/// Combat statuses are not captured; they only exist inside a fight.
pub fn serialize(player: &Player) -> Snapshot {
    let inventory_durability: Vec<Option<u32>> =
        player.inventory.iter().map(Item::durability).collect();
    let record = PlayerRecord {
        health: player.health,
        health_max: player.health_max,
        sanity: player.sanity,
        sanity_max: player.sanity_max,
        willpower: player.willpower,
        willpower_max: player.willpower_max,
        base_speed: player.base_speed,
        reputation: player.reputation,
        gold: player.gold,
        level: player.level,
        experience: player.experience,
        damage_bonus: player.damage_bonus,
        resist_bonus: player.resist_bonus,
        sanity_resist_bonus: player.sanity_resist_bonus,
        weapon_id: player.weapon.id.to_string(),
        armor_id: player.armor.id.to_string(),
        inventory: player.inventory.iter().map(|i| i.id.to_string()).collect(),
        skills: player.skills.iter().map(|s| s.id().to_string()).collect(),
        flags: StoryFlag::ALL
            .iter()
            .map(|f| (f.id().to_string(), player.has_flag(*f)))
            .collect(),
        map_fragments: player.map_fragments,
        death_count: player.death_count,
        active_quest_ids: player.active_quests.iter().map(|q| q.to_string()).collect(),
        completed_quest_ids: player
            .completed_quests
            .iter()
            .map(|q| q.to_string())
            .collect(),
        achievements: player
            .achievements
            .iter()
            .map(|a| a.id().to_string())
            .collect(),
        bestiary: player
            .bestiary
            .iter()
            .map(|(id, count)| (id.to_string(), *count))
            .collect(),
        zone: player.zone.to_string(),
        visited_zones: player.visited_zones.iter().map(|z| z.to_string()).collect(),
        rest_count_in_zone: player.rest_count,
        day_night_cycle: player.cycle.id().to_string(),
        turn_counter: player.turn,
        allies: player.allies.iter().map(|a| a.id.to_string()).collect(),
        ally_health: player.allies.iter().map(|a| a.health).collect(),
        spells: player.spells.iter().map(|s| s.id().to_string()).collect(),
        knowledge: player.knowledge.clone(),
        disorders: player.disorders.iter().map(|d| d.id().to_string()).collect(),
        events: player.events.clone(),
        decisions: player.decisions.clone(),
        weapon_durability: player.weapon.durability(),
        armor_durability: player.armor.durability(),
        inventory_durability: if inventory_durability.iter().all(Option::is_none) {
            Vec::new()
        } else {
            inventory_durability
        },
        lunar_phase: Some(player.lunar_phase.id().to_string()),
        new_game_plus: player.new_game_plus,
        runs_completed: player.runs_completed,
        enemies_slain: player.enemies_slain,
    };
    Snapshot {
        version: SAVE_VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        player: record,
    }
}

pub fn to_json(snapshot: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}

/// Parses a snapshot document and rebuilds the player from it.
pub fn from_json(json: &str, registry: &Registry) -> Result<Player, LoadError> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    deserialize(&snapshot, registry)
}

/// Rebuilds a player from a snapshot, dropping ids the registry does not know.
pub fn deserialize(snapshot: &Snapshot, registry: &Registry) -> Result<Player, LoadError> {
    if snapshot.version != SAVE_VERSION {
        log::warn!(
            "Save version {} differs from {}, loading anyway",
            snapshot.version,
            SAVE_VERSION
        );
    }
    let r = &snapshot.player;
    for (name, max) in [
        ("healthMax", r.health_max),
        ("sanityMax", r.sanity_max),
        ("willpowerMax", r.willpower_max),
    ] {
        if max <= 0 {
            return Err(LoadError::Invalid(format!("{} must be positive", name)));
        }
    }

    let mut player = Player::new(registry);
    player.health_max = r.health_max;
    player.health = r.health.clamp(0, r.health_max);
    player.sanity_max = r.sanity_max;
    player.sanity = r.sanity.clamp(0, r.sanity_max);
    player.willpower_max = r.willpower_max;
    player.willpower = r.willpower.clamp(0, r.willpower_max);
    player.base_speed = r.base_speed;
    player.reputation = r.reputation.clamp(REPUTATION_MIN, REPUTATION_MAX);
    player.gold = r.gold.clamp(0, GOLD_MAX);
    player.level = r.level.clamp(1, LEVEL_CAP);
    player.experience = r.experience;
    player.damage_bonus = r.damage_bonus;
    player.resist_bonus = r.resist_bonus;
    player.sanity_resist_bonus = r.sanity_resist_bonus;

    player.weapon = equipment(registry, &r.weapon_id, r.weapon_durability, true)
        .unwrap_or_else(fists);
    player.armor = equipment(registry, &r.armor_id, r.armor_durability, false)
        .unwrap_or_else(unarmored);

    player.inventory = r
        .inventory
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            let mut item = registry.item(id)?.clone();
            if let Some(Some(durability)) = r.inventory_durability.get(i) {
                restore_durability(&mut item, *durability);
            }
            Some(item)
        })
        .take(INVENTORY_CAPACITY)
        .collect();

    player.skills = r.skills.iter().filter_map(|s| Skill::from_id(s)).collect();
    // Skills always carry their rituals, even in saves that predate them.
    player.spells = r
        .spells
        .iter()
        .filter_map(|s| Spell::from_id(s))
        .chain(player.skills.iter().filter_map(Skill::grants_spell))
        .collect();
    player.allies = r
        .allies
        .iter()
        .enumerate()
        .filter_map(|(i, id)| {
            let mut ally = Ally::from_template(registry.ally(id)?);
            if let Some(health) = r.ally_health.get(i) {
                ally.health = (*health).clamp(1, ally.max_health);
            }
            Some(ally)
        })
        .take(MAX_ALLIES)
        .collect();
    player.flags = r
        .flags
        .iter()
        .filter(|(_, set)| **set)
        .filter_map(|(id, _)| StoryFlag::from_id(id))
        .collect();
    player.map_fragments = r.map_fragments;
    player.death_count = r.death_count;

    for id in &r.completed_quest_ids {
        if let Some(quest) = registry.quest(id) {
            if !player.completed_quests.contains(&quest.id) {
                player.completed_quests.push(quest.id);
            }
        }
    }
    for id in &r.active_quest_ids {
        if let Some(quest) = registry.quest(id) {
            let known = player.completed_quests.contains(&quest.id)
                || player.active_quests.contains(&quest.id);
            if !known {
                player.active_quests.push(quest.id);
            }
        }
    }

    for id in &r.achievements {
        if let Some(a) = AchievementId::from_id(id) {
            if !player.achievements.contains(&a) {
                player.achievements.push(a);
            }
        }
    }
    player.bestiary = r
        .bestiary
        .iter()
        .filter_map(|(id, count)| registry.enemy(id).map(|e| (e.id, *count)))
        .collect();
    player.knowledge = r.knowledge.clone();

    player.zone = registry.zone(&r.zone).map_or(START_ZONE, |z| z.id);
    player.visited_zones = Vec::new();
    for id in &r.visited_zones {
        if let Some(zone) = registry.zone(id) {
            if !player.visited_zones.contains(&zone.id) {
                player.visited_zones.push(zone.id);
            }
        }
    }
    if !player.visited_zones.contains(&player.zone) {
        player.visited_zones.push(player.zone);
    }
    player.rest_count = r.rest_count_in_zone;
    player.cycle = DayCycle::from_id(&r.day_night_cycle).unwrap_or(DayCycle::Day);
    player.turn = r.turn_counter;
    player.lunar_phase = r
        .lunar_phase
        .as_deref()
        .and_then(LunarPhase::from_id)
        .unwrap_or(LunarPhase::New);

    player.disorders = Vec::new();
    for id in &r.disorders {
        if let Some(d) = Disorder::from_id(id) {
            if !player.disorders.contains(&d) && player.disorders.len() < DISORDER_SEVERE_CAP {
                player.disorders.push(d);
            }
        }
    }
    player.events = r.events.clone();
    player.decisions = r.decisions.clone();
    player.new_game_plus = r.new_game_plus;
    player.runs_completed = r.runs_completed;
    player.enemies_slain = r.enemies_slain;

    Ok(player)
}

fn equipment(
    registry: &Registry,
    id: &str,
    durability: Option<u32>,
    weapon: bool,
) -> Option<Item> {
    let mut item = registry.item(id)?.clone();
    let fits = match item.kind {
        ItemKind::Weapon(_) => weapon,
        ItemKind::Armor(_) => !weapon,
        _ => false,
    };
    if !fits {
        return None;
    }
    if let Some(d) = durability {
        restore_durability(&mut item, d);
    }
    Some(item)
}

/// Applies a saved durability to a freshly cloned template. Spent or
/// unbreakable items are left at the template value.
fn restore_durability(item: &mut Item, durability: u32) {
    if item.durability().is_some() && durability > 0 {
        item.set_durability(Some(durability));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::player::Status;

    #[test]
    fn test_fresh_player_roundtrip() {
        let registry = Registry::standard();
        let player = Player::new(&registry);
        let restored = deserialize(&serialize(&player), &registry).unwrap();
        assert_eq!(restored, player);
    }

    #[test]
    fn test_json_uses_camel_case_fields() {
        let registry = Registry::standard();
        let json = to_json(&serialize(&Player::new(&registry))).unwrap();
        for field in [
            "\"healthMax\"",
            "\"weaponId\"",
            "\"activeQuestIds\"",
            "\"restCountInZone\"",
            "\"dayNightCycle\"",
            "\"turnCounter\"",
            "\"sanityResistBonus\"",
        ] {
            assert!(json.contains(field), "missing {}", field);
        }
        assert!(json.contains("\"DAY\""));
    }

    #[test]
    fn test_spells_roundtrip_and_follow_skills() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        player.learn_spell(Spell::InvokeNodens);
        let restored = deserialize(&serialize(&player), &registry).unwrap();
        assert_eq!(restored.spells, player.spells);

        let mut snapshot = serialize(&player);
        snapshot.player.spells = vec!["speak_with_dead".to_string()];
        snapshot.player.skills = vec!["greater_ritual".to_string()];
        let restored = deserialize(&snapshot, &registry).unwrap();
        assert!(restored.knows_spell(Spell::EtherealForm));
        assert!(!restored.knows_spell(Spell::InvokeNodens));
    }

    #[test]
    fn test_statuses_are_not_persisted() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        player.statuses.insert(Status::Warded, 2);
        let restored = deserialize(&serialize(&player), &registry).unwrap();
        assert!(restored.statuses.is_empty());
    }

    #[test]
    fn test_wrong_slot_equipment_falls_back() {
        let registry = Registry::standard();
        let mut snapshot = serialize(&Player::new(&registry));
        snapshot.player.weapon_id = "mist_cloak".to_string();
        snapshot.player.armor_id = "dream_sword".to_string();
        let player = deserialize(&snapshot, &registry).unwrap();
        assert_eq!(player.weapon.id, "fists");
        assert_eq!(player.armor.id, "unarmored");
    }

    #[test]
    fn test_non_positive_max_is_invalid() {
        let registry = Registry::standard();
        let mut snapshot = serialize(&Player::new(&registry));
        snapshot.player.health_max = 0;
        assert!(matches!(
            deserialize(&snapshot, &registry),
            Err(LoadError::Invalid(_))
        ));
    }
}
