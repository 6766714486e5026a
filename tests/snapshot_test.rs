use kadath::achievements::AchievementId;
use kadath::character::disorders::Disorder;
use kadath::character::flags::StoryFlag;
use kadath::character::player::{DayCycle, LunarPhase, Player};
use kadath::character::progression::Skill;
use kadath::character::save::{deserialize, from_json, serialize, to_json};
use kadath::character::spells::Spell;
use kadath::core::constants::SAVE_VERSION;
use kadath::error::LoadError;
use kadath::registry::Registry;
use serde_json::{json, Value};

fn seasoned_player(registry: &Registry) -> Player {
    let mut player = Player::new(registry);
    player.health = 55;
    player.sanity = 42;
    player.gold = 314;
    player.level = 3;
    player.experience = 260;
    player.damage_bonus = 0.1;
    player.weapon = registry.item("dream_dagger").unwrap().clone();
    player.weapon.set_durability(Some(4));
    player.add_item(registry.item("moon_blade").unwrap().clone());
    player.inventory[1].set_durability(Some(7));
    player.add_item(registry.item("sanity_potion").unwrap().clone());
    player.skills.insert(Skill::MinorSpell);
    player.learn_spell(Spell::OpenPortal);
    player.add_ally(registry.ally("dream_cat").unwrap()).unwrap();
    player.allies[0].health = 3;
    player.set_flag(StoryFlag::CatsAllied);
    player.map_fragments = 2;
    player.active_quests.push(registry.quests()[0].id);
    player.achievements.push(AchievementId::FirstBlood);
    player.bestiary.insert("zoog", 4);
    player.learn("found:ulthar:common_stone");
    player.zone = "zoog_forest";
    player.visited_zones.push("zoog_forest");
    player.cycle = DayCycle::Night;
    player.lunar_phase = LunarPhase::Full;
    player.turn = 77;
    player.disorders.push(Disorder::Paranoia);
    player.events.push("met a zoog".to_string());
    player
}

fn record_json(player: &Player) -> Value {
    serde_json::to_value(serialize(player)).unwrap()
}

#[test]
fn test_roundtrip_preserves_the_player() {
    let registry = Registry::standard();
    let player = seasoned_player(&registry);
    let json = to_json(&serialize(&player)).unwrap();
    let loaded = from_json(&json, &registry).unwrap();
    assert_eq!(loaded, player);
}

#[test]
fn test_snapshot_carries_version_and_timestamp() {
    let registry = Registry::standard();
    let snapshot = serialize(&Player::new(&registry));
    assert_eq!(snapshot.version, SAVE_VERSION);
    assert!(chrono::DateTime::parse_from_rfc3339(&snapshot.timestamp).is_ok());
}

#[test]
fn test_unknown_ids_are_dropped() {
    let registry = Registry::standard();
    let mut doc = record_json(&seasoned_player(&registry));
    let record = &mut doc["player"];
    record["inventory"] = json!(["sanity_potion", "cursed_teapot", "dream_balm"]);
    record["inventoryDurability"] = json!([]);
    record["skills"] = json!(["minor_spell", "flight"]);
    record["bestiary"] = json!({"zoog": 2, "snark": 9});
    record["activeQuestIds"] = json!(["no_such_quest"]);
    record["achievements"] = json!(["first_blood", "world_peace"]);
    record["zone"] = json!("atlantis");
    record["weaponId"] = json!("laser_sword");
    record["allies"] = json!(["dream_cat", "pet_rock"]);
    record["allyHealth"] = json!([]);

    let player = from_json(&doc.to_string(), &registry).unwrap();
    let ids: Vec<&str> = player.inventory.iter().map(|i| i.id).collect();
    assert_eq!(ids, ["sanity_potion", "dream_balm"]);
    assert!(player.has_skill(Skill::MinorSpell));
    assert_eq!(player.skills.len(), 1);
    assert_eq!(player.bestiary.len(), 1);
    assert!(player.active_quests.is_empty());
    assert_eq!(player.achievements, [AchievementId::FirstBlood]);
    assert_eq!(player.zone, "ulthar");
    assert_eq!(player.weapon.id, "fists");
    assert_eq!(player.allies.len(), 1);
}

#[test]
fn test_missing_optional_fields_take_defaults() {
    let registry = Registry::standard();
    let mut doc = record_json(&seasoned_player(&registry));
    let record = doc["player"].as_object_mut().unwrap();
    for key in [
        "allies",
        "allyHealth",
        "spells",
        "knowledge",
        "disorders",
        "events",
        "decisions",
        "weaponDurability",
        "armorDurability",
        "inventoryDurability",
        "lunarPhase",
        "newGamePlus",
        "runsCompleted",
        "enemiesSlain",
    ] {
        record.remove(key);
    }

    let player = from_json(&doc.to_string(), &registry).unwrap();
    assert!(player.allies.is_empty());
    assert!(player.knowledge.is_empty());
    assert!(player.spells.is_empty());
    assert!(player.disorders.is_empty());
    assert_eq!(player.lunar_phase, LunarPhase::New);
    assert!(!player.new_game_plus);
    assert_eq!(player.gold, 314);
    // without a stored count the catalog durability applies
    let catalog = registry.item("dream_dagger").unwrap().durability();
    assert_eq!(player.weapon.durability(), catalog);
}

#[test]
fn test_invalid_json_is_rejected() {
    let registry = Registry::standard();
    assert!(matches!(
        from_json("{ not json", &registry),
        Err(LoadError::Parse(_))
    ));
}

#[test]
fn test_missing_required_field_is_rejected() {
    let registry = Registry::standard();
    let mut doc = record_json(&Player::new(&registry));
    doc["player"].as_object_mut().unwrap().remove("gold");
    assert!(matches!(
        from_json(&doc.to_string(), &registry),
        Err(LoadError::Parse(_))
    ));
}

#[test]
fn test_version_mismatch_still_loads() {
    let registry = Registry::standard();
    let player = seasoned_player(&registry);
    let mut snapshot = serialize(&player);
    snapshot.version = "0.9".to_string();
    let loaded = deserialize(&snapshot, &registry).unwrap();
    assert_eq!(loaded.gold, 314);
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let registry = Registry::standard();
    let mut snapshot = serialize(&Player::new(&registry));
    snapshot.player.health = 500;
    snapshot.player.sanity = -20;
    snapshot.player.gold = 1_000_000;
    let player = deserialize(&snapshot, &registry).unwrap();
    assert_eq!(player.health, player.health_max);
    assert_eq!(player.sanity, 0);
    assert_eq!(player.gold, 9999);
}
