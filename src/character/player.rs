//! The player: resources, inventory, equipment and story state.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;

use super::disorders::{self, Disorder};
use super::flags::StoryFlag;
use super::progression::Skill;
use super::spells::Spell;
use crate::achievements::AchievementId;
use crate::combat::types::{Ally, AllyTemplate};
use crate::core::constants::*;
use crate::error::ActionError;
use crate::items::{fists, unarmored, Effect, Item, ItemKind};
use crate::registry::Registry;

/// Resources that go through the clamped mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Health,
    Sanity,
    Willpower,
    Gold,
    Reputation,
}

impl Stat {
    pub fn name(&self) -> &'static str {
        match self {
            Stat::Health => "health",
            Stat::Sanity => "sanity",
            Stat::Willpower => "willpower",
            Stat::Gold => "gold",
            Stat::Reputation => "reputation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCycle {
    Day,
    Night,
}

impl DayCycle {
    pub fn toggled(self) -> Self {
        match self {
            DayCycle::Day => DayCycle::Night,
            DayCycle::Night => DayCycle::Day,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            DayCycle::Day => "DAY",
            DayCycle::Night => "NIGHT",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "DAY" => Some(DayCycle::Day),
            "NIGHT" => Some(DayCycle::Night),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LunarPhase {
    New,
    Waxing,
    Full,
    Waning,
}

impl LunarPhase {
    pub const ALL: [LunarPhase; 4] = [
        LunarPhase::New,
        LunarPhase::Waxing,
        LunarPhase::Full,
        LunarPhase::Waning,
    ];

    pub fn next(self) -> Self {
        match self {
            LunarPhase::New => LunarPhase::Waxing,
            LunarPhase::Waxing => LunarPhase::Full,
            LunarPhase::Full => LunarPhase::Waning,
            LunarPhase::Waning => LunarPhase::New,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            LunarPhase::New => "NEW",
            LunarPhase::Waxing => "WAXING",
            LunarPhase::Full => "FULL",
            LunarPhase::Waning => "WANING",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }
}

/// Short-lived combat statuses, keyed to the number of enemy turns left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    /// Next enemy attack may miss.
    Evading,
    /// Enemy attacks are negated.
    Warded,
}

/// Result of using a consumable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedItem {
    pub name: &'static str,
    pub induces_dream: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
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
    pub weapon: Item,
    pub armor: Item,
    pub inventory: Vec<Item>,
    pub skills: BTreeSet<Skill>,
    pub spells: BTreeSet<Spell>,
    pub allies: Vec<Ally>,
    pub statuses: BTreeMap<Status, u32>,
    pub flags: BTreeSet<StoryFlag>,
    pub map_fragments: u32,
    pub death_count: u32,
    pub active_quests: Vec<&'static str>,
    pub completed_quests: Vec<&'static str>,
    pub achievements: Vec<AchievementId>,
    /// Encounters per enemy id. Zero means seen but never slain.
    pub bestiary: BTreeMap<&'static str, u32>,
    pub knowledge: BTreeMap<String, bool>,
    pub zone: &'static str,
    pub visited_zones: Vec<&'static str>,
    pub rest_count: u32,
    pub cycle: DayCycle,
    pub lunar_phase: LunarPhase,
    pub turn: u64,
    pub disorders: Vec<Disorder>,
    pub events: Vec<String>,
    pub decisions: Vec<String>,
    pub new_game_plus: bool,
    pub runs_completed: u32,
    pub enemies_slain: u32,
}

impl Player {
    pub fn new(registry: &Registry) -> Self {
        Self {
            health: STARTING_HEALTH,
            health_max: STARTING_HEALTH,
            sanity: STARTING_SANITY,
            sanity_max: STARTING_SANITY,
            willpower: STARTING_WILLPOWER,
            willpower_max: STARTING_WILLPOWER,
            base_speed: BASE_SPEED,
            reputation: 0,
            gold: STARTING_GOLD,
            level: 1,
            experience: 0,
            damage_bonus: 0.0,
            resist_bonus: 0.0,
            sanity_resist_bonus: 0.0,
            weapon: fists(),
            armor: unarmored(),
            inventory: registry.item(STARTING_ITEM).cloned().into_iter().collect(),
            skills: BTreeSet::new(),
            spells: BTreeSet::new(),
            allies: Vec::new(),
            statuses: BTreeMap::new(),
            flags: StoryFlag::INITIAL.into_iter().collect(),
            map_fragments: 0,
            death_count: 0,
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
            achievements: Vec::new(),
            bestiary: BTreeMap::new(),
            knowledge: BTreeMap::new(),
            zone: START_ZONE,
            visited_zones: vec![START_ZONE],
            rest_count: 0,
            cycle: DayCycle::Day,
            lunar_phase: LunarPhase::New,
            turn: 0,
            disorders: Vec::new(),
            events: Vec::new(),
            decisions: Vec::new(),
            new_game_plus: false,
            runs_completed: 0,
            enemies_slain: 0,
        }
    }

    /// Starts a new cycle from a finished run, keeping achievements,
    /// skills, spells and knowledge.
    pub fn new_game_plus(registry: &Registry, previous: &Player) -> Self {
        let mut player = Self::new(registry);
        player.new_game_plus = true;
        player.runs_completed = previous.runs_completed + 1;
        player.gold = NG_PLUS_GOLD;
        player.achievements = previous.achievements.clone();
        player.skills = previous.skills.clone();
        player.skills.insert(Skill::SilentStep);
        player.spells = previous.spells.clone();
        player.knowledge = previous.knowledge.clone();
        player
    }

    // ---- Resources ----

    /// Applies `delta` to a resource and clamps it to its range.
    ///
    /// Sanity losses are scaled by the sanity resistance bonus first; gains
    /// are not. Any sanity change re-rolls disorder acquisition. Returns the
    /// change actually applied.
    pub fn modify_stat(&mut self, stat: Stat, delta: i32, rng: &mut impl Rng) -> i32 {
        match stat {
            Stat::Health => {
                let before = self.health;
                self.health = (self.health + delta).clamp(0, self.health_max);
                self.health - before
            }
            Stat::Sanity => {
                let scaled = if delta < 0 {
                    (delta as f64 * (1.0 - self.sanity_resist_bonus)) as i32
                } else {
                    delta
                };
                let before = self.sanity;
                self.sanity = (self.sanity + scaled).clamp(0, self.sanity_max);
                if let Some(change) = disorders::reevaluate(self, rng) {
                    log::info!("Disorder change: {:?}", change);
                    self.events.push(change.to_string());
                }
                self.sanity - before
            }
            Stat::Willpower => {
                let before = self.willpower;
                self.willpower = (self.willpower + delta).clamp(0, self.willpower_max);
                self.willpower - before
            }
            Stat::Gold => {
                let before = self.gold;
                self.gold = (self.gold + delta).clamp(0, GOLD_MAX);
                self.gold - before
            }
            Stat::Reputation => {
                let before = self.reputation;
                self.reputation = (self.reputation + delta).clamp(REPUTATION_MIN, REPUTATION_MAX);
                self.reputation - before
            }
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn is_mad(&self) -> bool {
        self.sanity <= 0
    }

    pub fn effective_speed(&self) -> i32 {
        let modifier = self.armor.as_armor().map_or(0, |a| a.speed_modifier);
        (self.base_speed + modifier).max(1)
    }

    // ---- Inventory ----

    pub fn inventory_full(&self) -> bool {
        self.inventory.len() >= INVENTORY_CAPACITY
    }

    /// Adds an item. Fails without mutation when the inventory is full.
    ///
    /// Map fragments are folded into the map rather than carried.
    pub fn add_item(&mut self, item: Item) -> bool {
        if item.id == MAP_FRAGMENT {
            self.map_fragments += 1;
            return true;
        }
        if self.inventory_full() {
            return false;
        }
        self.inventory.push(item);
        true
    }

    /// Removes the first entry with the given id.
    pub fn remove_item(&mut self, id: &str) -> Option<Item> {
        let index = self.inventory.iter().position(|i| i.id == id)?;
        Some(self.inventory.remove(index))
    }

    pub fn has_item(&self, id: &str) -> bool {
        self.inventory.iter().any(|i| i.id == id)
    }

    /// Inventory positions holding consumables, in order.
    pub fn consumable_slots(&self) -> Vec<usize> {
        self.inventory
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_consumable())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn lunar_seals(&self) -> u32 {
        LUNAR_SEALS.iter().filter(|id| self.has_item(id)).count() as u32
    }

    /// Equips the weapon or armor at `index`, returning the old piece to the
    /// inventory. Baselines are dropped instead of stored.
    pub fn equip(&mut self, index: usize) -> Result<&'static str, ActionError> {
        let item = self.inventory.get(index).ok_or(ActionError::InvalidSelection)?;
        let current = match &item.kind {
            ItemKind::Weapon(_) => &self.weapon,
            ItemKind::Armor(_) => &self.armor,
            _ => return Err(ActionError::NotEquippable(item.name)),
        };
        let returns_old = current.id != BASELINE_WEAPON && current.id != BASELINE_ARMOR;
        if returns_old && self.inventory_full() {
            return Err(ActionError::InventoryFull);
        }

        let item = self.inventory.remove(index);
        let name = item.name;
        let old = match item.kind {
            ItemKind::Weapon(_) => std::mem::replace(&mut self.weapon, item),
            _ => std::mem::replace(&mut self.armor, item),
        };
        if returns_old {
            self.inventory.push(old);
        }
        Ok(name)
    }

    /// Checks that the item at inventory `index` can be used right now.
    pub fn check_consumable(&self, index: usize) -> Result<(), ActionError> {
        let item = self.inventory.get(index).ok_or(ActionError::InvalidSelection)?;
        let ItemKind::Consumable(consumable) = &item.kind else {
            return Err(ActionError::NoUsableItem);
        };
        if consumable.willpower_cost > self.willpower {
            return Err(ActionError::InsufficientWillpower {
                cost: consumable.willpower_cost,
                available: self.willpower,
            });
        }
        Ok(())
    }

    /// Uses the consumable at inventory `index` and removes it.
    pub fn use_consumable(
        &mut self,
        index: usize,
        rng: &mut impl Rng,
    ) -> Result<UsedItem, ActionError> {
        self.check_consumable(index)?;

        let item = self.inventory.remove(index);
        let mut used = UsedItem {
            name: item.name,
            induces_dream: false,
        };
        if let ItemKind::Consumable(consumable) = item.kind {
            self.willpower -= consumable.willpower_cost;
            for effect in consumable.effects {
                match effect {
                    Effect::Restore(stat, delta) => {
                        self.modify_stat(stat, delta, rng);
                    }
                    Effect::Ward(turns) => {
                        self.statuses.insert(Status::Warded, turns);
                    }
                    Effect::InduceDream => used.induces_dream = true,
                }
            }
        }
        Ok(used)
    }

    pub fn discard(&mut self, index: usize) -> Result<&'static str, ActionError> {
        let item = self.inventory.get(index).ok_or(ActionError::InvalidSelection)?;
        if !item.is_discardable() {
            return Err(ActionError::NotDiscardable(item.name));
        }
        Ok(self.inventory.remove(index).name)
    }

    // ---- Companions ----

    pub fn add_ally(&mut self, template: &AllyTemplate) -> Result<&'static str, ActionError> {
        if self.allies.len() >= MAX_ALLIES {
            return Err(ActionError::AllyLimit(MAX_ALLIES));
        }
        self.allies.push(Ally::from_template(template));
        Ok(template.name)
    }

    // ---- Story state ----

    pub fn has_skill(&self, skill: Skill) -> bool {
        self.skills.contains(&skill)
    }

    pub fn has_flag(&self, flag: StoryFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn set_flag(&mut self, flag: StoryFlag) {
        self.flags.insert(flag);
    }

    pub fn clear_flag(&mut self, flag: StoryFlag) {
        self.flags.remove(&flag);
    }

    pub fn has_disorder(&self, disorder: Disorder) -> bool {
        self.disorders.contains(&disorder)
    }

    pub fn learn(&mut self, key: impl Into<String>) {
        self.knowledge.insert(key.into(), true);
    }

    pub fn knows(&self, key: &str) -> bool {
        self.knowledge.get(key).copied().unwrap_or(false)
    }

    pub fn has_visited(&self, zone: &str) -> bool {
        self.visited_zones.iter().any(|z| *z == zone)
    }
}
