//! Turn-based combat resolution.
//!
//! A round is one player turn followed by one enemy turn. The player turn is
//! fully resolved, side effects included, before the enemy acts. An action
//! that fails validation is not a turn: the round is not played at all.

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::*;
use crate::achievements::AchievementId;
use crate::character::disorders;
use crate::character::flags::StoryFlag;
use crate::character::player::{Player, Stat, Status};
use crate::character::progression::Skill;
use crate::character::spells::Spell;
use crate::core::constants::*;
use crate::error::ActionError;
use crate::items::{fists, unarmored, DamageType};
use crate::registry::Registry;

/// A combat in progress against a single enemy.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatEngine {
    enemy: Enemy,
    round: u32,
    outcome: Option<CombatOutcome>,
}

/// Result of driving a combat with a fixed list of actions.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatReport {
    /// `None` if the actions ran out before the fight ended.
    pub outcome: Option<CombatOutcome>,
    pub events: Vec<CombatEvent>,
}

/// Chance of a successful escape, in percent.
pub fn flee_chance(sanity: i32) -> i32 {
    (FLEE_BASE_CHANCE + (sanity - FLEE_SANITY_PIVOT).max(0)).min(FLEE_MAX_CHANCE)
}

/// Multiplier for a weapon's damage type against an enemy's.
pub fn affinity_multiplier(weapon: DamageType, enemy: DamageType) -> f64 {
    match (weapon, enemy) {
        (DamageType::Oneiric, e) if e != DamageType::Cosmic => ONEIRIC_AFFINITY,
        (DamageType::Cosmic, _) => COSMIC_AFFINITY,
        _ => 1.0,
    }
}

impl CombatEngine {
    /// Clones the enemy, records the sighting and applies its dread once.
    pub fn start(
        template: &EnemyTemplate,
        player: &mut Player,
        rng: &mut impl Rng,
    ) -> (Self, Vec<CombatEvent>) {
        let mut engine = Self {
            enemy: Enemy::from_template(template),
            round: 0,
            outcome: None,
        };
        player.bestiary.entry(template.id).or_insert(0);
        log::info!("Combat started against {}", template.id);

        let mut events = vec![CombatEvent::Encounter {
            enemy: template.name,
        }];
        if template.sanity_damage > 0 {
            let lost = -player.modify_stat(Stat::Sanity, -template.sanity_damage, rng);
            events.push(CombatEvent::Dread { sanity_lost: lost });
        }
        engine.check_player(player, &mut events);
        (engine, events)
    }

    /// Runs a fight to completion or until `actions` is exhausted.
    pub fn run(
        template: &EnemyTemplate,
        player: &mut Player,
        registry: &Registry,
        actions: impl IntoIterator<Item = CombatAction>,
        rng: &mut impl Rng,
    ) -> CombatReport {
        let (mut engine, mut events) = Self::start(template, player, rng);
        for action in actions {
            if engine.is_over() {
                break;
            }
            events.extend(engine.round(action, player, registry, rng));
        }
        CombatReport {
            outcome: engine.outcome,
            events,
        }
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn rounds(&self) -> u32 {
        self.round
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Checks whether `action` can be taken right now. Mutates nothing.
    pub fn check(
        &self,
        action: CombatAction,
        player: &Player,
        registry: &Registry,
    ) -> Result<(), ActionError> {
        match action {
            CombatAction::Attack | CombatAction::Dodge | CombatAction::Flee => Ok(()),
            CombatAction::UseItem(choice) => {
                let slots = player.consumable_slots();
                if slots.is_empty() {
                    return Err(ActionError::NoUsableItem);
                }
                let index = *slots.get(choice).ok_or(ActionError::InvalidSelection)?;
                player.check_consumable(index)
            }
            CombatAction::CastSpell => {
                require(player, Skill::MinorSpell, SPELL_WILLPOWER_COST)
            }
            CombatAction::SummonAlly => {
                if !player.has_skill(Skill::SummonAlly) {
                    return Err(ActionError::MissingSkill(Skill::SummonAlly.name()));
                }
                if player.allies.len() >= MAX_ALLIES {
                    return Err(ActionError::AllyLimit(MAX_ALLIES));
                }
                require(player, Skill::SummonAlly, SUMMON_WILLPOWER_COST)?;
                registry
                    .ally(SUMMONED_ALLY)
                    .map(|_| ())
                    .ok_or(ActionError::InvalidSelection)
            }
            CombatAction::GreaterRitual => {
                require(player, Skill::GreaterRitual, GREATER_RITUAL_COST)
            }
        }
    }

    /// Plays one round. Does nothing once the combat is over.
    ///
    /// A rejected action yields a single `Failed` event and leaves the
    /// combat, the player and the round counter untouched.
    pub fn round(
        &mut self,
        action: CombatAction,
        player: &mut Player,
        registry: &Registry,
        rng: &mut impl Rng,
    ) -> Vec<CombatEvent> {
        let mut events = Vec::new();
        if self.is_over() {
            return events;
        }
        if let Err(e) = self.check(action, player, registry) {
            log::debug!("Rejected {:?}: {}", action, e);
            events.push(CombatEvent::Failed {
                reason: e.to_string(),
            });
            return events;
        }
        self.round += 1;

        let skip_chance = player
            .disorders
            .iter()
            .map(|d| d.skip_turn_chance())
            .fold(0.0, f64::max);
        if skip_chance > 0.0 && rng.gen::<f64>() < skip_chance {
            events.push(CombatEvent::Frozen);
        } else {
            self.player_turn(action, player, registry, rng, &mut events);
        }

        if self.is_over() {
            self.finish(player, &mut events);
            return events;
        }
        if !self.enemy.is_alive() {
            let victory = self.victory(player, registry, rng);
            events.extend(victory);
            self.outcome = Some(CombatOutcome::Victory);
            self.finish(player, &mut events);
            return events;
        }

        self.enemy_turn(player, rng, &mut events);
        self.check_player(player, &mut events);
        events
    }

    fn check_player(&mut self, player: &mut Player, events: &mut Vec<CombatEvent>) {
        if player.is_dead() {
            self.outcome = Some(CombatOutcome::Death);
        } else if player.is_mad() {
            self.outcome = Some(CombatOutcome::SanityBreak);
        }
        if self.is_over() {
            self.finish(player, events);
        }
    }

    fn finish(&mut self, player: &mut Player, events: &mut Vec<CombatEvent>) {
        player.statuses.clear();
        if let Some(outcome) = self.outcome {
            log::info!(
                "Combat against {} ended after {} rounds: {:?}",
                self.enemy.template.id,
                self.round,
                outcome
            );
            events.push(CombatEvent::Outcome(outcome));
        }
    }

    fn player_turn(
        &mut self,
        action: CombatAction,
        player: &mut Player,
        registry: &Registry,
        rng: &mut impl Rng,
        events: &mut Vec<CombatEvent>,
    ) {
        let result = match action {
            CombatAction::Attack => {
                self.attack(player, rng, events);
                Ok(())
            }
            CombatAction::UseItem(choice) => self.use_item(choice, player, rng, events),
            CombatAction::Dodge => {
                player.statuses.insert(Status::Evading, 1);
                events.push(CombatEvent::Evading);
                Ok(())
            }
            CombatAction::Flee => {
                let roll = rng.gen_range(1..=100);
                if roll <= flee_chance(player.sanity) {
                    events.push(CombatEvent::Fled);
                    self.outcome = Some(CombatOutcome::Flight);
                } else {
                    events.push(CombatEvent::FleeFailed);
                }
                Ok(())
            }
            CombatAction::CastSpell => self.cast_spell(player, rng, events),
            CombatAction::SummonAlly => self.summon_ally(player, registry, rng, events),
            CombatAction::GreaterRitual => {
                self.greater_ritual(player, rng, events);
                Ok(())
            }
        };
        if let Err(e) = result {
            events.push(CombatEvent::Failed {
                reason: e.to_string(),
            });
        }
    }

    fn attack(&mut self, player: &mut Player, rng: &mut impl Rng, events: &mut Vec<CombatEvent>) {
        if player.weapon.as_weapon().is_none() {
            player.weapon = fists();
        }
        let Some(weapon) = player.weapon.as_weapon().cloned() else {
            return;
        };

        let roll = rng.gen_range(weapon.min_damage..=weapon.max_damage)
            + player.level as i32 * LEVEL_DAMAGE_PER_LEVEL;
        let mut damage = (roll - self.enemy.template.defense).max(1);
        damage = (damage as f64 * (1.0 + player.damage_bonus)) as i32;
        damage = (damage as f64
            * affinity_multiplier(weapon.damage_type, self.enemy.template.damage_type))
            as i32;
        let outgoing = disorders::outgoing_multiplier(player);
        if outgoing != 1.0 {
            damage = (damage as f64 * outgoing) as i32;
        }
        self.enemy.take_damage(damage);
        events.push(CombatEvent::PlayerAttack { damage });

        if weapon.durability.is_some() {
            let name = player.weapon.name;
            if player.weapon.wear() {
                player.weapon = fists();
                events.push(CombatEvent::WeaponBroke { weapon: name });
            } else if let Some(remaining) = player.weapon.durability() {
                events.push(CombatEvent::WeaponWorn { remaining });
            }
        }

        for ally in player.allies.iter().filter(|a| a.is_alive()) {
            let roll = rng.gen_range(ally.min_damage..=ally.max_damage);
            let damage = (roll - self.enemy.template.defense).max(1);
            self.enemy.take_damage(damage);
            events.push(CombatEvent::AllyAttack {
                ally: ally.name,
                damage,
            });
        }
    }

    fn use_item(
        &mut self,
        choice: usize,
        player: &mut Player,
        rng: &mut impl Rng,
        events: &mut Vec<CombatEvent>,
    ) -> Result<(), ActionError> {
        let index = *player
            .consumable_slots()
            .get(choice)
            .ok_or(ActionError::InvalidSelection)?;
        let used = player.use_consumable(index, rng)?;
        events.push(CombatEvent::ItemUsed { item: used.name });
        Ok(())
    }

    fn cast_spell(
        &mut self,
        player: &mut Player,
        rng: &mut impl Rng,
        events: &mut Vec<CombatEvent>,
    ) -> Result<(), ActionError> {
        player.modify_stat(Stat::Willpower, -SPELL_WILLPOWER_COST, rng);
        let damage = rng.gen_range(SPELL_DAMAGE_MIN..=SPELL_DAMAGE_MAX);
        self.enemy.take_damage(damage);
        events.push(CombatEvent::SpellCast { damage });
        Ok(())
    }

    fn summon_ally(
        &mut self,
        player: &mut Player,
        registry: &Registry,
        rng: &mut impl Rng,
        events: &mut Vec<CombatEvent>,
    ) -> Result<(), ActionError> {
        let template = registry
            .ally(SUMMONED_ALLY)
            .ok_or(ActionError::InvalidSelection)?;
        player.modify_stat(Stat::Willpower, -SUMMON_WILLPOWER_COST, rng);
        let ally = player.add_ally(template)?;
        events.push(CombatEvent::AllySummoned { ally });
        Ok(())
    }

    /// Spends the ritual cost and calls on one known combat ritual at random.
    /// Without any, the ritual falls back to ethereal form.
    fn greater_ritual(
        &mut self,
        player: &mut Player,
        rng: &mut impl Rng,
        events: &mut Vec<CombatEvent>,
    ) {
        player.modify_stat(Stat::Willpower, -GREATER_RITUAL_COST, rng);
        let known: Vec<Spell> = player
            .spells
            .iter()
            .copied()
            .filter(|s| s.is_combat_ritual())
            .collect();
        let spell = known.choose(rng).copied().unwrap_or(Spell::EtherealForm);
        log::info!("Greater ritual: {}", spell.id());

        match spell {
            Spell::InvokeNodens => {
                self.enemy.take_damage(NODENS_RITUAL_DAMAGE);
                player.set_flag(StoryFlag::NodensBlessed);
                events.push(CombatEvent::NodensInvoked {
                    damage: NODENS_RITUAL_DAMAGE,
                });
            }
            _ => {
                let turns = player.statuses.entry(Status::Warded).or_insert(0);
                *turns = (*turns).max(ETHEREAL_FORM_TURNS);
                events.push(CombatEvent::EtherealForm {
                    turns: ETHEREAL_FORM_TURNS,
                });
            }
        }
    }

    fn enemy_turn(&mut self, player: &mut Player, rng: &mut impl Rng, events: &mut Vec<CombatEvent>) {
        let evading = player.statuses.remove(&Status::Evading).is_some();
        if let Some(turns) = player.statuses.get_mut(&Status::Warded) {
            *turns = turns.saturating_sub(1);
            if *turns == 0 {
                player.statuses.remove(&Status::Warded);
            }
            events.push(CombatEvent::Warded);
            return;
        }
        if evading && rng.gen::<f64>() < DODGE_NEGATE_CHANCE {
            events.push(CombatEvent::Dodged);
            return;
        }

        let template = &self.enemy.template;
        let living: Vec<usize> = player
            .allies
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_alive())
            .map(|(i, _)| i)
            .collect();
        // 0 is the player, i + 1 is living[i]
        let pick = rng.gen_range(0..=living.len());
        let roll = rng.gen_range(template.min_damage..=template.max_damage);

        if pick == 0 {
            let armor = player.armor.as_armor().cloned();
            let mitigation = armor.as_ref().map_or(0, |a| {
                if template.damage_type == DamageType::Physical {
                    a.defense
                } else {
                    a.resist
                }
            });
            let mut damage = (roll - mitigation).max(1);
            damage = (damage as f64 * (1.0 - player.resist_bonus)) as i32;
            let incoming = disorders::incoming_multiplier(player);
            if incoming != 1.0 {
                damage = (damage as f64 * incoming) as i32;
            }
            player.modify_stat(Stat::Health, -damage, rng);
            events.push(CombatEvent::EnemyAttack {
                target: Target::Player,
                damage,
            });

            if armor.is_some_and(|a| a.durability.is_some()) {
                let name = player.armor.name;
                if player.armor.wear() {
                    player.armor = unarmored();
                    events.push(CombatEvent::ArmorBroke { armor: name });
                }
            }
        } else {
            let index = living[pick - 1];
            let ally = &mut player.allies[index];
            let damage = (roll - ally.defense).max(1);
            ally.health -= damage;
            let name = ally.name;
            events.push(CombatEvent::EnemyAttack {
                target: Target::Ally(name),
                damage,
            });
            if ally.health <= 0 {
                player.allies.remove(index);
                events.push(CombatEvent::AllyFell { ally: name });
            }
        }

        let horror = template.sanity_damage / 2;
        if template.sanity_damage > 0 && rng.gen::<f64>() < HORROR_DRAIN_CHANCE && horror > 0 {
            let lost = -player.modify_stat(Stat::Sanity, -horror, rng);
            events.push(CombatEvent::HorrorDrain { sanity_lost: lost });
        }
        if template.cosmic {
            let lost = -player.modify_stat(Stat::Sanity, -COSMIC_DRAIN_PER_TURN, rng);
            events.push(CombatEvent::CosmicDrain { sanity_lost: lost });
        }
    }

    fn victory(
        &mut self,
        player: &mut Player,
        registry: &Registry,
        rng: &mut impl Rng,
    ) -> Vec<CombatEvent> {
        let template = &self.enemy.template;
        let mut events = Vec::new();

        player.gain_experience(template.xp);
        let (low, high) = template.gold;
        let gold = rng.gen_range(low..=high.max(low));
        player.modify_stat(Stat::Gold, gold, rng);
        *player.bestiary.entry(template.id).or_insert(0) += 1;
        player.enemies_slain += 1;
        player.unlock(AchievementId::FirstBlood);
        player.clear_flag(StoryFlag::Pacifist);

        let mut loot = Vec::new();
        for (id, chance) in &template.loot {
            if rng.gen::<f64>() >= *chance {
                continue;
            }
            let Some(item) = registry.item(id) else {
                continue;
            };
            if player.add_item(item.clone()) {
                loot.push(item.name);
            } else {
                events.push(CombatEvent::LootLost { item: item.name });
            }
        }
        if template.boss {
            player.learn(template.id);
        }
        if template.id == "nyarlathotep" {
            player.set_flag(StoryFlag::NyarlathotepSeen);
        }

        events.insert(
            0,
            CombatEvent::Victory {
                xp: template.xp,
                gold,
                loot,
            },
        );
        events
    }
}

/// A skill and enough willpower to pay `cost`.
fn require(player: &Player, skill: Skill, cost: i32) -> Result<(), ActionError> {
    if !player.has_skill(skill) {
        return Err(ActionError::MissingSkill(skill.name()));
    }
    if player.willpower < cost {
        return Err(ActionError::InsufficientWillpower {
            cost,
            available: player.willpower,
        });
    }
    Ok(())
}
