//! Command handlers for the state machine.
//!
//! Validation failures become messages and leave state untouched. Broken
//! invariants (a zone id the registry does not know, a combat command with
//! no combat running) come back as a [`Fault`].

use rand::Rng;

use super::ending::{Ending, RunSummary};
use super::game_state::{GameMode, GameStateMachine};
use super::input::{Command, InventoryAction, Prompt};
use crate::achievements::{check_progress, get_achievement_def, AchievementId};
use crate::character::flags::StoryFlag;
use crate::character::manager::Slot;
use crate::character::player::{DayCycle, Player, Stat};
use crate::character::progression::sample_upgrades;
use crate::character::quests::QuestState;
use crate::character::save::{deserialize, serialize};
use crate::character::spells::Spell;
use crate::combat::logic::CombatEngine;
use crate::combat::types::{CombatAction, CombatOutcome, EnemyTemplate};
use crate::core::constants::*;
use crate::error::{ActionError, Fault};
use crate::items::shops::{purchase, shop_stock};
use crate::zones::data::Zone;
use crate::zones::dreams;
use crate::zones::encounter::{found_key, hidden_items, resolve, resolve_entity, Encounter};

impl<'r, R: Rng> GameStateMachine<'r, R> {
    pub(super) fn dispatch(&mut self, command: Command) -> Result<(), Fault> {
        match command {
            Command::Cancel => {
                self.prompt = Prompt::None;
                Ok(())
            }

            // ── Menu ────────────────────────────────────────────
            Command::NewGame => {
                let player = Player::new(self.registry);
                self.start_run(player);
                Ok(())
            }
            Command::Continue => {
                self.prompt = Prompt::LoadSlot;
                Ok(())
            }
            Command::LoadSlot(slot) => {
                self.prompt = Prompt::None;
                self.load(slot);
                Ok(())
            }
            Command::NewGamePlus => {
                self.new_game_plus();
                Ok(())
            }
            Command::Quit => {
                self.quit = true;
                Ok(())
            }

            // ── Exploring ───────────────────────────────────────
            Command::Explore => self.with_player(|this, p| this.explore(p)),
            Command::Travel => self.with_player(|this, p| this.open_travel(p)),
            Command::TravelTo(index) => self.with_player(|this, p| this.travel(p, index)),
            Command::Rest => self.with_player(|this, p| this.rest(p)),
            Command::OpenShop => self.with_player(|this, p| this.open_shop(p)),
            Command::Talk => self.with_player(|this, p| this.talk(p)),

            // ── Side screens ────────────────────────────────────
            Command::OpenInventory => {
                self.mode = GameMode::Inventory;
                Ok(())
            }
            Command::OpenMap => self.open_screen(GameMode::Map),
            Command::OpenQuests => self.open_screen(GameMode::Quests),
            Command::OpenHelp => self.open_screen(GameMode::Help),
            Command::OpenRituals => {
                self.mode = GameMode::Ritual;
                Ok(())
            }
            Command::OpenBestiary => {
                if self.bestiary_owner().is_none() {
                    self.say("No creatures recorded yet.");
                    return Ok(());
                }
                self.open_screen(GameMode::Bestiary)
            }
            Command::Pause => {
                self.mode = GameMode::Paused;
                Ok(())
            }
            Command::ShowAchievements => {
                self.show_achievements();
                Ok(())
            }
            Command::Back => {
                self.back();
                Ok(())
            }

            // ── Combat ──────────────────────────────────────────
            Command::Fight(action) => self.with_player(|this, p| this.fight(p, action)),
            Command::PickCombatItem => self.with_player(|this, p| {
                if p.consumable_slots().is_empty() {
                    this.reject(ActionError::NoUsableItem);
                } else {
                    this.prompt = Prompt::CombatItem;
                }
                Ok(())
            }),

            // ── Rituals ─────────────────────────────────────────
            Command::CastRitual(spell) => self.with_player(|this, p| this.cast_ritual(p, spell)),
            Command::PortalTo(index) => self.with_player(|this, p| this.open_portal(p, index)),

            // ── Inventory and shop ──────────────────────────────
            Command::BeginInventory(action) => {
                self.prompt = Prompt::Inventory(action);
                Ok(())
            }
            Command::InventoryPick(index) => {
                let Prompt::Inventory(action) = self.prompt else {
                    return Ok(());
                };
                self.prompt = Prompt::None;
                self.with_player(|this, p| this.inventory_pick(p, action, index))
            }
            Command::Buy(index) => self.with_player(|this, p| {
                let zone = p.zone;
                match purchase(p, this.registry, zone, index) {
                    Ok(name) => this.say(format!("You buy {}.", name)),
                    Err(e) => this.reject(e),
                }
                Ok(())
            }),

            // ── Pause ───────────────────────────────────────────
            Command::BeginSave => {
                self.prompt = Prompt::SaveSlot;
                Ok(())
            }
            Command::SaveTo(slot) => {
                self.prompt = Prompt::None;
                self.save_to(slot).map(|_| ())
            }
            Command::Resume => {
                self.mode = GameMode::Exploring;
                Ok(())
            }
            Command::SaveAndQuit => {
                if !self.save_to(Slot::Auto)? {
                    // keep the run rather than lose it
                    return Ok(());
                }
                self.player = None;
                self.combat = None;
                self.mode = GameMode::Menu;
                Ok(())
            }

            // ── Level-up and death ──────────────────────────────
            Command::ChooseUpgrade(index) => {
                self.with_player(|this, p| this.choose_upgrade(p, index))
            }
            Command::Resurrect => self.with_player(|this, p| this.resurrect(p)),
            Command::ReloadAutosave => {
                self.reload_autosave();
                Ok(())
            }
            Command::GiveUp => self.with_player(|this, p| {
                this.enter_ending(p);
                Ok(())
            }),
        }
    }

    // ---- Menu ----

    fn start_run(&mut self, player: Player) {
        let zone = self
            .registry
            .zone(player.zone)
            .map_or(player.zone, |z| z.name);
        log::info!("Run started in {} (level {})", player.zone, player.level);
        self.say(format!("You awaken in {}.", zone));
        self.player = Some(player);
        self.combat = None;
        self.summary = None;
        self.upgrades.clear();
        self.prompt = Prompt::None;
        self.mode = GameMode::Exploring;
    }

    fn load(&mut self, slot: Slot) {
        let loaded = self
            .store
            .load(slot)
            .and_then(|snapshot| deserialize(&snapshot, self.registry));
        match loaded {
            Ok(player) => {
                self.say(format!("Loaded {}.", slot.name()));
                self.start_run(player);
            }
            Err(e) => {
                log::warn!("Load of {} failed: {}", slot.name(), e);
                self.say(format!("Could not load {}: {}", slot.name(), e));
            }
        }
    }

    fn new_game_plus(&mut self) {
        let Some(previous) = self.last_run.as_ref() else {
            self.say("Finish a journey first to begin New Game+.");
            return;
        };
        let player = Player::new_game_plus(self.registry, previous);
        self.say(format!("The cycle begins again (run {}).", player.runs_completed + 1));
        self.start_run(player);
    }

    // ---- Screens ----

    fn open_screen(&mut self, mode: GameMode) -> Result<(), Fault> {
        self.return_to = self.mode;
        self.mode = mode;
        Ok(())
    }

    fn back(&mut self) {
        self.prompt = Prompt::None;
        self.mode = match self.mode {
            GameMode::Ending => {
                self.player = None;
                self.combat = None;
                GameMode::Menu
            }
            GameMode::Inventory | GameMode::Shop | GameMode::Ritual => GameMode::Exploring,
            _ => self.return_to,
        };
    }

    fn show_achievements(&mut self) {
        let names: Vec<&str> = self
            .player
            .iter()
            .flat_map(|p| p.achievements.iter())
            .filter_map(|id| get_achievement_def(*id))
            .map(|def| def.name)
            .collect();
        if names.is_empty() {
            self.say("No achievements yet.");
        } else {
            self.say(format!("Achievements: {}", names.join(", ")));
        }
    }

    /// Writes the current player to `slot`. A failed write is reported to
    /// the player and yields `Ok(false)`.
    fn save_to(&mut self, slot: Slot) -> Result<bool, Fault> {
        let Some(player) = self.player.as_ref() else {
            return Err(self.fault("save requested with no player"));
        };
        match self.store.save(slot, &serialize(player)) {
            Ok(()) => {
                self.say(format!("Saved to {}.", slot.name()));
                Ok(true)
            }
            Err(e) => {
                log::warn!("Save to {} failed: {}", slot.name(), e);
                self.say(format!("Could not save: {}", e));
                Ok(false)
            }
        }
    }

    fn autosave(&mut self, player: &Player) {
        if let Err(e) = self.store.save(Slot::Auto, &serialize(player)) {
            log::warn!("Autosave failed: {}", e);
            self.say("Autosave failed.");
        }
    }

    // ---- Exploring ----

    fn current_zone(&self, player: &Player) -> Result<&'r Zone, Fault> {
        self.registry
            .zone(player.zone)
            .ok_or_else(|| self.fault(format!("unknown zone '{}'", player.zone)))
    }

    fn explore(&mut self, p: &mut Player) -> Result<(), Fault> {
        let registry = self.registry;
        let zone = self.current_zone(p)?;
        match resolve(zone, p, registry, &mut self.rng) {
            Encounter::Combat(id) => {
                let template = registry
                    .enemy(id)
                    .ok_or_else(|| self.fault(format!("unknown enemy '{}'", id)))?;
                self.engage(p, template);
            }
            Encounter::Discovery { item, location } => {
                let template = registry
                    .item(item)
                    .ok_or_else(|| self.fault(format!("unknown item '{}'", item)))?;
                if p.add_item(template.clone()) {
                    p.learn(found_key(zone.id, item));
                    self.say(format!("Found {} {}.", template.name, location));
                } else {
                    self.reject(ActionError::InventoryFull);
                }
            }
            Encounter::DreamTrigger => match dreams::maybe_dream(p, registry, &mut self.rng) {
                Some(dream) => self.say(dream.to_string()),
                None => self.say("You doze, but no dream comes."),
            },
            Encounter::Nothing => self.say("You explore but find nothing..."),
        }
        self.advance_turn(p);
        self.settle(p);
        Ok(())
    }

    fn open_travel(&mut self, p: &mut Player) -> Result<(), Fault> {
        if self.current_zone(p)?.connections.is_empty() {
            self.say("There is nowhere to go from here.");
        } else {
            self.prompt = Prompt::Destination;
        }
        Ok(())
    }

    fn travel(&mut self, p: &mut Player, index: usize) -> Result<(), Fault> {
        self.prompt = Prompt::None;
        let registry = self.registry;
        let zone = self.current_zone(p)?;
        let Some(target) = zone.connections.get(index).copied() else {
            self.reject(ActionError::InvalidSelection);
            return Ok(());
        };
        let destination = registry
            .zone(target)
            .ok_or_else(|| self.fault(format!("unknown zone '{}'", target)))?;

        p.zone = destination.id;
        p.rest_count = 0;
        log::info!("Travelled to {}", destination.id);
        self.say(format!("You travel to {}.", destination.name));

        if !p.has_visited(destination.id) {
            p.visited_zones.push(destination.id);
            p.gain_experience(FIRST_VISIT_XP);
            self.say(format!("First time here: +{} XP.", FIRST_VISIT_XP));
            if self.rng.gen::<f64>() < FIRST_VISIT_DREAM_CHANCE {
                if let Some(dream) = dreams::maybe_dream(p, registry, &mut self.rng) {
                    self.say(dream.to_string());
                }
            }
        }

        self.advance_turn(p);
        if self.autosave_on_travel {
            self.autosave(p);
        }
        if destination.is_final() && !p.is_dead() && !p.is_mad() {
            self.combat = None;
            self.enter_ending(p);
        } else {
            self.settle(p);
        }
        Ok(())
    }

    fn rest(&mut self, p: &mut Player) -> Result<(), Fault> {
        let zone = self.current_zone(p)?;
        let refusal = if p.disorders.iter().any(|d| d.prevents_rest()) {
            Some("insomnia keeps you awake")
        } else if !zone.safe && !zone.inn {
            Some("this place is not safe")
        } else if !zone.inn && p.rest_count >= MAX_RESTS_WITHOUT_INN {
            Some("you have already rested enough here")
        } else {
            None
        };
        if let Some(reason) = refusal {
            self.reject(ActionError::CannotRest(reason));
            return Ok(());
        }

        p.modify_stat(Stat::Sanity, REST_SANITY, &mut self.rng);
        p.modify_stat(Stat::Willpower, REST_WILLPOWER, &mut self.rng);
        p.modify_stat(Stat::Health, REST_HEALTH, &mut self.rng);
        p.rest_count += 1;
        self.say("You rest and recover your strength.");
        if self.rng.gen::<f64>() < REST_DREAM_CHANCE {
            if let Some(dream) = dreams::maybe_dream(p, self.registry, &mut self.rng) {
                self.say(dream.to_string());
            }
        }
        self.advance_turn(p);
        self.settle(p);
        Ok(())
    }

    fn open_shop(&mut self, p: &mut Player) -> Result<(), Fault> {
        let zone = self.current_zone(p)?;
        if zone.has_shop && !shop_stock(zone.id).is_empty() {
            self.mode = GameMode::Shop;
        } else {
            self.reject(ActionError::NoShop);
        }
        Ok(())
    }

    fn talk(&mut self, p: &mut Player) -> Result<(), Fault> {
        let registry = self.registry;
        let zone = self.current_zone(p)?;
        let Some(npc) = zone.npc else {
            self.reject(ActionError::NoOneToTalkTo);
            return Ok(());
        };
        let offered: Vec<_> = registry.quests().iter().filter(|q| q.giver == npc).collect();

        let ready = offered
            .iter()
            .find(|q| p.quest_state(q.id) == QuestState::Active && p.objective_met(q));
        if let Some(quest) = ready {
            match p.complete_quest(quest, registry, &mut self.rng) {
                Ok(()) => self.say(format!("Quest completed: {}", quest.title)),
                Err(e) => self.reject(e),
            }
        } else if let Some(quest) = offered
            .iter()
            .find(|q| p.quest_state(q.id) == QuestState::Inactive)
        {
            p.accept_quest(quest);
            self.say(format!("New quest: {}", quest.title));
        } else {
            self.say("There is nothing more to discuss.");
        }
        self.advance_turn(p);
        self.settle(p);
        Ok(())
    }

    /// Ticks the world clock after a turn-advancing action.
    fn advance_turn(&mut self, p: &mut Player) {
        p.turn += 1;
        if p.turn % TURNS_PER_DAY_PHASE == 0 {
            p.cycle = p.cycle.toggled();
            self.say(if p.cycle == DayCycle::Night {
                "Night falls over the Dreamlands."
            } else {
                "Dawn breaks over the Dreamlands."
            });
        }
        if p.turn % TURNS_PER_LUNAR_PHASE == 0 {
            p.lunar_phase = p.lunar_phase.next();
            self.say(format!("The moon turns {}.", p.lunar_phase.id().to_lowercase()));
        }
        for id in check_progress(p, self.registry) {
            self.announce(id);
        }
        if self.mode == GameMode::Exploring {
            if let Some(entity) = resolve_entity(p, self.registry, &mut self.rng) {
                self.meet_entity(p, entity);
            }
        }
    }

    fn meet_entity(&mut self, p: &mut Player, entity: &EnemyTemplate) {
        log::info!("Outer entity encountered: {}", entity.id);
        p.set_flag(StoryFlag::VeilTorn);
        if p.unlock(AchievementId::VeilTorn) {
            self.announce(AchievementId::VeilTorn);
        }
        self.say(format!("The veil tears. {} is here.", entity.name));
        if entity.id == "nyarlathotep" {
            p.set_flag(StoryFlag::NyarlathotepSeen);
        }
        if entity.combative {
            self.engage(p, entity);
            return;
        }
        if entity.sanity_damage > 0 {
            let lost = -p.modify_stat(Stat::Sanity, -entity.sanity_damage, &mut self.rng);
            self.say(format!("Its gaze costs you {} sanity.", lost));
        }
        if entity.id == "nodens" {
            p.set_flag(StoryFlag::NodensBlessed);
            self.say("Nodens regards you kindly and passes on.");
        }
    }

    fn announce(&mut self, id: AchievementId) {
        let name = get_achievement_def(id).map_or(id.id(), |def| def.name);
        self.say(format!("Achievement unlocked: {}", name));
    }

    fn reject(&mut self, error: ActionError) {
        log::debug!("Action rejected: {}", error);
        self.say(error.to_string());
    }

    /// Moves to `Ending`, `Dead` or `LevelUp` when the player's state calls for it.
    fn settle(&mut self, p: &mut Player) {
        if matches!(self.mode, GameMode::Ending | GameMode::Dead) {
            return;
        }
        if p.is_mad() {
            self.combat = None;
            self.enter_ending(p);
        } else if p.is_dead() {
            self.combat = None;
            self.enter_dead(p);
        } else if self.mode == GameMode::Exploring && p.can_level_up() {
            self.enter_level_up(p);
        }
    }

    // ---- Inventory ----

    fn inventory_pick(
        &mut self,
        p: &mut Player,
        action: InventoryAction,
        index: usize,
    ) -> Result<(), Fault> {
        match action {
            InventoryAction::Equip => match p.equip(index) {
                Ok(name) => self.say(format!("You equip {}.", name)),
                Err(e) => self.reject(e),
            },
            InventoryAction::Discard => match p.discard(index) {
                Ok(name) => self.say(format!("You discard {}.", name)),
                Err(e) => self.reject(e),
            },
            InventoryAction::Use => {
                self.use_item(p, index)?;
                self.settle(p);
            }
        }
        Ok(())
    }

    fn use_item(&mut self, p: &mut Player, index: usize) -> Result<(), Fault> {
        let registry = self.registry;
        let Some(item) = p.inventory.get(index) else {
            self.reject(ActionError::InvalidSelection);
            return Ok(());
        };
        if !item.is_consumable() {
            let id = item.id;
            let Some(quest_id) = p.quest_for_use(registry, id) else {
                self.reject(ActionError::NoUsableItem);
                return Ok(());
            };
            let quest = registry
                .quest(quest_id)
                .ok_or_else(|| self.fault(format!("unknown quest '{}'", quest_id)))?;
            match p.complete_quest(quest, registry, &mut self.rng) {
                Ok(()) => self.say(format!("Quest completed: {}", quest.title)),
                Err(e) => self.reject(e),
            }
            return Ok(());
        }

        match p.use_consumable(index, &mut self.rng) {
            Ok(used) => {
                self.say(format!("You use {}.", used.name));
                if used.induces_dream {
                    let dream = dreams::dream(p, registry, &mut self.rng);
                    self.say(dream.to_string());
                }
            }
            Err(e) => self.reject(e),
        }
        Ok(())
    }

    // ---- Rituals ----

    /// Field rituals. The portal only asks where to go; it is paid for once
    /// a destination is chosen.
    fn cast_ritual(&mut self, p: &mut Player, spell: Spell) -> Result<(), Fault> {
        if let Err(e) = p.check_spell(spell) {
            self.reject(e);
            return Ok(());
        }
        match spell {
            Spell::OpenPortal => {
                if p.portal_destinations(self.registry).is_empty() {
                    self.reject(ActionError::NoDestination);
                } else {
                    self.prompt = Prompt::PortalDestination;
                }
                Ok(())
            }
            Spell::SeeInvisible => self.see_invisible(p),
            Spell::EtherealForm | Spell::InvokeNodens => {
                self.say(format!("{} can only be called in battle.", spell.name()));
                Ok(())
            }
        }
    }

    fn see_invisible(&mut self, p: &mut Player) -> Result<(), Fault> {
        let registry = self.registry;
        let zone = self.current_zone(p)?;
        p.spend_on(Spell::SeeInvisible, &mut self.rng);
        log::info!("See invisible cast in {}", zone.id);

        let hidden = hidden_items(zone, p, registry);
        if hidden.is_empty() {
            self.say("Nothing hidden remains here.");
        }
        for d in hidden {
            let Some(template) = registry.item(d.item) else {
                continue;
            };
            if p.add_item(template.clone()) {
                p.learn(found_key(zone.id, d.item));
                self.say(format!("The veil parts: {} {}.", template.name, d.location));
            } else {
                self.say(format!("You glimpse {} {}, but cannot carry it.", template.name, d.location));
            }
        }
        self.finish_ritual(p);
        Ok(())
    }

    fn open_portal(&mut self, p: &mut Player, index: usize) -> Result<(), Fault> {
        self.prompt = Prompt::None;
        if let Err(e) = p.check_spell(Spell::OpenPortal) {
            self.reject(e);
            return Ok(());
        }
        let Some(target) = p.portal_destinations(self.registry).get(index).copied() else {
            self.reject(ActionError::InvalidSelection);
            return Ok(());
        };
        let destination = self
            .registry
            .zone(target)
            .ok_or_else(|| self.fault(format!("unknown zone '{}'", target)))?;

        p.spend_on(Spell::OpenPortal, &mut self.rng);
        p.zone = destination.id;
        p.rest_count = 0;
        log::info!("Portal opened to {}", destination.id);
        self.say(format!("A portal opens. You step through into {}.", destination.name));
        self.finish_ritual(p);
        Ok(())
    }

    /// A cast ritual takes a turn and returns to exploring.
    fn finish_ritual(&mut self, p: &mut Player) {
        self.mode = GameMode::Exploring;
        self.advance_turn(p);
        self.settle(p);
    }

    // ---- Combat ----

    /// Starts a fight. Dread alone can end it before the first round.
    pub(super) fn engage(&mut self, p: &mut Player, template: &EnemyTemplate) {
        let (engine, events) = CombatEngine::start(template, p, &mut self.rng);
        for event in events {
            self.say(event.to_string());
        }
        match engine.outcome() {
            Some(outcome) => self.after_combat(p, outcome),
            None => {
                self.combat = Some(engine);
                self.mode = GameMode::Combat;
            }
        }
    }

    fn fight(&mut self, p: &mut Player, action: CombatAction) -> Result<(), Fault> {
        let Some(engine) = self.combat.as_ref() else {
            return Err(self.fault("combat command with no enemy"));
        };
        if let Err(e) = engine.check(action, p, self.registry) {
            // a bad pick leaves the item picker open for another try
            if !matches!(action, CombatAction::UseItem(_)) {
                self.prompt = Prompt::None;
            }
            self.reject(e);
            return Ok(());
        }

        self.prompt = Prompt::None;
        let mode = self.mode;
        let Some(engine) = self.combat.as_mut() else {
            return Err(Fault::new(mode, "combat command with no enemy"));
        };
        let events = engine.round(action, p, self.registry, &mut self.rng);
        let outcome = engine.outcome();
        for event in events {
            self.say(event.to_string());
        }
        if let Some(outcome) = outcome {
            self.combat = None;
            self.after_combat(p, outcome);
        }
        Ok(())
    }

    fn after_combat(&mut self, p: &mut Player, outcome: CombatOutcome) {
        match outcome {
            CombatOutcome::Victory | CombatOutcome::Flight => {
                self.mode = GameMode::Exploring;
                for id in check_progress(p, self.registry) {
                    self.announce(id);
                }
                self.settle(p);
            }
            CombatOutcome::Death => self.enter_dead(p),
            CombatOutcome::SanityBreak => self.enter_ending(p),
        }
    }

    // ---- Level-up ----

    fn enter_level_up(&mut self, p: &mut Player) {
        let Some(level_up) = p.level_up() else {
            return;
        };
        self.say(format!("You reach level {}!", level_up.level));
        if let Some(skill) = level_up.skill {
            self.say(format!("You learn {}.", skill.name()));
        }
        self.upgrades = sample_upgrades(&mut self.rng, UPGRADE_CHOICES);
        self.mode = GameMode::LevelUp;
    }

    fn choose_upgrade(&mut self, p: &mut Player, index: usize) -> Result<(), Fault> {
        let Some(upgrade) = self.upgrades.get(index).copied() else {
            return Ok(());
        };
        upgrade.apply(p);
        self.say(format!("Upgrade: {}", upgrade.description()));
        self.upgrades.clear();
        self.mode = GameMode::Exploring;
        self.settle(p);
        Ok(())
    }

    // ---- Death and endings ----

    fn enter_dead(&mut self, p: &mut Player) {
        p.death_count += 1;
        log::info!("Player died (death {})", p.death_count);
        self.prompt = Prompt::None;
        self.mode = GameMode::Dead;
        self.say("You have fallen.");
    }

    /// Gold needed to come back from the current zone.
    pub fn resurrection_cost(&self, player: &Player) -> i32 {
        let depth = self.registry.zone(player.zone).map_or(1, |z| z.depth) as i32;
        RESURRECTION_BASE_COST + depth * RESURRECTION_COST_PER_DEPTH
    }

    fn resurrect(&mut self, p: &mut Player) -> Result<(), Fault> {
        let cost = self.resurrection_cost(p);
        if p.gold < cost {
            self.reject(ActionError::InsufficientGold {
                cost,
                available: p.gold,
            });
            return Ok(());
        }
        p.modify_stat(Stat::Gold, -cost, &mut self.rng);
        p.health = (p.health_max as f64 * RESURRECTION_RESTORE_FRACTION) as i32;
        p.sanity = (p.sanity_max as f64 * RESURRECTION_RESTORE_FRACTION) as i32;
        p.zone = START_ZONE;
        p.rest_count = 0;
        p.statuses.clear();
        self.mode = GameMode::Exploring;
        self.say(format!("You wake in Ulthar, {} gold poorer.", cost));
        Ok(())
    }

    fn reload_autosave(&mut self) {
        let loaded = self
            .store
            .load(Slot::Auto)
            .and_then(|snapshot| deserialize(&snapshot, self.registry));
        match loaded {
            Ok(player) => {
                self.say("You return to your last waking memory.");
                self.start_run(player);
            }
            Err(e) => {
                log::warn!("Autosave reload failed: {}", e);
                self.say(format!("No autosave to return to: {}", e));
            }
        }
    }

    fn enter_ending(&mut self, p: &mut Player) {
        let summary = RunSummary::of(p);
        let at_kadath = matches!(
            summary.ending,
            Ending::True | Ending::Dreamer | Ending::Fractured
        );
        if at_kadath && p.has_flag(StoryFlag::Pacifist) && p.unlock(AchievementId::PacifistEnd) {
            self.announce(AchievementId::PacifistEnd);
        }
        if at_kadath && p.new_game_plus && p.unlock(AchievementId::CycleBreaker) {
            self.announce(AchievementId::CycleBreaker);
        }
        log::info!("Run ended: {:?}", summary);
        self.say(format!("{}: {}", summary.ending.title(), summary.ending.description()));
        self.summary = Some(summary);
        self.last_run = Some(p.clone());
        self.prompt = Prompt::None;
        self.mode = GameMode::Ending;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::manager::MemoryStore;
    use crate::registry::Registry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn machine(registry: &Registry) -> GameStateMachine<'_, ChaCha8Rng> {
        GameStateMachine::new(
            registry,
            Box::new(MemoryStore::new()),
            ChaCha8Rng::seed_from_u64(5),
        )
    }

    #[test]
    fn test_only_nyarlathotep_marks_the_crawling_chaos_seen() {
        let registry = Registry::standard();
        for id in ["nodens", "hastur"] {
            let mut m = machine(&registry);
            let mut p = Player::new(&registry);
            m.meet_entity(&mut p, registry.enemy(id).unwrap());
            assert!(p.has_flag(StoryFlag::VeilTorn), "{}", id);
            assert!(!p.has_flag(StoryFlag::NyarlathotepSeen), "{}", id);
        }

        let mut m = machine(&registry);
        let mut p = Player::new(&registry);
        m.meet_entity(&mut p, registry.enemy("nyarlathotep").unwrap());
        assert!(p.has_flag(StoryFlag::NyarlathotepSeen));
        assert_eq!(m.mode(), GameMode::Combat);
    }

    #[test]
    fn test_nodens_blesses_without_a_fight() {
        let registry = Registry::standard();
        let mut m = machine(&registry);
        let mut p = Player::new(&registry);
        m.meet_entity(&mut p, registry.enemy("nodens").unwrap());
        assert!(p.has_flag(StoryFlag::NodensBlessed));
        assert!(m.combat().is_none());
        assert_eq!(p.sanity, 100);
    }
}
