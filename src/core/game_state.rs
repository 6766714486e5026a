//! The top-level game state machine.
//!
//! One keypress is one [`GameStateMachine::tick`]. Handlers live in
//! `game_logic`; this module owns the state, the message log and fault
//! recovery.

use std::collections::VecDeque;

use rand::Rng;

use super::ending::RunSummary;
use super::input::{map_key, Command, Prompt};
use crate::character::manager::{SaveStore, Slot, SlotStatus};
use crate::character::player::Player;
use crate::character::progression::Upgrade;
use crate::character::save::serialize;
use crate::combat::logic::CombatEngine;
use crate::core::constants::MESSAGE_LOG_CAPACITY;
use crate::error::Fault;
use crate::registry::Registry;

/// Screens and phases of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Menu,
    Exploring,
    Combat,
    Inventory,
    Shop,
    Ritual,
    Map,
    Paused,
    LevelUp,
    Dead,
    Ending,
    Quests,
    Help,
    Bestiary,
}

pub struct GameStateMachine<'r, R: Rng> {
    pub(super) registry: &'r Registry,
    pub(super) store: Box<dyn SaveStore>,
    pub(super) rng: R,
    pub(super) mode: GameMode,
    pub(super) prompt: Prompt,
    /// Where passive screens go back to.
    pub(super) return_to: GameMode,
    pub(super) player: Option<Player>,
    pub(super) combat: Option<CombatEngine>,
    pub(super) upgrades: Vec<Upgrade>,
    pub(super) summary: Option<RunSummary>,
    /// The last finished run, seed for New Game+.
    pub(super) last_run: Option<Player>,
    pub(super) messages: VecDeque<String>,
    pub(super) autosave_on_travel: bool,
    pub(super) quit: bool,
}

impl<'r, R: Rng> GameStateMachine<'r, R> {
    pub fn new(registry: &'r Registry, store: Box<dyn SaveStore>, rng: R) -> Self {
        Self {
            registry,
            store,
            rng,
            mode: GameMode::Menu,
            prompt: Prompt::None,
            return_to: GameMode::Menu,
            player: None,
            combat: None,
            upgrades: Vec::new(),
            summary: None,
            last_run: None,
            messages: VecDeque::with_capacity(MESSAGE_LOG_CAPACITY),
            autosave_on_travel: true,
            quit: false,
        }
    }

    pub fn with_autosave_on_travel(mut self, enabled: bool) -> Self {
        self.autosave_on_travel = enabled;
        self
    }

    // ---- Accessors ----

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    pub fn combat(&self) -> Option<&CombatEngine> {
        self.combat.as_ref()
    }

    /// Upgrades on offer while in `LevelUp`.
    pub fn upgrades(&self) -> &[Upgrade] {
        &self.upgrades
    }

    pub fn summary(&self) -> Option<&RunSummary> {
        self.summary.as_ref()
    }

    /// Player shown on the bestiary screen: the current run, else the last one.
    pub fn bestiary_owner(&self) -> Option<&Player> {
        self.player.as_ref().or(self.last_run.as_ref())
    }

    /// Most recent message last.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn slot_status(&self, slot: Slot) -> SlotStatus {
        self.store.status(slot)
    }

    // ---- Driving ----

    /// Reads one key and handles it. Letters are case-insensitive;
    /// unmapped keys are ignored.
    pub fn tick(&mut self, key: char) {
        if let Some(command) = map_key(self.mode, self.prompt, key.to_ascii_lowercase()) {
            self.apply(command);
        }
    }

    /// Handles one command, recovering from any internal fault.
    pub fn apply(&mut self, command: Command) {
        let mode = self.mode;
        if let Err(fault) = self.dispatch(command) {
            self.recover(fault);
        } else if self.mode != mode {
            log::debug!("Mode {:?} -> {:?}", mode, self.mode);
        }
    }

    /// Best-effort capture of the current player, for when the input channel fails.
    pub fn emergency_save(&mut self) -> bool {
        let Some(player) = self.player.as_ref() else {
            return false;
        };
        match self.store.save(Slot::Crash, &serialize(player)) {
            Ok(()) => {
                log::warn!("Emergency snapshot written to the crash slot");
                true
            }
            Err(e) => {
                log::error!("Emergency snapshot failed: {}", e);
                false
            }
        }
    }

    fn recover(&mut self, fault: Fault) {
        log::error!("{}", fault);
        let saved = self.emergency_save();
        self.combat = None;
        self.prompt = Prompt::None;
        self.upgrades.clear();
        self.mode = GameMode::Menu;
        self.say(format!("Something went wrong: {}", fault.reason));
        if saved {
            self.say("Your progress was saved to the crash slot.");
        }
    }

    pub(super) fn say(&mut self, message: impl Into<String>) {
        if self.messages.len() == MESSAGE_LOG_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(message.into());
    }

    pub(super) fn fault(&self, reason: impl Into<String>) -> Fault {
        Fault::new(self.mode, reason)
    }

    /// Runs `f` with the current player taken out of `self`, putting it back
    /// afterwards even when `f` fails. `f` must not replace `self.player`.
    pub(super) fn with_player<T>(
        &mut self,
        f: impl FnOnce(&mut Self, &mut Player) -> Result<T, Fault>,
    ) -> Result<T, Fault> {
        let Some(mut player) = self.player.take() else {
            return Err(self.fault("no player in play"));
        };
        let result = f(self, &mut player);
        self.player = Some(player);
        result
    }
}
