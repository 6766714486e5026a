//! Keypress to command mapping.
//!
//! The same key means different things in different modes; a pending
//! [`Prompt`] (picking a slot, a destination, an item) takes precedence over
//! the mode's own keys.

use crate::character::manager::Slot;
use crate::character::spells::Spell;
use crate::combat::types::CombatAction;
use crate::core::game_state::GameMode;

/// What the next inventory pick will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryAction {
    Equip,
    Use,
    Discard,
}

/// A follow-up choice the machine is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    None,
    LoadSlot,
    Destination,
    Inventory(InventoryAction),
    SaveSlot,
    CombatItem,
    /// Where an open portal leads, by index into the visited places.
    PortalDestination,
}

/// A decoded player command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // ── Menu ────────────────────────────────────────────────────
    NewGame,
    Continue,
    LoadSlot(Slot),
    NewGamePlus,
    Quit,

    // ── Exploring ───────────────────────────────────────────────
    Explore,
    Travel,
    TravelTo(usize),
    Rest,
    OpenShop,
    Talk,

    // ── Side screens ────────────────────────────────────────────
    OpenInventory,
    OpenMap,
    OpenQuests,
    OpenHelp,
    OpenBestiary,
    OpenRituals,
    Pause,
    ShowAchievements,
    /// Leave the current screen.
    Back,

    // ── Combat ──────────────────────────────────────────────────
    Fight(CombatAction),
    PickCombatItem,

    // ── Rituals ─────────────────────────────────────────────────
    CastRitual(Spell),
    PortalTo(usize),

    // ── Inventory and shop ──────────────────────────────────────
    BeginInventory(InventoryAction),
    InventoryPick(usize),
    Buy(usize),

    // ── Pause ───────────────────────────────────────────────────
    BeginSave,
    SaveTo(Slot),
    Resume,
    SaveAndQuit,

    // ── Level-up and death ──────────────────────────────────────
    ChooseUpgrade(usize),
    Resurrect,
    ReloadAutosave,
    GiveUp,

    /// Dismiss a pending prompt without acting.
    Cancel,
}

/// Maps `1`-`9` to 0-8 and `a`-`f` to 9-14, enough to address a full inventory.
pub fn list_index(key: char) -> Option<usize> {
    match key {
        '1'..='9' => Some(key as usize - '1' as usize),
        'a'..='f' => Some(key as usize - 'a' as usize + 9),
        _ => None,
    }
}

fn digit(key: char) -> Option<usize> {
    key.to_digit(10).map(|d| d as usize)
}

/// Decodes a key for the given mode and prompt. Unmapped keys yield `None`.
pub fn map_key(mode: GameMode, prompt: Prompt, key: char) -> Option<Command> {
    match prompt {
        Prompt::None => {}
        Prompt::LoadSlot => {
            return Some(
                digit(key)
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| Slot::LOADABLE.get(i).copied())
                    .map_or(Command::Cancel, Command::LoadSlot),
            )
        }
        Prompt::Destination => {
            return Some(match digit(key) {
                Some(n @ 1..=9) => Command::TravelTo(n - 1),
                _ => Command::Cancel,
            })
        }
        Prompt::Inventory(_) => {
            return Some(list_index(key).map_or(Command::Cancel, Command::InventoryPick))
        }
        Prompt::SaveSlot => {
            return Some(
                digit(key)
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| Slot::MANUAL.get(i).copied())
                    .map_or(Command::Cancel, Command::SaveTo),
            )
        }
        Prompt::CombatItem => {
            return match digit(key) {
                Some(0) => Some(Command::Cancel),
                Some(n @ 1..=9) => Some(Command::Fight(CombatAction::UseItem(n - 1))),
                // a stray key keeps the picker open
                _ => None,
            }
        }
        Prompt::PortalDestination => {
            return Some(match digit(key) {
                Some(n @ 1..=9) => Command::PortalTo(n - 1),
                _ => Command::Cancel,
            })
        }
    }

    match mode {
        GameMode::Menu => match key {
            'n' => Some(Command::NewGame),
            'c' => Some(Command::Continue),
            'g' => Some(Command::NewGamePlus),
            'b' => Some(Command::OpenBestiary),
            's' => Some(Command::Quit),
            _ => None,
        },
        GameMode::Exploring => match key {
            '1' => Some(Command::Explore),
            '2' => Some(Command::Travel),
            '3' => Some(Command::Rest),
            '4' => Some(Command::OpenShop),
            '5' => Some(Command::Talk),
            'i' => Some(Command::OpenInventory),
            'm' => Some(Command::OpenMap),
            'p' => Some(Command::Pause),
            'q' => Some(Command::OpenQuests),
            'r' => Some(Command::OpenRituals),
            '?' => Some(Command::OpenHelp),
            'b' => Some(Command::OpenBestiary),
            _ => None,
        },
        GameMode::Combat => match key {
            '1' => Some(Command::Fight(CombatAction::Attack)),
            '2' => Some(Command::PickCombatItem),
            '3' => Some(Command::Fight(CombatAction::Dodge)),
            '4' => Some(Command::Fight(CombatAction::Flee)),
            '5' => Some(Command::Fight(CombatAction::CastSpell)),
            '6' => Some(Command::Fight(CombatAction::SummonAlly)),
            '7' => Some(Command::Fight(CombatAction::GreaterRitual)),
            _ => None,
        },
        GameMode::Ritual => match key {
            'o' => Some(Command::CastRitual(Spell::OpenPortal)),
            'v' => Some(Command::CastRitual(Spell::SeeInvisible)),
            'x' => Some(Command::Back),
            _ => None,
        },
        GameMode::Inventory => match key {
            'e' => Some(Command::BeginInventory(InventoryAction::Equip)),
            'u' => Some(Command::BeginInventory(InventoryAction::Use)),
            'd' => Some(Command::BeginInventory(InventoryAction::Discard)),
            'x' => Some(Command::Back),
            _ => None,
        },
        GameMode::Shop => match key {
            'x' => Some(Command::Back),
            _ => list_index(key).map(Command::Buy),
        },
        GameMode::Paused => match key {
            'g' => Some(Command::BeginSave),
            'm' => Some(Command::OpenMap),
            'q' => Some(Command::OpenQuests),
            'l' => Some(Command::ShowAchievements),
            '?' => Some(Command::OpenHelp),
            'x' => Some(Command::Resume),
            's' => Some(Command::SaveAndQuit),
            _ => None,
        },
        GameMode::LevelUp => match digit(key) {
            Some(n @ 1..=3) => Some(Command::ChooseUpgrade(n - 1)),
            _ => None,
        },
        GameMode::Dead => match key {
            '1' => Some(Command::Resurrect),
            '2' => Some(Command::ReloadAutosave),
            '3' => Some(Command::GiveUp),
            _ => None,
        },
        GameMode::Ending
        | GameMode::Map
        | GameMode::Quests
        | GameMode::Help
        | GameMode::Bestiary => Some(Command::Back),
    }
}

/// Key legend for the current mode, for the status bar.
pub fn legend(mode: GameMode, prompt: Prompt) -> &'static str {
    match prompt {
        Prompt::LoadSlot => return "[1] auto  [2-4] slot 1-3  [5] crash  [any] cancel",
        Prompt::Destination => return "[1-9] destination  [any] cancel",
        Prompt::Inventory(_) => return "[1-9, a-f] item  [any] cancel",
        Prompt::SaveSlot => return "[1-3] slot  [any] cancel",
        Prompt::CombatItem => return "[1-9] item  [0] cancel",
        Prompt::PortalDestination => return "[1-9] place  [any] cancel",
        Prompt::None => {}
    }
    match mode {
        GameMode::Menu => "[n] new  [c] continue  [g] new game+  [b] bestiary  [s] quit",
        GameMode::Exploring => {
            "[1] explore [2] travel [3] rest [4] shop [5] talk [i] inv [m] map [p] pause [q] quests [r] rituals [?] help [b] bestiary"
        }
        GameMode::Combat => "[1] attack [2] item [3] dodge [4] flee [5] spell [6] summon [7] ritual",
        GameMode::Ritual => "[o] open portal  [v] see the invisible  [x] back",
        GameMode::Inventory => "[e] equip  [u] use  [d] discard  [x] back",
        GameMode::Shop => "[1-9] buy  [x] back",
        GameMode::Paused => {
            "[g] save [m] map [q] quests [l] achievements [?] help [x] resume [s] save & quit"
        }
        GameMode::LevelUp => "[1-3] choose an upgrade",
        GameMode::Dead => "[1] resurrect  [2] reload autosave  [3] end the journey",
        GameMode::Ending | GameMode::Map | GameMode::Quests | GameMode::Help | GameMode::Bestiary => {
            "[any] back"
        }
    }
}
