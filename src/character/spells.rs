//! Rituals: spells learned through skills and quests, paid for in willpower.
//!
//! Field rituals are cast from the ritual screen while exploring. Combat
//! rituals are only reached through the greater ritual in a fight.

use super::player::{Player, Stat};
use crate::core::constants::*;
use crate::error::ActionError;
use crate::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Spell {
    /// Step through to a zone already visited.
    OpenPortal,
    /// Reveal everything still hidden in the current zone.
    SeeInvisible,
    EtherealForm,
    InvokeNodens,
}

impl Spell {
    pub const ALL: [Spell; 4] = [
        Spell::OpenPortal,
        Spell::SeeInvisible,
        Spell::EtherealForm,
        Spell::InvokeNodens,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Spell::OpenPortal => "open_portal",
            Spell::SeeInvisible => "see_invisible",
            Spell::EtherealForm => "ethereal_form",
            Spell::InvokeNodens => "invoke_nodens",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Spell::OpenPortal => "Open Portal",
            Spell::SeeInvisible => "See the Invisible",
            Spell::EtherealForm => "Ethereal Form",
            Spell::InvokeNodens => "Invoke Nodens",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Spell::OpenPortal => "Travel to a place you have already dreamed of",
            Spell::SeeInvisible => "Reveal the hidden objects of this place",
            Spell::EtherealForm => "Immune to attacks for 3 turns",
            Spell::InvokeNodens => "The Lord of the Great Abyss strikes your foe",
        }
    }

    /// Willpower spent per casting. Combat rituals share the greater ritual's cost.
    pub fn cost(&self) -> i32 {
        match self {
            Spell::OpenPortal => OPEN_PORTAL_COST,
            Spell::SeeInvisible => SEE_INVISIBLE_COST,
            Spell::EtherealForm | Spell::InvokeNodens => GREATER_RITUAL_COST,
        }
    }

    pub fn is_combat_ritual(&self) -> bool {
        matches!(self, Spell::EtherealForm | Spell::InvokeNodens)
    }
}

impl Player {
    pub fn knows_spell(&self, spell: Spell) -> bool {
        self.spells.contains(&spell)
    }

    pub fn learn_spell(&mut self, spell: Spell) -> bool {
        let learned = self.spells.insert(spell);
        if learned {
            log::info!("Spell learned: {}", spell.id());
        }
        learned
    }

    /// Checks that `spell` is known and affordable. Mutates nothing.
    pub fn check_spell(&self, spell: Spell) -> Result<(), ActionError> {
        if !self.knows_spell(spell) {
            return Err(ActionError::UnknownSpell(spell.name()));
        }
        if self.willpower < spell.cost() {
            return Err(ActionError::InsufficientWillpower {
                cost: spell.cost(),
                available: self.willpower,
            });
        }
        Ok(())
    }

    /// Pays for a checked spell.
    pub fn spend_on(&mut self, spell: Spell, rng: &mut impl rand::Rng) {
        self.modify_stat(Stat::Willpower, -spell.cost(), rng);
    }

    /// Visited zones a portal can reach: never the current one, never Kadath.
    pub fn portal_destinations(&self, registry: &Registry) -> Vec<&'static str> {
        self.visited_zones
            .iter()
            .copied()
            .filter(|id| *id != self.zone)
            .filter(|id| registry.zone(id).is_some_and(|z| !z.is_final()))
            .collect()
    }
}
