use std::fmt;

use crate::items::DamageType;

/// Enemy template from the bestiary. Combat works on an [`Enemy`] clone.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub max_health: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub damage_type: DamageType,
    pub defense: i32,
    pub speed: i32,
    pub xp: u32,
    pub gold: (i32, i32),
    /// (item id, drop probability), each rolled independently on victory.
    pub loot: Vec<(&'static str, f64)>,
    pub boss: bool,
    /// Outer entity: drains sanity every turn and rarely appears by chance.
    pub cosmic: bool,
    /// Non-combative entities never start a fight; meeting them only costs sanity.
    pub combative: bool,
    /// Sanity lost once when the encounter begins.
    pub sanity_damage: i32,
}

/// A live enemy for the duration of one combat.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub template: EnemyTemplate,
    pub health: i32,
}

impl Enemy {
    pub fn from_template(template: &EnemyTemplate) -> Self {
        Self {
            health: template.max_health,
            template: template.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.template.name
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllyTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub max_health: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub defense: i32,
}

/// A companion fighting beside the player. Fallen allies are gone for good.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ally {
    pub id: &'static str,
    pub name: &'static str,
    pub health: i32,
    pub max_health: i32,
    pub min_damage: i32,
    pub max_damage: i32,
    pub defense: i32,
}

impl Ally {
    pub fn from_template(template: &AllyTemplate) -> Self {
        Self {
            id: template.id,
            name: template.name,
            health: template.max_health,
            max_health: template.max_health,
            min_damage: template.min_damage,
            max_damage: template.max_damage,
            defense: template.defense,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Player-turn choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    /// Index into the player's usable consumables, in inventory order.
    UseItem(usize),
    Dodge,
    Flee,
    CastSpell,
    SummonAlly,
    /// Calls on a random known combat ritual.
    GreaterRitual,
}

/// Terminal outcome of a combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    Victory,
    Flight,
    Death,
    SanityBreak,
}

/// Who the enemy struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Player,
    Ally(&'static str),
}

/// Everything that happened during combat, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEvent {
    Encounter {
        enemy: &'static str,
    },
    Dread {
        sanity_lost: i32,
    },
    /// Catatonia froze the player for this turn.
    Frozen,
    PlayerAttack {
        damage: i32,
    },
    AllyAttack {
        ally: &'static str,
        damage: i32,
    },
    WeaponWorn {
        remaining: u32,
    },
    WeaponBroke {
        weapon: &'static str,
    },
    ArmorBroke {
        armor: &'static str,
    },
    ItemUsed {
        item: &'static str,
    },
    Evading,
    Fled,
    FleeFailed,
    SpellCast {
        damage: i32,
    },
    AllySummoned {
        ally: &'static str,
    },
    EtherealForm {
        turns: u32,
    },
    NodensInvoked {
        damage: i32,
    },
    /// The player's action was rejected. Nothing else happened this round.
    Failed {
        reason: String,
    },
    Dodged,
    Warded,
    EnemyAttack {
        target: Target,
        damage: i32,
    },
    AllyFell {
        ally: &'static str,
    },
    HorrorDrain {
        sanity_lost: i32,
    },
    CosmicDrain {
        sanity_lost: i32,
    },
    Victory {
        xp: u32,
        gold: i32,
        loot: Vec<&'static str>,
    },
    /// Loot that rolled successfully but did not fit in the inventory.
    LootLost {
        item: &'static str,
    },
    Outcome(CombatOutcome),
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::Encounter { enemy } => write!(f, "{} appears!", enemy),
            CombatEvent::Dread { sanity_lost } => {
                write!(f, "Its presence gnaws at your mind (-{} sanity)", sanity_lost)
            }
            CombatEvent::Frozen => write!(f, "You are frozen in place and cannot act"),
            CombatEvent::PlayerAttack { damage } => write!(f, "You deal {} damage", damage),
            CombatEvent::AllyAttack { ally, damage } => {
                write!(f, "{} deals {} damage", ally, damage)
            }
            CombatEvent::WeaponWorn { remaining } => {
                write!(f, "Weapon durability: {}", remaining)
            }
            CombatEvent::WeaponBroke { weapon } => write!(f, "Your {} breaks!", weapon),
            CombatEvent::ArmorBroke { armor } => write!(f, "Your {} falls apart!", armor),
            CombatEvent::ItemUsed { item } => write!(f, "You use {}", item),
            CombatEvent::Evading => write!(f, "You prepare to dodge"),
            CombatEvent::Fled => write!(f, "You escape!"),
            CombatEvent::FleeFailed => write!(f, "You fail to escape"),
            CombatEvent::SpellCast { damage } => {
                write!(f, "Your spell deals {} damage", damage)
            }
            CombatEvent::AllySummoned { ally } => write!(f, "{} answers your call", ally),
            CombatEvent::EtherealForm { turns } => {
                write!(f, "Your body thins to mist ({} turns untouchable)", turns)
            }
            CombatEvent::NodensInvoked { damage } => {
                write!(f, "Nodens answers from the abyss, dealing {} damage", damage)
            }
            CombatEvent::Failed { reason } => write!(f, "{}", reason),
            CombatEvent::Dodged => write!(f, "You dodge the attack!"),
            CombatEvent::Warded => write!(f, "Your ward turns the blow aside"),
            CombatEvent::EnemyAttack { target, damage } => match target {
                Target::Player => write!(f, "You take {} damage", damage),
                Target::Ally(name) => write!(f, "{} takes {} damage", name, damage),
            },
            CombatEvent::AllyFell { ally } => write!(f, "{} has fallen", ally),
            CombatEvent::HorrorDrain { sanity_lost } => {
                write!(f, "Horror seeps into you (-{} sanity)", sanity_lost)
            }
            CombatEvent::CosmicDrain { sanity_lost } => {
                write!(f, "The entity unravels your thoughts (-{} sanity)", sanity_lost)
            }
            CombatEvent::Victory { xp, gold, loot } => {
                write!(f, "Victory! +{} XP, +{} gold", xp, gold)?;
                if !loot.is_empty() {
                    write!(f, ", found {}", loot.join(", "))?;
                }
                Ok(())
            }
            CombatEvent::LootLost { item } => write!(f, "No room to carry {}", item),
            CombatEvent::Outcome(outcome) => match outcome {
                CombatOutcome::Victory => write!(f, "The enemy is vanquished"),
                CombatOutcome::Flight => write!(f, "You leave the fight behind"),
                CombatOutcome::Death => write!(f, "You have died"),
                CombatOutcome::SanityBreak => write!(f, "Your mind shatters"),
            },
        }
    }
}
