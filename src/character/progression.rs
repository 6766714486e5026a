//! Experience thresholds, level-gated skills and level-up upgrades.

use rand::seq::SliceRandom;
use rand::Rng;

use super::flags::StoryFlag;
use super::player::Player;
use super::spells::Spell;
use crate::core::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Skill {
    /// Chance to slip past every encounter while exploring.
    SilentStep,
    DreamSight,
    /// Unlocks the combat spell.
    MinorSpell,
    DreamPact,
    MistForm,
    /// Unlocks the greater ritual in combat.
    GreaterRitual,
    /// Unlocks summoning an oneiric cat in combat.
    SummonAlly,
    CosmicSight,
    DreamAvatar,
}

impl Skill {
    pub const ALL: [Skill; 9] = [
        Skill::SilentStep,
        Skill::DreamSight,
        Skill::MinorSpell,
        Skill::DreamPact,
        Skill::MistForm,
        Skill::GreaterRitual,
        Skill::SummonAlly,
        Skill::CosmicSight,
        Skill::DreamAvatar,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Skill::SilentStep => "silent_step",
            Skill::DreamSight => "dream_sight",
            Skill::MinorSpell => "minor_spell",
            Skill::DreamPact => "dream_pact",
            Skill::MistForm => "mist_form",
            Skill::GreaterRitual => "greater_ritual",
            Skill::SummonAlly => "summon_ally",
            Skill::CosmicSight => "cosmic_sight",
            Skill::DreamAvatar => "dream_avatar",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::SilentStep => "Silent Step",
            Skill::DreamSight => "Dream Sight",
            Skill::MinorSpell => "Minor Conjuration",
            Skill::DreamPact => "Oneiric Pact",
            Skill::MistForm => "Mist Form",
            Skill::GreaterRitual => "Greater Ritual",
            Skill::SummonAlly => "Summon Ally",
            Skill::CosmicSight => "Cosmic Sight",
            Skill::DreamAvatar => "Avatar of Dreams",
        }
    }

    /// The skill granted on reaching `level`, if any.
    pub fn unlocked_at(level: u32) -> Option<Skill> {
        match level {
            2 => Some(Skill::SilentStep),
            3 => Some(Skill::DreamSight),
            4 => Some(Skill::MinorSpell),
            5 => Some(Skill::DreamPact),
            6 => Some(Skill::MistForm),
            7 => Some(Skill::GreaterRitual),
            8 => Some(Skill::SummonAlly),
            9 => Some(Skill::CosmicSight),
            10 => Some(Skill::DreamAvatar),
            _ => None,
        }
    }

    /// The ritual that comes with learning this skill.
    pub fn grants_spell(&self) -> Option<Spell> {
        match self {
            Skill::DreamSight => Some(Spell::SeeInvisible),
            Skill::GreaterRitual => Some(Spell::EtherealForm),
            _ => None,
        }
    }
}

/// Total experience needed to reach `level`.
pub fn xp_threshold(level: u32) -> u32 {
    XP_TABLE
        .iter()
        .find(|(l, _)| *l == level)
        .map_or(XP_UNREACHABLE, |(_, xp)| *xp)
}

/// Outcome of a single level increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub level: u32,
    /// Set only when the skill was newly learned.
    pub skill: Option<Skill>,
}

impl Player {
    pub fn can_level_up(&self) -> bool {
        self.level < LEVEL_CAP && self.experience >= xp_threshold(self.level + 1)
    }

    /// Raises the level by exactly one if the next threshold is met.
    pub fn level_up(&mut self) -> Option<LevelUp> {
        if !self.can_level_up() {
            return None;
        }
        self.level += 1;
        let skill = Skill::unlocked_at(self.level).filter(|s| self.learn_skill(*s));
        log::info!("Reached level {} (skill: {:?})", self.level, skill);
        Some(LevelUp {
            level: self.level,
            skill,
        })
    }

    /// Adds `skill` and any ritual it grants. False if already known.
    pub fn learn_skill(&mut self, skill: Skill) -> bool {
        if let Some(spell) = skill.grants_spell() {
            self.learn_spell(spell);
        }
        self.skills.insert(skill)
    }

    pub fn gain_experience(&mut self, amount: u32) {
        self.experience = self.experience.saturating_add(amount);
    }
}

/// Permanent bonuses offered on level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upgrade {
    Vitality,
    Clarity,
    Resolve,
    Ferocity,
    Fortitude,
    Swiftness,
    Composure,
    LucidDreaming,
}

impl Upgrade {
    pub const ALL: [Upgrade; 8] = [
        Upgrade::Vitality,
        Upgrade::Clarity,
        Upgrade::Resolve,
        Upgrade::Ferocity,
        Upgrade::Fortitude,
        Upgrade::Swiftness,
        Upgrade::Composure,
        Upgrade::LucidDreaming,
    ];

    pub fn description(&self) -> &'static str {
        match self {
            Upgrade::Vitality => "+15 max health",
            Upgrade::Clarity => "+15 max sanity",
            Upgrade::Resolve => "+15 max willpower",
            Upgrade::Ferocity => "+10% damage",
            Upgrade::Fortitude => "+10% damage resistance",
            Upgrade::Swiftness => "+2 speed",
            Upgrade::Composure => "+5% sanity resistance",
            Upgrade::LucidDreaming => "Lucid dreaming",
        }
    }

    pub fn apply(&self, player: &mut Player) {
        match self {
            Upgrade::Vitality => {
                player.health_max += 15;
                player.health = (player.health + 15).min(player.health_max);
            }
            Upgrade::Clarity => {
                player.sanity_max += 15;
                player.sanity = (player.sanity + 15).min(player.sanity_max);
            }
            Upgrade::Resolve => {
                player.willpower_max += 15;
                player.willpower = (player.willpower + 15).min(player.willpower_max);
            }
            Upgrade::Ferocity => player.damage_bonus += 0.10,
            Upgrade::Fortitude => player.resist_bonus += 0.10,
            Upgrade::Swiftness => player.base_speed += 2,
            Upgrade::Composure => player.sanity_resist_bonus += 0.05,
            Upgrade::LucidDreaming => player.set_flag(StoryFlag::LucidDreaming),
        }
    }
}

/// Draws `count` distinct upgrades to choose from.
pub fn sample_upgrades(rng: &mut impl Rng, count: usize) -> Vec<Upgrade> {
    let mut pool = Upgrade::ALL.to_vec();
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn player() -> Player {
        Player::new(&Registry::standard())
    }

    #[test]
    fn test_xp_thresholds() {
        assert_eq!(xp_threshold(2), 100);
        assert_eq!(xp_threshold(5), 500);
        assert_eq!(xp_threshold(10), 3600);
        assert_eq!(xp_threshold(11), XP_UNREACHABLE);
        assert_eq!(xp_threshold(1), XP_UNREACHABLE);
    }

    #[test]
    fn test_level_up_requires_threshold() {
        let mut p = player();
        p.experience = 99;
        assert!(!p.can_level_up());
        assert_eq!(p.level_up(), None);
        assert_eq!(p.level, 1);

        p.experience = 100;
        let up = p.level_up().unwrap();
        assert_eq!(up.level, 2);
        assert_eq!(up.skill, Some(Skill::SilentStep));
        assert!(p.has_skill(Skill::SilentStep));
    }

    #[test]
    fn test_level_up_one_step_at_a_time() {
        let mut p = player();
        p.experience = 3600;
        p.level_up();
        assert_eq!(p.level, 2);
        assert!(p.can_level_up());
        while p.level_up().is_some() {}
        assert_eq!(p.level, LEVEL_CAP);
        assert!(!p.can_level_up());
    }

    #[test]
    fn test_skill_grant_idempotent() {
        let mut p = player();
        p.skills.insert(Skill::SilentStep);
        p.experience = 100;
        let up = p.level_up().unwrap();
        assert_eq!(up.skill, None);
        assert_eq!(p.skills.len(), 1);
    }

    #[test]
    fn test_upgrades_raise_max_and_current() {
        let mut p = player();
        p.health = 50;
        Upgrade::Vitality.apply(&mut p);
        assert_eq!(p.health_max, 115);
        assert_eq!(p.health, 65);
        Upgrade::Clarity.apply(&mut p);
        assert_eq!(p.sanity_max, 115);
        assert_eq!(p.sanity, 115);
        Upgrade::LucidDreaming.apply(&mut p);
        assert!(p.has_flag(StoryFlag::LucidDreaming));
    }

    #[test]
    fn test_sample_upgrades_distinct() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            let picks = sample_upgrades(&mut rng, UPGRADE_CHOICES);
            assert_eq!(picks.len(), 3);
            assert_ne!(picks[0], picks[1]);
            assert_ne!(picks[1], picks[2]);
            assert_ne!(picks[0], picks[2]);
        }
    }

    #[test]
    fn test_greater_ritual_at_level_seven_teaches_ethereal_form() {
        let mut p = player();
        p.level = 6;
        p.experience = xp_threshold(7);
        let up = p.level_up().unwrap();
        assert_eq!(up.skill, Some(Skill::GreaterRitual));
        assert!(p.knows_spell(Spell::EtherealForm));
        assert!(!p.knows_spell(Spell::InvokeNodens));
    }

    #[test]
    fn test_dream_sight_teaches_see_invisible() {
        let mut p = player();
        assert!(p.learn_skill(Skill::DreamSight));
        assert!(p.knows_spell(Spell::SeeInvisible));
        assert!(!p.learn_skill(Skill::DreamSight));
    }

    #[test]
    fn test_skill_ids_roundtrip() {
        for skill in Skill::ALL {
            assert_eq!(Skill::from_id(skill.id()), Some(skill));
        }
    }
}
