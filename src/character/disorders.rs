//! Sanity-driven disorders.
//!
//! Each sanity change rolls against the current tier: below 25 a second
//! disorder can take hold, below 50 only a first one, and from 75 up the
//! most recent disorder may fade.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::player::Player;
use crate::core::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disorder {
    /// Incoming damage is increased.
    Paranoia,
    Hallucinations,
    Amnesia,
    /// Outgoing damage is increased.
    Megalomania,
    /// The player may lose a combat turn.
    Catatonia,
    /// Resting is impossible.
    Insomnia,
}

impl Disorder {
    pub const ALL: [Disorder; 6] = [
        Disorder::Paranoia,
        Disorder::Hallucinations,
        Disorder::Amnesia,
        Disorder::Megalomania,
        Disorder::Catatonia,
        Disorder::Insomnia,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Disorder::Paranoia => "paranoia",
            Disorder::Hallucinations => "hallucinations",
            Disorder::Amnesia => "amnesia",
            Disorder::Megalomania => "megalomania",
            Disorder::Catatonia => "catatonia",
            Disorder::Insomnia => "insomnia",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.id() == id)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Disorder::Paranoia => "Paranoia",
            Disorder::Hallucinations => "Hallucinations",
            Disorder::Amnesia => "Amnesia",
            Disorder::Megalomania => "Megalomania",
            Disorder::Catatonia => "Catatonia",
            Disorder::Insomnia => "Insomnia",
        }
    }

    pub fn incoming_damage_multiplier(&self) -> f64 {
        match self {
            Disorder::Paranoia => PARANOIA_INCOMING_MULTIPLIER,
            _ => 1.0,
        }
    }

    pub fn outgoing_damage_multiplier(&self) -> f64 {
        match self {
            Disorder::Megalomania => MEGALOMANIA_OUTGOING_MULTIPLIER,
            _ => 1.0,
        }
    }

    pub fn skip_turn_chance(&self) -> f64 {
        match self {
            Disorder::Catatonia => CATATONIA_SKIP_CHANCE,
            _ => 0.0,
        }
    }

    pub fn prevents_rest(&self) -> bool {
        matches!(self, Disorder::Insomnia)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisorderChange {
    Acquired(Disorder),
    Recovered(Disorder),
}

impl fmt::Display for DisorderChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisorderChange::Acquired(d) => write!(f, "Your mind fractures: {}", d.name()),
            DisorderChange::Recovered(d) => write!(f, "You recover from {}", d.name()),
        }
    }
}

/// Rolls disorder acquisition or recovery for the player's current sanity.
pub fn reevaluate(player: &mut Player, rng: &mut impl Rng) -> Option<DisorderChange> {
    let held = player.disorders.len();
    let chance = if player.sanity < DISORDER_SEVERE_THRESHOLD && held < DISORDER_SEVERE_CAP {
        DISORDER_SEVERE_CHANCE
    } else if player.sanity < DISORDER_MILD_THRESHOLD && held < DISORDER_MILD_CAP {
        DISORDER_MILD_CHANCE
    } else if player.sanity >= DISORDER_RECOVERY_THRESHOLD && held > 0 {
        if rng.gen::<f64>() < DISORDER_RECOVERY_CHANCE {
            return player.disorders.pop().map(DisorderChange::Recovered);
        }
        return None;
    } else {
        return None;
    };

    if rng.gen::<f64>() >= chance {
        return None;
    }
    let candidates: Vec<Disorder> = Disorder::ALL
        .into_iter()
        .filter(|d| !player.disorders.contains(d))
        .collect();
    let disorder = *candidates.choose(rng)?;
    player.disorders.push(disorder);
    Some(DisorderChange::Acquired(disorder))
}

/// Product of the incoming damage multipliers of all held disorders.
pub fn incoming_multiplier(player: &Player) -> f64 {
    player
        .disorders
        .iter()
        .map(|d| d.incoming_damage_multiplier())
        .product()
}

pub fn outgoing_multiplier(player: &Player) -> f64 {
    player
        .disorders
        .iter()
        .map(|d| d.outgoing_damage_multiplier())
        .product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::player::Stat;
    use crate::registry::Registry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn player() -> Player {
        Player::new(&Registry::standard())
    }

    #[test]
    fn test_no_disorders_at_high_sanity() {
        let mut p = player();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..500 {
            p.sanity = 60;
            assert_eq!(reevaluate(&mut p, &mut rng), None);
        }
        assert!(p.disorders.is_empty());
    }

    #[test]
    fn test_mild_tier_caps_at_one() {
        let mut p = player();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        p.sanity = 40;
        for _ in 0..500 {
            reevaluate(&mut p, &mut rng);
        }
        assert_eq!(p.disorders.len(), 1);
    }

    #[test]
    fn test_severe_tier_caps_at_two_without_duplicates() {
        let mut p = player();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        p.sanity = 10;
        for _ in 0..500 {
            reevaluate(&mut p, &mut rng);
        }
        assert_eq!(p.disorders.len(), 2);
        assert_ne!(p.disorders[0], p.disorders[1]);
    }

    #[test]
    fn test_recovery_pops_latest() {
        let mut p = player();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        p.disorders = vec![Disorder::Amnesia, Disorder::Insomnia];
        p.sanity = 80;
        let mut first = None;
        for _ in 0..500 {
            if let Some(change) = reevaluate(&mut p, &mut rng) {
                first.get_or_insert(change);
            }
        }
        assert_eq!(first, Some(DisorderChange::Recovered(Disorder::Insomnia)));
        assert!(p.disorders.is_empty());
    }

    #[test]
    fn test_severe_acquisition_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let trials = 4000;
        let mut acquired = 0;
        for _ in 0..trials {
            let mut p = player();
            p.sanity = 10;
            if reevaluate(&mut p, &mut rng).is_some() {
                acquired += 1;
            }
        }
        let rate = acquired as f64 / trials as f64;
        assert!((rate - DISORDER_SEVERE_CHANCE).abs() < 0.03, "rate {}", rate);
    }

    #[test]
    fn test_sanity_mutation_triggers_check() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut saw_disorder = false;
        for _ in 0..200 {
            let mut p = player();
            p.modify_stat(Stat::Sanity, -95, &mut rng);
            assert!(p.disorders.len() <= 1);
            saw_disorder |= !p.disorders.is_empty();
        }
        assert!(saw_disorder);
    }

    #[test]
    fn test_multipliers() {
        let mut p = player();
        assert_eq!(incoming_multiplier(&p), 1.0);
        p.disorders = vec![Disorder::Paranoia, Disorder::Megalomania];
        assert_eq!(incoming_multiplier(&p), PARANOIA_INCOMING_MULTIPLIER);
        assert_eq!(outgoing_multiplier(&p), MEGALOMANIA_OUTGOING_MULTIPLIER);
    }
}
