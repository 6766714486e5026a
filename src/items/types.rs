use crate::character::player::Stat;

/// Damage type shared by weapons and enemies. Drives affinity multipliers
/// and which armor stat mitigates a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageType {
    Physical,
    Oneiric,
    Magical,
    Cosmic,
}

impl DamageType {
    pub fn name(&self) -> &'static str {
        match self {
            DamageType::Physical => "physical",
            DamageType::Oneiric => "oneiric",
            DamageType::Magical => "magical",
            DamageType::Cosmic => "cosmic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weapon {
    pub min_damage: i32,
    pub max_damage: i32,
    pub damage_type: DamageType,
    /// Remaining uses. `None` never wears out.
    pub durability: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Armor {
    pub defense: i32,
    pub resist: i32,
    pub speed_modifier: i32,
    /// Remaining hits absorbed. `None` never wears out.
    pub durability: Option<u32>,
}

/// What a consumable does when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Applied through the clamped stat mutator.
    Restore(Stat, i32),
    /// Attacks are negated for this many enemy turns.
    Ward(u32),
    /// Sends the player into a dream when used outside combat.
    InduceDream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consumable {
    pub effects: Vec<Effect>,
    pub willpower_cost: i32,
}

impl Consumable {
    pub fn restoring(effects: &[(Stat, i32)]) -> Self {
        Self {
            effects: effects
                .iter()
                .map(|&(stat, delta)| Effect::Restore(stat, delta))
                .collect(),
            willpower_cost: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Weapon(Weapon),
    Armor(Armor),
    Consumable(Consumable),
    Quest,
    Key,
    Relic,
}

impl ItemKind {
    pub fn category(&self) -> &'static str {
        match self {
            ItemKind::Weapon(_) => "weapon",
            ItemKind::Armor(_) => "armor",
            ItemKind::Consumable(_) => "consumable",
            ItemKind::Quest => "quest",
            ItemKind::Key => "key",
            ItemKind::Relic => "relic",
        }
    }
}

/// An item template in the registry, or a player-owned copy of one.
///
/// Templates are never handed out by reference to mutable state; the player
/// always owns a clone, so wearing down an equipped weapon leaves the
/// catalog untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: ItemKind,
    pub buy_value: i32,
    pub sell_value: i32,
}

impl Item {
    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Consumable(_))
    }

    pub fn is_equippable(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon(_) | ItemKind::Armor(_))
    }

    /// Quest and key items are bound to the story and cannot be dropped.
    pub fn is_discardable(&self) -> bool {
        !matches!(self.kind, ItemKind::Quest | ItemKind::Key)
    }

    pub fn as_weapon(&self) -> Option<&Weapon> {
        match &self.kind {
            ItemKind::Weapon(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_armor(&self) -> Option<&Armor> {
        match &self.kind {
            ItemKind::Armor(a) => Some(a),
            _ => None,
        }
    }

    pub fn durability(&self) -> Option<u32> {
        match &self.kind {
            ItemKind::Weapon(w) => w.durability,
            ItemKind::Armor(a) => a.durability,
            _ => None,
        }
    }

    pub fn set_durability(&mut self, value: Option<u32>) {
        match &mut self.kind {
            ItemKind::Weapon(w) => w.durability = value,
            ItemKind::Armor(a) => a.durability = value,
            _ => {}
        }
    }

    /// Spends one point of durability. Returns `true` once the item is spent.
    /// Items without durability never wear out.
    pub fn wear(&mut self) -> bool {
        let slot = match &mut self.kind {
            ItemKind::Weapon(w) => &mut w.durability,
            ItemKind::Armor(a) => &mut a.durability,
            _ => return false,
        };
        match slot {
            Some(remaining) => {
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dagger(durability: Option<u32>) -> Item {
        Item {
            id: "test_dagger",
            name: "Test Dagger",
            kind: ItemKind::Weapon(Weapon {
                min_damage: 1,
                max_damage: 2,
                damage_type: DamageType::Physical,
                durability,
            }),
            buy_value: 0,
            sell_value: 0,
        }
    }

    #[test]
    fn test_wear_counts_down_to_zero() {
        let mut item = dagger(Some(2));
        assert!(!item.wear());
        assert_eq!(item.durability(), Some(1));
        assert!(item.wear());
        assert_eq!(item.durability(), Some(0));
        // Never underflows
        assert!(item.wear());
        assert_eq!(item.durability(), Some(0));
    }

    #[test]
    fn test_infinite_durability_never_wears() {
        let mut item = dagger(None);
        for _ in 0..100 {
            assert!(!item.wear());
        }
        assert_eq!(item.durability(), None);
    }

    #[test]
    fn test_quest_items_not_discardable() {
        let mut item = dagger(None);
        assert!(item.is_discardable());
        item.kind = ItemKind::Quest;
        assert!(!item.is_discardable());
        item.kind = ItemKind::Key;
        assert!(!item.is_discardable());
        item.kind = ItemKind::Relic;
        assert!(item.is_discardable());
    }
}
