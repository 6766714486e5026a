//! Immutable game catalogs, built once at startup and shared by reference.

use std::collections::HashMap;

use crate::character::quests::{all_quests, Quest};
use crate::combat::bestiary::{all_allies, all_enemies, all_entities};
use crate::combat::types::{AllyTemplate, EnemyTemplate};
use crate::items::{all_items, Item};
use crate::zones::{get_all_zones, Zone};

/// Item, enemy, zone, quest and ally templates.
///
/// Nothing here is ever mutated after construction. Anything the player
/// owns is cloned out of it.
#[derive(Debug)]
pub struct Registry {
    items: HashMap<&'static str, Item>,
    enemies: HashMap<&'static str, EnemyTemplate>,
    entity_ids: Vec<&'static str>,
    zones: Vec<Zone>,
    quests: Vec<Quest>,
    allies: HashMap<&'static str, AllyTemplate>,
}

impl Registry {
    /// The standard Dreamlands catalog.
    pub fn standard() -> Self {
        let entities = all_entities();
        let entity_ids = entities.iter().map(|e| e.id).collect();
        let registry = Self {
            items: all_items().into_iter().map(|i| (i.id, i)).collect(),
            enemies: all_enemies()
                .into_iter()
                .chain(entities)
                .map(|e| (e.id, e))
                .collect(),
            entity_ids,
            zones: get_all_zones(),
            quests: all_quests(),
            allies: all_allies().into_iter().map(|a| (a.id, a)).collect(),
        };
        log::debug!(
            "Registry loaded: {} items, {} enemies, {} zones, {} quests",
            registry.items.len(),
            registry.enemies.len(),
            registry.zones.len(),
            registry.quests.len()
        );
        registry
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.enemies.get(id)
    }

    /// Outer entities, in catalog order.
    pub fn entities(&self) -> impl Iterator<Item = &EnemyTemplate> {
        self.entity_ids.iter().filter_map(|id| self.enemies.get(id))
    }

    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn quest(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn ally(&self, id: &str) -> Option<&AllyTemplate> {
        self.allies.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encounter_tables_reference_known_enemies() {
        let registry = Registry::standard();
        for zone in registry.zones() {
            for (enemy, p) in &zone.encounters {
                assert!(registry.enemy(enemy).is_some(), "{} in {}", enemy, zone.id);
                assert!(*p > 0.0 && *p < 1.0);
            }
        }
    }

    #[test]
    fn test_discoverables_reference_known_items() {
        let registry = Registry::standard();
        for zone in registry.zones() {
            for d in &zone.discoverables {
                assert!(registry.item(d.item).is_some(), "{} in {}", d.item, zone.id);
            }
        }
    }

    #[test]
    fn test_loot_references_known_items() {
        let registry = Registry::standard();
        for enemy in all_enemies() {
            for (item, p) in &enemy.loot {
                assert!(registry.item(item).is_some(), "{} drops {}", enemy.id, item);
                assert!(*p > 0.0 && *p <= 1.0);
            }
        }
    }

    #[test]
    fn test_entities_are_cosmic() {
        let registry = Registry::standard();
        let entities: Vec<_> = registry.entities().collect();
        assert_eq!(entities.len(), 3);
        assert!(entities.iter().all(|e| e.cosmic));
    }

    #[test]
    fn test_quests_reference_known_data() {
        let registry = Registry::standard();
        for quest in registry.quests() {
            assert!(registry.zone(quest.zone).is_some(), "{}", quest.id);
            if let Some(item) = quest.reward.item {
                assert!(registry.item(item).is_some(), "{}", quest.id);
            }
        }
    }
}
