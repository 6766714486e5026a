//! Shop stock per zone and the purchase rule.

use crate::character::player::Player;
use crate::error::ActionError;
use crate::registry::Registry;

/// Item ids on sale in a zone, in display order. Empty when the zone has no shop.
pub fn shop_stock(zone_id: &str) -> &'static [&'static str] {
    match zone_id {
        "ulthar" => &[
            "sanity_potion",
            "dream_balm",
            "cat_bread",
            "dream_dagger",
            "protection_scroll",
        ],
        "zoog_forest" => &["cat_bread", "sanity_potion", "sleep_incense"],
        "dylath_leen" => &[
            "willpower_elixir",
            "mist_cloak",
            "dream_sword",
            "protection_scroll",
        ],
        "celephais" => &[
            "ngranek_scepter",
            "cat_armor",
            "willpower_elixir",
            "sleepwalker_robe",
        ],
        _ => &[],
    }
}

/// Buys the item at `index` of the zone's stock.
///
/// Rejected without any mutation when gold is short or the inventory is full.
pub fn purchase(
    player: &mut Player,
    registry: &Registry,
    zone_id: &str,
    index: usize,
) -> Result<&'static str, ActionError> {
    let stock = shop_stock(zone_id);
    if stock.is_empty() {
        return Err(ActionError::NoShop);
    }
    let id = stock.get(index).ok_or(ActionError::InvalidSelection)?;
    let template = registry.item(id).ok_or(ActionError::InvalidSelection)?;

    if template.buy_value > player.gold {
        return Err(ActionError::InsufficientGold {
            cost: template.buy_value,
            available: player.gold,
        });
    }
    if player.inventory_full() {
        return Err(ActionError::InventoryFull);
    }

    player.gold -= template.buy_value;
    player.add_item(template.clone());
    log::info!("Bought {} for {} gold", template.id, template.buy_value);
    Ok(template.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_ids_exist() {
        let registry = Registry::standard();
        for zone in registry.zones() {
            for id in shop_stock(zone.id) {
                assert!(registry.item(id).is_some(), "{} sells unknown {}", zone.id, id);
            }
            assert_eq!(zone.has_shop, !shop_stock(zone.id).is_empty(), "{}", zone.id);
        }
    }

    #[test]
    fn test_purchase_deducts_gold_and_adds_item() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        player.gold = 100;
        let before = player.inventory.len();

        let name = purchase(&mut player, &registry, "ulthar", 0).unwrap();
        assert_eq!(name, "Sanity Potion");
        assert_eq!(player.gold, 70);
        assert_eq!(player.inventory.len(), before + 1);
    }

    #[test]
    fn test_purchase_rejected_without_gold() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        player.gold = 20;
        let inventory = player.inventory.clone();

        let result = purchase(&mut player, &registry, "ulthar", 0);
        assert_eq!(
            result,
            Err(ActionError::InsufficientGold {
                cost: 30,
                available: 20
            })
        );
        assert_eq!(player.gold, 20);
        assert_eq!(player.inventory, inventory);
    }

    #[test]
    fn test_purchase_out_of_range() {
        let registry = Registry::standard();
        let mut player = Player::new(&registry);
        assert_eq!(
            purchase(&mut player, &registry, "ulthar", 9),
            Err(ActionError::InvalidSelection)
        );
        assert_eq!(
            purchase(&mut player, &registry, "oriab_sea", 0),
            Err(ActionError::NoShop)
        );
    }
}
