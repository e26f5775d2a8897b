//! Adventurer's guild. Randomized gear keeps the host's stock list but
//! must not sell for more than it is worth.

use crate::{
    catalog::{Catalog, ItemCategory},
    config::RandomizerConfig,
    stock::{ShopPolicy, ShopRandomizer, ShopStock},
};

pub const ADVENTURE_SHOP_ID: &str = "AdventureShop";

pub struct AdventureShop;

impl ShopRandomizer for AdventureShop {
    fn shop_id(&self) -> &'static str {
        ADVENTURE_SHOP_ID
    }

    fn policy(&self) -> ShopPolicy {
        ShopPolicy::PriceFix
    }

    fn is_enabled(&self, config: &RandomizerConfig) -> bool {
        config.weapons.randomize || config.boots.randomize
    }

    fn adjust(&self, catalog: &Catalog, stock: &mut ShopStock) {
        for entry in stock.iter_mut() {
            let Some(item) = catalog.item(&entry.item_id) else {
                continue;
            };
            if matches!(item.category, ItemCategory::Boots | ItemCategory::MeleeWeapon) {
                entry.price = item.sale_price;
            }
        }
    }
}
