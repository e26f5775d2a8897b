//! Casino club shop. Weekly stock, priced in club coins.
//!
//! Draw order (part of the reproducible contract):
//!   1. furniture count, then furniture
//!   2. one hat, one clothing item, then a coin flip between them
//!   3. one big craftable
//!   4. misc item count, then misc items
//!   5. one totem

use crate::{
    catalog::{Catalog, CatalogItem, Difficulty, ItemCategory},
    config::RandomizerConfig,
    error::RandoResult,
    rng::RandomStream,
    stock::{Cadence, ShopPolicy, ShopRandomizer, ShopStock, StockEntry},
};

pub const CLUB_SHOP_ID: &str = "Casino";

const DEFAULT_FLOOR: u32 = 1000;
const MISC_FLOOR: u32 = 100;
const BIG_CRAFTABLE_MULTIPLIER: u32 = 2;
const TOTEM_PRICE: u32 = 500;

pub struct ClubShop;

impl ShopRandomizer for ClubShop {
    fn shop_id(&self) -> &'static str {
        CLUB_SHOP_ID
    }

    fn policy(&self) -> ShopPolicy {
        ShopPolicy::Periodic(Cadence::Weekly)
    }

    fn is_enabled(&self, config: &RandomizerConfig) -> bool {
        config.shops.randomize_club_shop
    }

    fn generate(
        &self,
        catalog: &Catalog,
        config:  &RandomizerConfig,
        rng:     &mut RandomStream,
    ) -> RandoResult<ShopStock> {
        let mut stock = Vec::new();

        let furniture_count = config.shops.club_furniture.draw(rng)?;
        let furniture = catalog.items_in(ItemCategory::Furniture);
        for item in rng.pick_many_distinct(&furniture, furniture_count) {
            stock.push(entry(item, DEFAULT_FLOOR, 1));
        }

        let hat = first_of(rng, &catalog.items_in(ItemCategory::Hat));
        let clothing = first_of(rng, &catalog.items_in(ItemCategory::Clothing));
        let prefer_hat = rng.next_bool();
        let wearable = match (hat, clothing) {
            (Some(h), Some(c)) => Some(if prefer_hat { h } else { c }),
            (h, c) => h.or(c),
        };
        if let Some(item) = wearable {
            stock.push(entry(item, DEFAULT_FLOOR, 1));
        }

        if let Some(item) = first_of(rng, &catalog.items_in(ItemCategory::BigCraftable)) {
            stock.push(entry(item, DEFAULT_FLOOR, BIG_CRAFTABLE_MULTIPLIER));
        }

        let misc_count = config.shops.club_misc_items.draw(rng)?;
        let misc_pool: Vec<&CatalogItem> = [
            Difficulty::MediumTimeRequirements,
            Difficulty::LargeTimeRequirements,
            Difficulty::UncommonItem,
        ]
        .into_iter()
        .flat_map(|d| catalog.items_at_difficulty(d))
        .collect();
        for item in rng.pick_many_distinct(&misc_pool, misc_count) {
            stock.push(entry(item, MISC_FLOOR, 1));
        }

        if let Some(item) = first_of(rng, &catalog.items_in(ItemCategory::Totem)) {
            stock.push(StockEntry::item(item.id.clone(), item.name.clone(), TOTEM_PRICE));
        }

        Ok(stock)
    }
}

fn first_of<'a>(rng: &mut RandomStream, pool: &[&'a CatalogItem]) -> Option<&'a CatalogItem> {
    rng.pick_many_distinct(pool, 1).into_iter().next()
}

fn entry(item: &CatalogItem, floor: u32, multiplier: u32) -> StockEntry {
    StockEntry::item(item.id.clone(), item.name.clone(), club_price(item.sale_price, floor, multiplier))
}

/// Club coins: max(floor, sale price ÷ 10) × multiplier.
pub fn club_price(sale_price: u32, floor: u32, multiplier: u32) -> u32 {
    floor.max(sale_price / 10).saturating_mul(multiplier)
}
