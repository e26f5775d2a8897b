//! Krobus' sewer shop. Daily stock of furniture and big craftables.

use crate::{
    catalog::{Catalog, ItemCategory},
    config::RandomizerConfig,
    error::RandoResult,
    rng::RandomStream,
    stock::{Cadence, ShopPolicy, ShopRandomizer, ShopStock, StockEntry},
};

pub const SEWER_SHOP_ID: &str = "ShadowShop";

const PRICE_FLOOR: u32 = 250;

pub struct SewerShop;

impl ShopRandomizer for SewerShop {
    fn shop_id(&self) -> &'static str {
        SEWER_SHOP_ID
    }

    fn policy(&self) -> ShopPolicy {
        ShopPolicy::Periodic(Cadence::Daily)
    }

    fn is_enabled(&self, config: &RandomizerConfig) -> bool {
        config.shops.randomize_sewer_shop
    }

    fn generate(
        &self,
        catalog: &Catalog,
        config:  &RandomizerConfig,
        rng:     &mut RandomStream,
    ) -> RandoResult<ShopStock> {
        let mut stock = Vec::new();

        let furniture_count = config.shops.sewer_furniture.draw(rng)?;
        let furniture = catalog.items_in(ItemCategory::Furniture);
        for item in rng.pick_many_distinct(&furniture, furniture_count) {
            stock.push(StockEntry::item(item.id.clone(), item.name.clone(), item.sale_price.max(PRICE_FLOOR)));
        }

        let craftable_count = config.shops.sewer_big_craftables.draw(rng)?;
        let craftables = catalog.items_in(ItemCategory::BigCraftable);
        for item in rng.pick_many_distinct(&craftables, craftable_count) {
            let mut entry = StockEntry::item(item.id.clone(), item.name.clone(), item.sale_price.max(PRICE_FLOOR));
            entry.stock_limit = Some(1);
            stock.push(entry);
        }

        Ok(stock)
    }
}
