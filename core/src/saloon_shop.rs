//! Saloon. Weekly stock: beer and coffee always, a handful of dishes and
//! a handful of cooking recipes drawn from the same dish pool.

use crate::{
    catalog::{Catalog, ItemCategory, BEER_ID, COFFEE_ID},
    config::RandomizerConfig,
    error::RandoResult,
    rng::RandomStream,
    stock::{Cadence, ShopPolicy, ShopRandomizer, ShopStock, StockEntry},
};

pub const SALOON_SHOP_ID: &str = "Saloon";

pub struct SaloonShop;

impl ShopRandomizer for SaloonShop {
    fn shop_id(&self) -> &'static str {
        SALOON_SHOP_ID
    }

    fn policy(&self) -> ShopPolicy {
        ShopPolicy::Periodic(Cadence::Weekly)
    }

    fn is_enabled(&self, config: &RandomizerConfig) -> bool {
        config.shops.randomize_saloon_shop
    }

    fn generate(
        &self,
        catalog: &Catalog,
        config:  &RandomizerConfig,
        rng:     &mut RandomStream,
    ) -> RandoResult<ShopStock> {
        let mut stock = Vec::new();

        for id in [BEER_ID, COFFEE_ID] {
            if let Some(item) = catalog.expect_item(id, "saloon staple") {
                stock.push(StockEntry::item(item.id.clone(), item.name.clone(), item.sale_price));
            }
        }

        let dishes = catalog.items_in(ItemCategory::Cooked);

        let dish_count = config.shops.saloon_cooked_items.draw(rng)?;
        for item in rng.pick_many_distinct(&dishes, dish_count) {
            stock.push(StockEntry::item(item.id.clone(), item.name.clone(), item.sale_price));
        }

        // Drawn regardless of what the player knows.
        let recipe_count = config.shops.saloon_recipes.draw(rng)?;
        for item in rng.pick_many_distinct(&dishes, recipe_count) {
            stock.push(StockEntry::recipe(
                item.id.clone(),
                format!("{} Recipe", item.name),
                item.sale_price,
            ));
        }

        Ok(stock)
    }
}
