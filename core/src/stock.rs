//! Periodic shop stock.
//!
//! STATE MACHINE (per shop id):
//!   Uninitialized → Generated(period) ⇄ {Open, Closed}
//!
//! RULES:
//!   - Opening a shop whose generated period differs from the current
//!     period draws fresh stock from a period-scoped stream.
//!   - Opening within the same period restores the stored stock. No draw.
//!   - Closing keeps the generated period so the next open restores.
//!   - reset_daily() forgets the period of daily shops only.
//!   - Price-fix shops have no state. Their adjustment is re-applied to
//!     the host's menu on every open.
//!   - Known recipes are filtered when stock is handed to the menu, never
//!     before the draw.

use crate::{
    calendar::GameDate,
    catalog::Catalog,
    config::RandomizerConfig,
    error::{RandoError, RandoResult},
    rng::RandomStream,
    seed::{Period, SeedHierarchy, StreamKey},
    types::{ItemId, ShopId},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How often a periodic shop regenerates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Weekly,
    Daily,
}

impl Cadence {
    pub fn period(&self, date: GameDate) -> Period {
        match self {
            Self::Weekly => Period::Week(date.week_index()),
            Self::Daily  => Period::Day(date.day_index()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopPolicy {
    /// Stock is generated once per period and restored on reopen.
    Periodic(Cadence),
    /// Existing menu entries are re-priced on every open.
    PriceFix,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockEntry {
    pub item_id:     ItemId,
    pub name:        String,
    pub price:       u32,
    pub stock_limit: Option<u32>,
    #[serde(default)]
    pub is_recipe:   bool,
}

impl StockEntry {
    pub fn item(item_id: impl Into<ItemId>, name: impl Into<String>, price: u32) -> Self {
        Self {
            item_id:     item_id.into(),
            name:        name.into(),
            price,
            stock_limit: None,
            is_recipe:   false,
        }
    }

    pub fn recipe(item_id: impl Into<ItemId>, name: impl Into<String>, price: u32) -> Self {
        Self {
            stock_limit: Some(1),
            is_recipe:   true,
            ..Self::item(item_id, name, price)
        }
    }
}

pub type ShopStock = Vec<StockEntry>;

/// The slice of player state shop generation cares about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerState {
    pub known_recipes: BTreeSet<ItemId>,
}

impl PlayerState {
    pub fn knows_recipe(&self, item_id: &str) -> bool {
        self.known_recipes.contains(item_id)
    }
}

/// One randomizable shop.
pub trait ShopRandomizer: Send {
    fn shop_id(&self) -> &'static str;

    fn policy(&self) -> ShopPolicy;

    fn is_enabled(&self, config: &RandomizerConfig) -> bool;

    /// Draw a full period's stock. Periodic shops only.
    fn generate(
        &self,
        _catalog: &Catalog,
        _config:  &RandomizerConfig,
        _rng:     &mut RandomStream,
    ) -> RandoResult<ShopStock> {
        Ok(Vec::new())
    }

    /// Re-price the host's menu entries in place. Price-fix shops only.
    fn adjust(&self, _catalog: &Catalog, _stock: &mut ShopStock) {}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopPeriodState {
    pub last_generated: Option<Period>,
    pub is_open:        bool,
    /// Stock as drawn, before the known-recipe filter.
    pub generated:      ShopStock,
}

/// Per-shop memory of what was generated this period. Lives for the
/// process; never written to the save.
#[derive(Default)]
pub struct PeriodicStockController {
    shops:  Vec<Box<dyn ShopRandomizer>>,
    states: BTreeMap<ShopId, ShopPeriodState>,
}

impl PeriodicStockController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller with every shipped shop registered.
    pub fn with_default_shops() -> Self {
        let mut controller = Self::new();
        controller.register(Box::new(crate::club_shop::ClubShop));
        controller.register(Box::new(crate::saloon_shop::SaloonShop));
        controller.register(Box::new(crate::sewer_shop::SewerShop));
        controller.register(Box::new(crate::adventure_shop::AdventureShop));
        controller
    }

    pub fn register(&mut self, shop: Box<dyn ShopRandomizer>) {
        log::debug!("stock: registered shop {}", shop.shop_id());
        self.shops.push(shop);
    }

    fn shop(&self, shop_id: &str) -> Option<&dyn ShopRandomizer> {
        self.shops.iter().find(|s| s.shop_id() == shop_id).map(|s| s.as_ref())
    }

    /// A menu opened. Returns the stock it should display.
    ///
    /// Menus that aren't registered shops, and disabled shops, get
    /// `menu_stock` back untouched.
    #[allow(clippy::too_many_arguments)]
    pub fn on_open(
        &mut self,
        shop_id:    &str,
        menu_stock: ShopStock,
        date:       GameDate,
        player:     &PlayerState,
        seeds:      &SeedHierarchy,
        config:     &RandomizerConfig,
        catalog:    &Catalog,
    ) -> RandoResult<ShopStock> {
        let Some(shop) = self.shops.iter().find(|s| s.shop_id() == shop_id) else {
            return Ok(menu_stock);
        };
        if !shop.is_enabled(config) {
            return Ok(menu_stock);
        }

        let cadence = match shop.policy() {
            ShopPolicy::PriceFix => {
                let mut stock = menu_stock;
                shop.adjust(catalog, &mut stock);
                return Ok(stock);
            }
            ShopPolicy::Periodic(cadence) => cadence,
        };

        let period = cadence.period(date);
        let state = self.states.entry(shop_id.to_string()).or_default();
        if state.last_generated != Some(period) {
            let mut rng = seeds.stream(&StreamKey::new(shop_id, period));
            state.generated = shop.generate(catalog, config, &mut rng)?;
            state.last_generated = Some(period);
            log::info!(
                "stock: generated {} entries for {shop_id} ({period:?})",
                state.generated.len()
            );
        } else if state.is_open {
            log::debug!("stock: {shop_id} already open, leaving menu as is");
        } else {
            log::debug!("stock: restoring {shop_id} stock for {period:?}");
        }
        state.is_open = true;

        Ok(filter_known_recipes(&state.generated, player))
    }

    pub fn on_close(&mut self, shop_id: &str) {
        if let Some(state) = self.states.get_mut(shop_id) {
            state.is_open = false;
        }
    }

    /// Day end. Daily shops regenerate on their next open.
    pub fn reset_daily(&mut self) {
        for shop in &self.shops {
            if shop.policy() != ShopPolicy::Periodic(Cadence::Daily) {
                continue;
            }
            if let Some(state) = self.states.get_mut(shop.shop_id()) {
                state.last_generated = None;
                state.generated.clear();
            }
        }
    }

    /// Forget every shop's period (a different save was loaded).
    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn state(&self, shop_id: &str) -> Option<&ShopPeriodState> {
        self.states.get(shop_id)
    }

    /// What a periodic shop would offer for `date`, before filtering.
    /// Draws from a fresh stream and leaves the shop's state untouched.
    pub fn preview(
        &self,
        shop_id: &str,
        date:    GameDate,
        seeds:   &SeedHierarchy,
        config:  &RandomizerConfig,
        catalog: &Catalog,
    ) -> RandoResult<ShopStock> {
        let shop = self
            .shop(shop_id)
            .ok_or_else(|| RandoError::UnknownShop { shop: shop_id.to_string() })?;
        match shop.policy() {
            ShopPolicy::Periodic(cadence) => {
                let mut rng = seeds.stream(&StreamKey::new(shop_id, cadence.period(date)));
                shop.generate(catalog, config, &mut rng)
            }
            ShopPolicy::PriceFix => Ok(Vec::new()),
        }
    }
}

fn filter_known_recipes(stock: &[StockEntry], player: &PlayerState) -> ShopStock {
    stock
        .iter()
        .filter(|entry| !(entry.is_recipe && player.knows_recipe(&entry.item_id)))
        .cloned()
        .collect()
}
