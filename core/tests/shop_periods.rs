//! Shop period state machine: regenerate on a new period, restore within
//! one, and forget daily shops at day end.

use randomizer_core::{
    adventure_shop::ADVENTURE_SHOP_ID,
    calendar::GameDate,
    catalog::Catalog,
    club_shop::{club_price, CLUB_SHOP_ID},
    config::RandomizerConfig,
    error::RandoError,
    seed::{Period, SeedHierarchy},
    sewer_shop::SEWER_SHOP_ID,
    stock::{PeriodicStockController, PlayerState, ShopStock, StockEntry},
};

struct Fixture {
    controller: PeriodicStockController,
    seeds:      SeedHierarchy,
    config:     RandomizerConfig,
    catalog:    Catalog,
    player:     PlayerState,
}

impl Fixture {
    fn new() -> Self {
        Self {
            controller: PeriodicStockController::with_default_shops(),
            seeds:      SeedHierarchy::from_identifier("Maple"),
            config:     RandomizerConfig::default_test(),
            catalog:    Catalog::default_test(),
            player:     PlayerState::default(),
        }
    }

    fn open(&mut self, shop: &str, day: u64) -> ShopStock {
        self.open_with(shop, day, Vec::new())
    }

    fn open_with(&mut self, shop: &str, day: u64, menu: ShopStock) -> ShopStock {
        self.controller
            .on_open(shop, menu, GameDate::new(day), &self.player, &self.seeds, &self.config, &self.catalog)
            .unwrap()
    }
}

#[test]
fn reopening_in_same_week_restores_stock() {
    let mut f = Fixture::new();
    let monday = f.open(CLUB_SHOP_ID, 7);
    f.controller.on_close(CLUB_SHOP_ID);
    let sunday = f.open(CLUB_SHOP_ID, 13);

    assert_eq!(monday, sunday, "Stock must be stable for the whole week");
    let state = f.controller.state(CLUB_SHOP_ID).unwrap();
    assert_eq!(state.last_generated, Some(Period::Week(1)));
    assert!(state.is_open);
}

#[test]
fn close_keeps_generated_period() {
    let mut f = Fixture::new();
    f.open(CLUB_SHOP_ID, 0);
    f.controller.on_close(CLUB_SHOP_ID);

    let state = f.controller.state(CLUB_SHOP_ID).unwrap();
    assert!(!state.is_open);
    assert_eq!(state.last_generated, Some(Period::Week(0)));
}

#[test]
fn open_while_open_leaves_stock_alone() {
    let mut f = Fixture::new();
    let first = f.open(CLUB_SHOP_ID, 2);
    let again = f.open(CLUB_SHOP_ID, 2);
    assert_eq!(first, again);
}

/// A new week regenerates from that week's stream.
#[test]
fn new_week_regenerates() {
    let mut f = Fixture::new();
    f.open(CLUB_SHOP_ID, 6);
    f.controller.on_close(CLUB_SHOP_ID);
    let next_week = f.open(CLUB_SHOP_ID, 7);

    assert_eq!(
        f.controller.state(CLUB_SHOP_ID).unwrap().last_generated,
        Some(Period::Week(1))
    );
    let expected = f
        .controller
        .preview(CLUB_SHOP_ID, GameDate::new(7), &f.seeds, &f.config, &f.catalog)
        .unwrap();
    assert_eq!(next_week, expected);
}

#[test]
fn reset_daily_only_clears_daily_shops() {
    let mut f = Fixture::new();
    let sewer = f.open(SEWER_SHOP_ID, 3);
    f.open(CLUB_SHOP_ID, 3);
    f.controller.on_close(SEWER_SHOP_ID);
    f.controller.on_close(CLUB_SHOP_ID);

    f.controller.reset_daily();

    assert_eq!(f.controller.state(SEWER_SHOP_ID).unwrap().last_generated, None);
    assert_eq!(
        f.controller.state(CLUB_SHOP_ID).unwrap().last_generated,
        Some(Period::Week(0))
    );

    // Same day, same day-scoped stream: regenerated stock is identical.
    let regenerated = f.open(SEWER_SHOP_ID, 3);
    assert_eq!(sewer, regenerated);
    assert_eq!(
        f.controller.state(SEWER_SHOP_ID).unwrap().last_generated,
        Some(Period::Day(3))
    );
}

#[test]
fn sewer_prices_are_floored() {
    let mut f = Fixture::new();
    for entry in f.open(SEWER_SHOP_ID, 0) {
        assert!(entry.price >= 250, "{} priced at {}", entry.name, entry.price);
    }
}

#[test]
fn club_prices_follow_coin_rule() {
    assert_eq!(club_price(50, 1000, 1), 1000);
    assert_eq!(club_price(25_000, 1000, 1), 2500);
    assert_eq!(club_price(50, 1000, 2), 2000);
    assert_eq!(club_price(120, 100, 1), 100);

    let mut f = Fixture::new();
    let stock = f.open(CLUB_SHOP_ID, 0);
    let totem = stock.last().unwrap();
    assert_eq!(totem.price, 500, "Totems cost a flat 500");
}

#[test]
fn disabled_shop_passes_menu_through() {
    let mut f = Fixture::new();
    f.config.shops.randomize_club_shop = false;
    let menu = vec![StockEntry::item("(O)388", "Wood", 10)];

    let shown = f.open_with(CLUB_SHOP_ID, 0, menu.clone());
    assert_eq!(shown, menu);
    assert!(f.controller.state(CLUB_SHOP_ID).is_none());
}

#[test]
fn unregistered_menu_passes_through() {
    let mut f = Fixture::new();
    let menu = vec![StockEntry::item("(O)24", "Parsnip", 20)];
    assert_eq!(f.open_with("SeedShop", 0, menu.clone()), menu);
    assert!(f.controller.state("SeedShop").is_none());
}

/// The adventure shop re-prices gear on every open and keeps no state.
#[test]
fn adventure_shop_fixes_gear_prices() {
    let mut f = Fixture::new();
    let menu = vec![
        StockEntry::item("(B)504", "Sneakers", 9999),
        StockEntry::item("(W)4", "Galaxy Sword", 1),
        StockEntry::item("(O)388", "Wood", 50),
    ];

    let shown = f.open_with(ADVENTURE_SHOP_ID, 0, menu.clone());
    assert_eq!(shown[0].price, 500);
    assert_eq!(shown[1].price, 10000);
    assert_eq!(shown[2].price, 50);
    assert!(f.controller.state(ADVENTURE_SHOP_ID).is_none());

    f.config.weapons.randomize = false;
    f.config.boots.randomize = false;
    assert_eq!(f.open_with(ADVENTURE_SHOP_ID, 0, menu.clone()), menu);
}

#[test]
fn preview_of_unknown_shop_is_an_error() {
    let f = Fixture::new();
    let err = f
        .controller
        .preview("Nowhere", GameDate::new(0), &f.seeds, &f.config, &f.catalog)
        .unwrap_err();
    assert!(matches!(err, RandoError::UnknownShop { .. }));
}
