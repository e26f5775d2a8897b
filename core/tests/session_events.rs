//! Host events routed through the session.

use randomizer_core::{
    catalog::Catalog,
    club_shop::CLUB_SHOP_ID,
    config::{RandomizerConfig, OBJECT_INFORMATION_KEY},
    event::{HostEvent, HostResponse},
    host::RecordingHost,
    quest_randomizer::QUESTS_KEY,
    saloon_shop::SALOON_SHOP_ID,
    seed::derive_root_seed,
    session::Randomizer,
    stock::ShopStock,
};

fn randomizer() -> Randomizer<RecordingHost> {
    Randomizer::new(
        RandomizerConfig::default_test(),
        Catalog::default_test(),
        RecordingHost::default(),
    )
    .unwrap()
}

fn load(r: &mut Randomizer<RecordingHost>, farm_name: &str, day_index: u64) -> HostResponse {
    r.handle(HostEvent::SaveLoaded { farm_name: farm_name.into(), day_index }).unwrap()
}

fn open(r: &mut Randomizer<RecordingHost>, shop_id: &str) -> ShopStock {
    match r
        .handle(HostEvent::MenuOpened { shop_id: shop_id.into(), stock: Vec::new() })
        .unwrap()
    {
        HostResponse::Stock { entries, .. } => entries,
        other => panic!("Expected stock, got {other:?}"),
    }
}

#[test]
fn save_loaded_runs_the_pass() {
    let mut r = randomizer();
    match load(&mut r, "Maple", 0) {
        HostResponse::PassCompleted { root_seed, modules_run, keys_invalidated, .. } => {
            assert_eq!(root_seed, derive_root_seed("Maple"));
            assert!(modules_run.contains(&"quests".to_string()));
            assert!(!modules_run.contains(&"ui_strings".to_string()), "Pre-load modules don't run per save");
            assert!(keys_invalidated.contains(&QUESTS_KEY.to_string()));
        }
        other => panic!("Expected PassCompleted, got {other:?}"),
    }
}

#[test]
fn menu_before_load_passes_through() {
    let mut r = randomizer();
    assert!(open(&mut r, CLUB_SHOP_ID).is_empty());
}

#[test]
fn asset_request_returns_replacement() {
    let mut r = randomizer();
    load(&mut r, "Maple", 0);

    match r.handle(HostEvent::AssetRequested { key: QUESTS_KEY.into() }).unwrap() {
        HostResponse::Asset { replacement, .. } => assert!(replacement.is_some()),
        other => panic!("Expected Asset, got {other:?}"),
    }
    match r.handle(HostEvent::AssetRequested { key: "Maps/Farm".into() }).unwrap() {
        HostResponse::Asset { replacement, .. } => assert!(replacement.is_none()),
        other => panic!("Expected Asset, got {other:?}"),
    }
}

fn randomizer_suspending(key: &str) -> Randomizer<RecordingHost> {
    let mut config = RandomizerConfig::default_test();
    config.suspend_until_saving = vec![key.to_string()];
    Randomizer::new(config, Catalog::default_test(), RecordingHost::default()).unwrap()
}

fn replaced(r: &Randomizer<RecordingHost>, key: &str) -> bool {
    r.orchestrator.handle_asset_request(key).is_replacement()
}

/// Suspended from day end; served again while the save is written.
#[test]
fn day_end_suspends_until_saving() {
    let mut r = randomizer_suspending(QUESTS_KEY);
    load(&mut r, "Maple", 0);
    assert!(replaced(&r, QUESTS_KEY));

    r.handle(HostEvent::DayEnding).unwrap();
    assert!(r.orchestrator.registry().is_suspended(QUESTS_KEY));
    assert!(!replaced(&r, QUESTS_KEY));

    match r.handle(HostEvent::Saving).unwrap() {
        HostResponse::Invalidated { keys } => assert_eq!(keys, vec![QUESTS_KEY.to_string()]),
        other => panic!("Expected Invalidated, got {other:?}"),
    }
    assert!(replaced(&r, QUESTS_KEY));

    r.handle(HostEvent::Saved).unwrap();
    assert!(replaced(&r, QUESTS_KEY));
}

#[test]
fn save_loaded_serves_suspended_keys_again() {
    let mut r = randomizer_suspending(QUESTS_KEY);
    load(&mut r, "Maple", 0);
    r.handle(HostEvent::DayEnding).unwrap();
    assert!(!replaced(&r, QUESTS_KEY));

    load(&mut r, "Maple", 1);
    assert!(!r.orchestrator.registry().is_suspended(QUESTS_KEY));
    assert!(replaced(&r, QUESTS_KEY));
}

#[test]
fn object_information_is_suspended_by_default() {
    let config = RandomizerConfig::default();
    assert_eq!(config.suspend_until_saving, vec![OBJECT_INFORMATION_KEY.to_string()]);
}

/// Back at the title screen nothing from the old farm is served.
#[test]
fn returning_to_title_unloads_the_save() {
    let mut r = randomizer();
    load(&mut r, "Maple", 0);
    assert!(!open(&mut r, CLUB_SHOP_ID).is_empty());
    r.handle(HostEvent::MenuClosed { shop_id: CLUB_SHOP_ID.into() }).unwrap();

    match r.handle(HostEvent::ReturnedToTitle).unwrap() {
        HostResponse::Invalidated { keys } => assert!(keys.contains(&QUESTS_KEY.to_string())),
        other => panic!("Expected Invalidated, got {other:?}"),
    }
    assert!(r.orchestrator.seeds().is_none());
    assert!(r.orchestrator.registry().is_empty());
    assert!(r.last_report().is_none());
    assert!(!replaced(&r, QUESTS_KEY));
    assert!(open(&mut r, CLUB_SHOP_ID).is_empty());
}

#[test]
fn loading_another_save_forgets_known_recipes() {
    let mut r = randomizer();
    load(&mut r, "Maple", 0);
    r.handle(HostEvent::RecipeLearned { item_id: "(O)194".into() }).unwrap();
    assert!(r.player.knows_recipe("(O)194"));

    load(&mut r, "Birch", 0);
    assert!(r.player.known_recipes.is_empty());
}

#[test]
fn learned_recipe_disappears_from_saloon() {
    let mut r = randomizer();
    load(&mut r, "Maple", 0);

    let before = open(&mut r, SALOON_SHOP_ID);
    r.handle(HostEvent::MenuClosed { shop_id: SALOON_SHOP_ID.into() }).unwrap();
    let recipe = before.iter().find(|e| e.is_recipe).unwrap().item_id.clone();

    r.handle(HostEvent::RecipeLearned { item_id: recipe.clone() }).unwrap();
    let after = open(&mut r, SALOON_SHOP_ID);

    assert!(!after.iter().any(|e| e.is_recipe && e.item_id == recipe));
    assert_eq!(after.len(), before.len() - 1);
}

#[test]
fn day_ending_advances_date_and_refreshes() {
    let mut r = randomizer();
    load(&mut r, "Maple", 6);

    match r.handle(HostEvent::DayEnding).unwrap() {
        HostResponse::Invalidated { keys } => assert_eq!(
            keys,
            vec!["TileSheets/rain".to_string(), OBJECT_INFORMATION_KEY.to_string()]
        ),
        other => panic!("Expected Invalidated, got {other:?}"),
    }
    assert_eq!(r.date.day_index(), 7);
}

/// Host events arrive as JSON lines in the runner.
#[test]
fn events_parse_from_json() {
    let event: HostEvent =
        serde_json::from_str(r#"{"type":"save_loaded","farm_name":"Maple","day_index":3}"#).unwrap();
    assert!(matches!(event, HostEvent::SaveLoaded { day_index: 3, .. }));

    let event: HostEvent = serde_json::from_str(r#"{"type":"menu_opened","shop_id":"Saloon"}"#).unwrap();
    assert!(matches!(event, HostEvent::MenuOpened { ref stock, .. } if stock.is_empty()));
}
