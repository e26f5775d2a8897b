//! Toggling one module's flag must not move another module's stream.

use randomizer_core::{
    calendar::GameDate,
    catalog::Catalog,
    config::RandomizerConfig,
    host::RecordingHost,
    orchestrator::ReplacementOrchestrator,
    registry::ReplacementTable,
    saloon_shop::SALOON_SHOP_ID,
    seed::SeedHierarchy,
    stock::{PeriodicStockController, PlayerState},
};

fn tables(config: &RandomizerConfig) -> ReplacementOrchestrator {
    let mut orchestrator = ReplacementOrchestrator::build().unwrap();
    let mut host = RecordingHost::default();
    orchestrator
        .calculate_all_replacements("Maple", GameDate::new(0), config, &Catalog::default_test(), "en", &mut host)
        .unwrap();
    orchestrator
}

fn table(orchestrator: &ReplacementOrchestrator, module: &str) -> ReplacementTable {
    orchestrator.registry().table(module).unwrap().clone()
}

#[test]
fn unrelated_flags_do_not_shift_quests() {
    let baseline = tables(&RandomizerConfig::default_test());

    let mut toggled = RandomizerConfig::default_test();
    toggled.animal_skins = false;
    toggled.npcs.sprite_shuffle = false;
    toggled.monsters.randomize = false;
    toggled.artifact_spot_items = false;
    let changed = tables(&toggled);

    assert_eq!(table(&baseline, "quests"), table(&changed, "quests"));
    assert_eq!(table(&baseline, "gift_tastes"), table(&changed, "gift_tastes"));
    assert!(changed.registry().table("artifact_spots").unwrap().is_empty());
}

#[test]
fn disabling_quests_does_not_shift_artifact_spots() {
    let baseline = tables(&RandomizerConfig::default_test());

    let mut toggled = RandomizerConfig::default_test();
    toggled.quests = false;
    toggled.npcs.randomize_universal_preferences = false;
    let changed = tables(&toggled);

    assert_eq!(table(&baseline, "artifact_spots"), table(&changed, "artifact_spots"));
    assert_eq!(table(&baseline, "npc_skins"), table(&changed, "npc_skins"));
}

/// Shop streams are keyed by shop id and period, not by module flags.
#[test]
fn module_flags_do_not_shift_shop_stock() {
    let seeds = SeedHierarchy::from_identifier("Maple");
    let catalog = Catalog::default_test();
    let player = PlayerState::default();

    let open = |config: &RandomizerConfig| {
        PeriodicStockController::with_default_shops()
            .on_open(SALOON_SHOP_ID, Vec::new(), GameDate::new(0), &player, &seeds, config, &catalog)
            .unwrap()
    };

    let baseline = open(&RandomizerConfig::default_test());
    let mut toggled = RandomizerConfig::default_test();
    toggled.quests = false;
    toggled.rain = false;
    toggled.shops.randomize_club_shop = false;
    assert_eq!(baseline, open(&toggled));
}
