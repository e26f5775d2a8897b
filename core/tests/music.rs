use randomizer_core::{
    calendar::GameDate,
    catalog::Catalog,
    config::RandomizerConfig,
    host::RecordingHost,
    music_randomizer::{music_key, MusicRandomizer},
    orchestrator::ReplacementOrchestrator,
};
use std::collections::BTreeSet;

fn music_pass(identifier: &str, config: &RandomizerConfig) -> ReplacementOrchestrator {
    let mut orchestrator = ReplacementOrchestrator::new();
    orchestrator.register(Box::new(MusicRandomizer));
    orchestrator
        .calculate_all_replacements(
            identifier,
            GameDate::new(0),
            config,
            &Catalog::default_test(),
            "en",
            &mut RecordingHost::default(),
        )
        .unwrap();
    orchestrator
}

fn replacement(orchestrator: &ReplacementOrchestrator, song: &str) -> String {
    orchestrator.registry().get(&music_key(song)).unwrap().as_str().unwrap().to_string()
}

/// Every song is replaced, and every song is used as a replacement once.
#[test]
fn songs_are_a_permutation() {
    let catalog = Catalog::default_test();
    let orchestrator = music_pass("Maple", &RandomizerConfig::default_test());

    let played: Vec<String> = catalog.songs.iter().map(|s| replacement(&orchestrator, s)).collect();
    let distinct: BTreeSet<&String> = played.iter().collect();
    let songs: BTreeSet<&String> = catalog.songs.iter().collect();
    assert_eq!(played.len(), catalog.songs.len());
    assert_eq!(distinct, songs);
}

#[test]
fn same_farm_same_music() {
    let config = RandomizerConfig::default_test();
    let a = music_pass("Maple", &config);
    let b = music_pass("Maple", &config);
    let c = music_pass("Birch", &config);

    assert_eq!(a.snapshot(), b.snapshot());
    assert_ne!(a.snapshot(), c.snapshot());
}

#[test]
fn keys_are_lowercase_cues() {
    assert_eq!(music_key("Of Dwarves"), "Music/of dwarves");
    let orchestrator = music_pass("Maple", &RandomizerConfig::default_test());
    assert!(orchestrator.registry().contains("Music/cloudcountry"));
}

#[test]
fn disabled_music_writes_nothing() {
    let mut config = RandomizerConfig::default_test();
    config.music = false;
    let orchestrator = music_pass("Maple", &config);
    assert!(orchestrator.registry().is_empty());
}
