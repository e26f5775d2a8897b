use randomizer_core::{
    catalog::{Catalog, COAL_ID, GOLD_ORE_ID, SLIME_ID},
    monster_drop_randomizer::{parse_drops, DropRarity, DEFAULT_DROP_PROBABILITY},
};

#[test]
fn parses_pairs_and_special_ids() {
    let catalog = Catalog::default_test();
    let drops = parse_drops("767 .9 -4 .1 -6 .05", &catalog);

    assert_eq!(drops.len(), 3);
    assert_eq!(drops[0].item_id, "(O)767");
    assert!((drops[0].probability - 0.9).abs() < f64::EPSILON);
    assert_eq!(drops[1].item_id, COAL_ID);
    assert_eq!(drops[2].item_id, GOLD_ORE_ID);
}

/// Bad data is recovered with documented defaults.
#[test]
fn malformed_tokens_use_defaults() {
    let catalog = Catalog::default_test();
    let drops = parse_drops("153 .3 766 lots 767", &catalog);

    assert_eq!(drops.len(), 2, "Trailing unpaired token is ignored");
    assert_eq!(drops[0].item_id, SLIME_ID);
    assert_eq!(drops[1].item_id, "(O)766");
    assert_eq!(drops[1].probability, DEFAULT_DROP_PROBABILITY);
}

#[test]
fn rarity_tiers_by_probability() {
    assert_eq!(DropRarity::from_probability(0.75), DropRarity::Common);
    assert_eq!(DropRarity::from_probability(0.3), DropRarity::Uncommon);
    assert_eq!(DropRarity::from_probability(0.05), DropRarity::Rare);
    assert!(DropRarity::Common < DropRarity::Rare);
}

/// "NaN" and "inf" parse as floats but are not probabilities.
#[test]
fn non_finite_probability_uses_default() {
    let catalog = Catalog::default_test();
    let drops = parse_drops("766 NaN 767 inf 684 -inf", &catalog);

    assert_eq!(drops.len(), 3);
    for drop in &drops {
        assert_eq!(drop.probability, DEFAULT_DROP_PROBABILITY);
        assert_eq!(DropRarity::from_probability(drop.probability), DropRarity::Common);
    }
}
