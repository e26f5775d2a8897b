//! One extra artifact-spot item per dig location.
//!
//! The item's difficulty is drawn geometrically: each successive coin
//! flip halves the chance of going one tier harder, stopping at rare.
//! Harder items are less likely to come up when digging.

use crate::{
    catalog::Difficulty,
    error::RandoResult,
    module::{ModuleContext, RandomizerModule},
    rng::RandomStream,
};
use serde_json::{json, Map, Value};

pub const LOCATIONS_KEY: &str = "Data/Locations";

const TIERS: [Difficulty; 6] = [
    Difficulty::NoRequirements,
    Difficulty::SmallTimeRequirements,
    Difficulty::MediumTimeRequirements,
    Difficulty::LargeTimeRequirements,
    Difficulty::UncommonItem,
    Difficulty::RareItem,
];

pub struct ArtifactSpotRandomizer;

impl RandomizerModule for ArtifactSpotRandomizer {
    fn name(&self) -> &'static str {
        "artifact_spots"
    }

    fn produces(&self) -> &'static [&'static str] {
        &[LOCATIONS_KEY]
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
        if !ctx.config.artifact_spot_items {
            return Ok(());
        }

        let mut rng = ctx.farm_stream()?;
        let catalog = ctx.catalog;
        ctx.spoiler_section("EXTRA ARTIFACT SPOT ITEMS", true);

        let mut locations = Map::new();
        for location in &catalog.artifact_spot_locations {
            let difficulty = random_difficulty(&mut rng);
            let chance = dig_percentage(&mut rng, difficulty)? as f64 / 100.0;

            let mut pool = catalog.items_at_difficulty(difficulty);
            if pool.is_empty() {
                log::warn!("artifact_spots: no items at {difficulty:?}, using items with no requirements");
                pool = catalog.items_at_difficulty(Difficulty::NoRequirements);
            }
            let Ok(item) = rng.pick_one(&pool) else {
                log::warn!("artifact_spots: nothing to add at {location}");
                continue;
            };

            ctx.spoiler_line(format!("{location}: ({}) {} | {chance}", item.id, item.name));
            locations.insert(
                location.clone(),
                json!({ "item": item.id, "chance": chance, "precedence": 1 }),
            );
        }

        ctx.write(LOCATIONS_KEY, Value::Object(locations))
    }
}

fn random_difficulty(rng: &mut RandomStream) -> Difficulty {
    for tier in &TIERS[..TIERS.len() - 1] {
        if rng.next_bool() {
            return *tier;
        }
    }
    Difficulty::RareItem
}

fn dig_percentage(rng: &mut RandomStream, difficulty: Difficulty) -> RandoResult<i64> {
    let (min, max) = match difficulty {
        Difficulty::NoRequirements         => (30, 60),
        Difficulty::SmallTimeRequirements  => (30, 40),
        Difficulty::MediumTimeRequirements => (20, 30),
        Difficulty::LargeTimeRequirements  => (10, 20),
        Difficulty::UncommonItem           => (5, 15),
        _                                  => (1, 5),
    };
    rng.next_int_in_range(min, max)
}
