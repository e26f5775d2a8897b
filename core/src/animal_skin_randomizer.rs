//! Critter sheet variant and the one animal that becomes a bear.

use crate::{
    error::RandoResult,
    module::{ModuleContext, RandomizerModule},
};
use serde_json::json;

pub const CRITTERS_KEY: &str = "TileSheets/critters";
const HORSE: &str = "horse";

pub struct AnimalSkinRandomizer;

impl RandomizerModule for AnimalSkinRandomizer {
    fn name(&self) -> &'static str {
        "animal_skins"
    }

    fn produces(&self) -> &'static [&'static str] {
        &[CRITTERS_KEY, "Animals/*"]
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
        if !ctx.config.animal_skins {
            return Ok(());
        }

        let mut rng = ctx.farm_stream()?;
        let catalog = ctx.catalog;
        ctx.spoiler_section("ANIMAL SKINS", true);

        if !catalog.critter_variants.is_empty() {
            let variant = rng.pick_one(&catalog.critter_variants)?.clone();
            let hue_shift = rng.next_int_in_range(0, i64::from(ctx.config.critter_hue_shift_max))?;
            ctx.spoiler_line(format!("Critters: {variant} (hue +{hue_shift})"));
            ctx.write(CRITTERS_KEY, json!({ "variant": variant, "hue_shift": hue_shift }))?;
        }

        let animals: Vec<String> = catalog
            .pets
            .iter()
            .cloned()
            .chain(std::iter::once(HORSE.to_string()))
            .chain(catalog.farm_animals.iter().cloned())
            .collect();
        let bear = rng.pick_one(&animals)?;
        ctx.spoiler_line(format!("{bear} replaced with Bear"));
        ctx.write(format!("Animals/{bear}"), json!({ "replaced_with": "Bear" }))?;

        Ok(())
    }
}
