//! Rain sprite variant. Re-drawn every day from a day-scoped stream so it
//! never disturbs the save-long streams.

use crate::{
    error::RandoResult,
    module::{ModuleContext, RandomizerModule, Refresh},
};
use serde_json::json;

pub const RAIN_KEY: &str = "TileSheets/rain";

pub struct RainRandomizer;

impl RandomizerModule for RainRandomizer {
    fn name(&self) -> &'static str {
        "rain"
    }

    fn produces(&self) -> &'static [&'static str] {
        &[RAIN_KEY]
    }

    fn refresh(&self) -> Refresh {
        Refresh::Daily
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
        if !ctx.config.rain || ctx.catalog.rain_variants.is_empty() {
            return Ok(());
        }

        let mut rng = ctx.daily_stream()?;
        let variant = rng.pick_one(&ctx.catalog.rain_variants)?.clone();
        let day = ctx.date.day_index();

        ctx.spoiler_section("RAIN", true);
        ctx.spoiler_line(format!("Day {day}: {variant}"));
        ctx.write(RAIN_KEY, json!({ "variant": variant, "day": day }))
    }
}
