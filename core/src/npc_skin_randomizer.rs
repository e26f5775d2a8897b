//! NPC sprite shuffle. Each swap pool is permuted independently, so a
//! villager only ever wears another villager's sprite from its own pool.

use crate::{
    error::RandoResult,
    module::{ModuleContext, RandomizerModule},
};
use serde_json::Value;

pub struct NpcSkinRandomizer;

impl RandomizerModule for NpcSkinRandomizer {
    fn name(&self) -> &'static str {
        "npc_skins"
    }

    fn produces(&self) -> &'static [&'static str] {
        &["Characters/*", "Portraits/*"]
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
        if !ctx.config.npcs.sprite_shuffle {
            return Ok(());
        }

        let mut rng = ctx.farm_stream()?;
        let catalog = ctx.catalog;
        ctx.spoiler_section("NPC SKINS", true);

        for pool in &catalog.npc_swap_pools {
            let mut remaining = pool.clone();
            for npc in pool {
                let wearing = rng.pick_and_remove(&mut remaining)?;
                if &wearing == npc {
                    continue;
                }
                ctx.spoiler_line(format!("{npc} now looks like {wearing}"));
                ctx.write(format!("Characters/{npc}"), Value::String(format!("Characters/{wearing}")))?;
                ctx.write(format!("Portraits/{npc}"), Value::String(format!("Portraits/{wearing}")))?;
            }
        }

        Ok(())
    }
}
