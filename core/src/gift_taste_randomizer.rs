//! Gift preferences.
//!
//! Universal tastes and each giftable NPC's personal tastes are drawn
//! without replacement from the giftable item pool, so no item is both
//! loved and hated by the same table.

use crate::{
    error::RandoResult,
    module::{ModuleContext, RandomizerModule},
    rng::RandomStream,
    types::ItemId,
};
use serde_json::{json, Map, Value};

pub const GIFT_TASTES_KEY: &str = "Data/NPCGiftTastes";

/// (taste, universal count, personal count)
const TASTES: [(&str, usize, usize); 4] = [
    ("love",    2, 3),
    ("like",    4, 4),
    ("dislike", 4, 3),
    ("hate",    2, 2),
];

pub struct GiftTasteRandomizer;

impl RandomizerModule for GiftTasteRandomizer {
    fn name(&self) -> &'static str {
        "gift_tastes"
    }

    fn produces(&self) -> &'static [&'static str] {
        &[GIFT_TASTES_KEY]
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
        let npcs = &ctx.config.npcs;
        let (universal, individual) = (npcs.randomize_universal_preferences, npcs.randomize_individual_preferences);
        if !universal && !individual {
            return Ok(());
        }

        let mut rng = ctx.farm_stream()?;
        let catalog = ctx.catalog;
        let giftables: Vec<ItemId> = catalog.giftables().into_iter().map(|i| i.id.clone()).collect();
        ctx.spoiler_section("GIFT TASTES", true);

        let mut tastes = Map::new();

        if universal {
            let mut pool = giftables.clone();
            for (taste, count, _) in TASTES {
                let items = draw(&mut rng, &mut pool, count)?;
                let names: Vec<String> = items.iter().map(|id| catalog.item_name(id)).collect();
                ctx.spoiler_line(format!("Universal {taste}: {}", names.join(", ")));
                tastes.insert(format!("Universal_{taste}"), json!(items));
            }
        }

        if individual {
            for npc in &catalog.giftable_npcs {
                let mut pool = giftables.clone();
                let mut personal = Map::new();
                for (taste, _, count) in TASTES {
                    personal.insert(taste.to_string(), json!(draw(&mut rng, &mut pool, count)?));
                }
                let loves = personal["love"]
                    .as_array()
                    .map(|l| l.iter().filter_map(Value::as_str).map(|id| catalog.item_name(id)).collect::<Vec<_>>())
                    .unwrap_or_default();
                ctx.spoiler_line(format!("{npc} loves: {}", loves.join(", ")));
                tastes.insert(npc.clone(), Value::Object(personal));
            }
        }

        ctx.write(GIFT_TASTES_KEY, Value::Object(tastes))
    }
}

/// Up to `count` items removed from `pool`. Stops early when it runs dry.
fn draw(rng: &mut RandomStream, pool: &mut Vec<ItemId>, count: usize) -> RandoResult<Vec<ItemId>> {
    let mut picked = Vec::with_capacity(count);
    while picked.len() < count && !pool.is_empty() {
        picked.push(rng.pick_and_remove(pool)?);
    }
    Ok(picked)
}
