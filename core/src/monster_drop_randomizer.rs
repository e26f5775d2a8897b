//! Monster drops.
//!
//! Parses each monster's raw drop string, optionally re-rolls every drop
//! to another item of the same difficulty, and publishes a rarity tier
//! per dropped item (its most common source wins) for the crafting
//! recipe module.
//!
//! Malformed data is recovered locally:
//!   - an unknown item id becomes Slime
//!   - an unparsable or non-finite probability becomes 0.75

use crate::{
    catalog::{Catalog, Difficulty, COAL_ID, GOLD_ORE_ID, SLIME_ID},
    error::RandoResult,
    module::{ModuleContext, RandomizerModule},
    types::ItemId,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const MONSTERS_KEY: &str = "Data/Monsters";
pub const DROP_RARITY_KEY: &str = "Data/MonsterDropRarity";

pub const DEFAULT_DROP_PROBABILITY: f64 = 0.75;

#[derive(Debug, Clone, PartialEq)]
pub struct ItemDrop {
    pub item_id:     ItemId,
    pub probability: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum DropRarity {
    Common,
    Uncommon,
    Rare,
}

impl DropRarity {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 0.5 {
            Self::Common
        } else if probability >= 0.1 {
            Self::Uncommon
        } else {
            Self::Rare
        }
    }
}

/// Parse "id probability id probability ...". A trailing unpaired token
/// is ignored.
pub fn parse_drops(raw: &str, catalog: &Catalog) -> Vec<ItemDrop> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    tokens
        .chunks_exact(2)
        .map(|pair| {
            let item_id = match pair[0] {
                "-4" => COAL_ID.to_string(),
                "-6" => GOLD_ORE_ID.to_string(),
                id => {
                    let qualified = format!("(O){id}");
                    if catalog.item(&qualified).is_some() {
                        qualified
                    } else {
                        log::warn!("monster_drops: invalid item '{id}' in drop string '{raw}'");
                        SLIME_ID.to_string()
                    }
                }
            };
            let probability = match pair[1].parse::<f64>() {
                Ok(p) if p.is_finite() => p,
                _ => {
                    log::warn!("monster_drops: invalid probability '{}' in drop string '{raw}'", pair[1]);
                    DEFAULT_DROP_PROBABILITY
                }
            };
            ItemDrop { item_id, probability }
        })
        .collect()
}

fn format_drops(drops: &[ItemDrop]) -> String {
    drops
        .iter()
        .map(|d| format!("{} {}", d.item_id, d.probability))
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct MonsterDropRandomizer;

impl RandomizerModule for MonsterDropRandomizer {
    fn name(&self) -> &'static str {
        "monster_drops"
    }

    fn produces(&self) -> &'static [&'static str] {
        &[MONSTERS_KEY, DROP_RARITY_KEY]
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
        let mut rng = ctx.farm_stream()?;
        let catalog = ctx.catalog;
        let randomize = ctx.config.monsters.randomize;
        ctx.spoiler_section("MONSTER DROPS", randomize);

        let mut monsters = Map::new();
        let mut rarity: BTreeMap<ItemId, DropRarity> = BTreeMap::new();

        for monster in &catalog.monsters {
            let mut drops = parse_drops(&monster.drops, catalog);

            if randomize {
                for drop in &mut drops {
                    let difficulty = catalog
                        .item(&drop.item_id)
                        .map(|i| i.difficulty)
                        .unwrap_or(Difficulty::NoRequirements);
                    let pool = catalog.items_at_difficulty(difficulty);
                    if let Ok(item) = rng.pick_one(&pool) {
                        drop.item_id = item.id.clone();
                    }
                }
                let names: Vec<String> = drops.iter().map(|d| catalog.item_name(&d.item_id)).collect();
                ctx.spoiler_line(format!("{}: {}", monster.name, names.join(", ")));
                monsters.insert(monster.name.clone(), Value::String(format_drops(&drops)));
            }

            for drop in &drops {
                let tier = DropRarity::from_probability(drop.probability);
                rarity
                    .entry(drop.item_id.clone())
                    .and_modify(|existing| *existing = (*existing).min(tier))
                    .or_insert(tier);
            }
        }

        if randomize {
            ctx.write(MONSTERS_KEY, Value::Object(monsters))?;
        }
        ctx.write(DROP_RARITY_KEY, serde_json::to_value(&rarity)?)?;
        Ok(())
    }
}
