//! Crafting recipes. Ingredient amounts scale with how hard the
//! ingredient is to come by, including how rarely monsters drop it.

use crate::{
    catalog::{Catalog, CatalogItem, Difficulty},
    error::RandoResult,
    module::{ModuleContext, RandomizerModule},
    monster_drop_randomizer::{DropRarity, DROP_RARITY_KEY},
    rng::RandomStream,
};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

pub const CRAFTING_RECIPES_KEY: &str = "Data/CraftingRecipes";

/// Recipes that don't craft an item but are randomized anyway.
const TRANSMUTE_RECIPES: [(&str, &str); 2] = [
    ("Transmute (Fe)", "(O)380"),
    ("Transmute (Au)", "(O)384"),
];

pub struct CraftingRecipeRandomizer;

impl RandomizerModule for CraftingRecipeRandomizer {
    fn name(&self) -> &'static str {
        "crafting_recipes"
    }

    fn produces(&self) -> &'static [&'static str] {
        &[CRAFTING_RECIPES_KEY]
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &["monster_drops"]
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
        if !ctx.config.crafting_recipes.randomize {
            return Ok(());
        }

        let mut rng = ctx.farm_stream()?;
        let catalog = ctx.catalog;
        let monster_rarity: BTreeMap<String, DropRarity> = match ctx.dependency(DROP_RARITY_KEY) {
            Some(value) => serde_json::from_value(value.clone())?,
            None => BTreeMap::new(),
        };
        ctx.spoiler_section("CRAFTING RECIPES", true);

        let mut recipes = Map::new();
        let craftables = catalog.craftables();
        for item in &craftables {
            let recipe = build_recipe(&mut rng, catalog, &monster_rarity, item.difficulty, &item.id)?;
            ctx.spoiler_line(describe(catalog, &item.name, &recipe));
            recipes.insert(item.name.clone(), recipe);
        }
        for (name, yields) in TRANSMUTE_RECIPES {
            let recipe = build_recipe(&mut rng, catalog, &monster_rarity, Difficulty::MediumTimeRequirements, yields)?;
            ctx.spoiler_line(describe(catalog, name, &recipe));
            recipes.insert(name.to_string(), recipe);
        }

        ctx.write(CRAFTING_RECIPES_KEY, Value::Object(recipes))
    }
}

/// One to three distinct ingredients from items easier to get than the
/// result (never easier than small-time requirements).
fn build_recipe(
    rng:            &mut RandomStream,
    catalog:        &Catalog,
    monster_rarity: &BTreeMap<String, DropRarity>,
    difficulty:     Difficulty,
    yields:         &str,
) -> RandoResult<Value> {
    let ceiling = difficulty.max(Difficulty::SmallTimeRequirements);
    let pool: Vec<&CatalogItem> = catalog
        .items_below_difficulty(ceiling)
        .into_iter()
        .filter(|i| i.id != yields)
        .collect();

    let ingredient_count = rng.next_int_in_range(1, 3)? as usize;
    let mut ingredients = Vec::new();
    for ingredient in rng.pick_many_distinct(&pool, ingredient_count) {
        let rarity = monster_rarity
            .get(&ingredient.id)
            .copied()
            .unwrap_or_else(|| rarity_for(ingredient.difficulty));
        let (min, max) = amount_range(rarity);
        let amount = rng.next_int_in_range(min, max)?;
        ingredients.push(json!({ "item": ingredient.id, "amount": amount }));
    }

    Ok(json!({ "ingredients": ingredients, "yields": yields }))
}

/// Amount of an ingredient needed, by how hard it is to obtain.
pub(crate) fn crafting_amount(rng: &mut RandomStream, difficulty: Difficulty) -> RandoResult<i64> {
    let (min, max) = amount_range(rarity_for(difficulty));
    rng.next_int_in_range(min, max)
}

fn rarity_for(difficulty: Difficulty) -> DropRarity {
    match difficulty {
        Difficulty::NoRequirements | Difficulty::SmallTimeRequirements => DropRarity::Common,
        Difficulty::MediumTimeRequirements | Difficulty::LargeTimeRequirements => DropRarity::Uncommon,
        _ => DropRarity::Rare,
    }
}

fn amount_range(rarity: DropRarity) -> (i64, i64) {
    match rarity {
        DropRarity::Common   => (5, 15),
        DropRarity::Uncommon => (2, 5),
        DropRarity::Rare     => (1, 2),
    }
}

fn describe(catalog: &Catalog, name: &str, recipe: &Value) -> String {
    let parts: Vec<String> = recipe["ingredients"]
        .as_array()
        .map(|list| {
            list.iter()
                .map(|i| {
                    let id = i["item"].as_str().unwrap_or_default();
                    format!("{} x{}", catalog.item_name(id), i["amount"])
                })
                .collect()
        })
        .unwrap_or_default();
    format!("{name} - {}", parts.join(", "))
}
