//! Building costs. The gold price and materials of every farm building,
//! drawn once per save from the farm stream.
//!
//! Each building draws two distinct resources first, then fills its own
//! material template. A template slot is an item and a multiplier on the
//! item's usual crafting amount. Repeated items are summed into one
//! requirement.

use crate::{
    catalog::{Catalog, CatalogItem, Difficulty, ItemCategory},
    crafting_recipe_randomizer::crafting_amount,
    error::RandoResult,
    module::{ModuleContext, RandomizerModule},
    rng::RandomStream,
    types::ItemId,
};
use serde_json::{json, Map, Value};

pub const BUILDINGS_KEY: &str = "Data/Buildings";

struct Material<'a> {
    item:       &'a CatalogItem,
    multiplier: i64,
}

impl<'a> Material<'a> {
    fn new(item: &'a CatalogItem, multiplier: i64) -> Self {
        Self { item, multiplier }
    }

    fn one(item: &'a CatalogItem) -> Self {
        Self::new(item, 1)
    }
}

pub struct BuildingRandomizer;

impl RandomizerModule for BuildingRandomizer {
    fn name(&self) -> &'static str {
        "buildings"
    }

    fn produces(&self) -> &'static [&'static str] {
        &[BUILDINGS_KEY]
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
        if !ctx.config.building_costs {
            return Ok(());
        }

        let mut rng = ctx.farm_stream()?;
        let catalog = ctx.catalog;
        ctx.spoiler_section("BUILDINGS", true);

        let mut buildings = Map::new();
        for building in &catalog.buildings {
            let Some(template) = materials_for(&building.name, &mut rng, catalog)? else {
                log::warn!("buildings: unhandled building '{}'", building.name);
                continue;
            };
            let cost = randomize_cost(&mut rng, building.build_cost)?;
            let required = required_amounts(&mut rng, &template)?;

            ctx.spoiler_line(format!("{} - {cost}G", building.name));
            let listed: Vec<String> = required
                .iter()
                .map(|(id, amount)| format!("{}: {amount}", catalog.item_name(id)))
                .collect();
            ctx.spoiler_line(listed.join(" - "));
            ctx.spoiler_line("===");

            let materials: Vec<Value> = required
                .into_iter()
                .map(|(item, amount)| json!({ "item": item, "amount": amount }))
                .collect();
            buildings.insert(
                building.name.clone(),
                json!({ "build_cost": cost, "materials": materials }),
            );
        }

        ctx.write(BUILDINGS_KEY, Value::Object(buildings))
    }
}

/// Base cost plus or minus a quarter.
fn randomize_cost(rng: &mut RandomStream, base: u32) -> RandoResult<i64> {
    let base = i64::from(base);
    let variance = base / 4;
    rng.next_int_in_range(base - variance, base + variance)
}

fn materials_for<'a>(
    name:    &str,
    rng:     &mut RandomStream,
    catalog: &'a Catalog,
) -> RandoResult<Option<Vec<Material<'a>>>> {
    use Difficulty::*;

    let r1 = random_resource(rng, catalog, None)?;
    let r2 = random_resource(rng, catalog, Some(r1.id.as_str()))?;

    let materials = match name {
        "Silo" => {
            let count = rng.next_int_in_range(2, 3)?;
            let medium = item_at(rng, catalog, MediumTimeRequirements)?;
            vec![Material::new(r1, count), Material::one(r2), Material::one(medium)]
        }
        "Mill" => {
            let medium = item_at(rng, catalog, MediumTimeRequirements)?;
            vec![Material::new(r1, 3), Material::new(r2, 2), Material::one(medium)]
        }
        "Shipping Bin" | "Well" => {
            let medium = item_at(rng, catalog, MediumTimeRequirements)?;
            vec![one_of(rng, vec![Material::new(r1, 3), Material::one(medium)])?]
        }
        "Coop" | "Barn" => {
            let medium = item_at(rng, catalog, MediumTimeRequirements)?;
            let choice = one_of(rng, vec![Material::new(r1, 5), Material::one(medium)])?;
            let count = rng.next_int_in_range(2, 3)?;
            vec![choice, Material::new(r2, count)]
        }
        "Big Coop" | "Big Barn" => {
            let medium = item_at(rng, catalog, MediumTimeRequirements)?;
            let choice = one_of(rng, vec![Material::new(r1, 3), Material::one(medium)])?;
            vec![choice, Material::new(r2, 7)]
        }
        "Deluxe Coop" | "Deluxe Barn" => {
            let large = item_at(rng, catalog, LargeTimeRequirements)?;
            let choice = one_of(rng, vec![Material::new(r1, 9), Material::one(large)])?;
            vec![choice, Material::new(r2, 4)]
        }
        "Slime Hutch" => {
            let medium = item_at(rng, catalog, MediumTimeRequirements)?;
            let large = item_at(rng, catalog, LargeTimeRequirements)?;
            vec![Material::new(r1, 9), Material::new(medium, 2), Material::one(large)]
        }
        "Shed" => {
            let medium = item_at(rng, catalog, MediumTimeRequirements)?;
            one_of(
                rng,
                vec![
                    vec![Material::new(r1, 5)],
                    vec![Material::new(r1, 3), Material::one(medium)],
                ],
            )?
        }
        "Cabin" => cabin_materials(rng, catalog)?,
        "Fish Pond" => {
            let first = item_at(rng, catalog, SmallTimeRequirements)?;
            let second = item_at(rng, catalog, SmallTimeRequirements)?;
            vec![Material::new(r1, 2), Material::new(first, 2), Material::new(second, 2)]
        }
        "Stable" => {
            let medium = item_at(rng, catalog, MediumTimeRequirements)?;
            vec![Material::new(medium, 2), Material::new(r1, 8)]
        }
        _ => return Ok(None),
    };
    Ok(Some(materials))
}

/// Either a double resource, or a resource and something easy to get.
fn cabin_materials<'a>(rng: &mut RandomStream, catalog: &'a Catalog) -> RandoResult<Vec<Material<'a>>> {
    let resource = random_resource(rng, catalog, None)?;
    let easy: Vec<&CatalogItem> = catalog
        .items_below_difficulty(Difficulty::MediumTimeRequirements)
        .into_iter()
        .filter(|i| i.id != resource.id)
        .collect();
    let easy = *rng.pick_one(&easy)?;

    one_of(
        rng,
        vec![
            vec![Material::new(resource, 2)],
            vec![Material::one(resource), Material::one(easy)],
        ],
    )
}

fn random_resource<'a>(
    rng:     &mut RandomStream,
    catalog: &'a Catalog,
    exclude: Option<&str>,
) -> RandoResult<&'a CatalogItem> {
    let pool: Vec<&CatalogItem> = catalog
        .items_in(ItemCategory::Resource)
        .into_iter()
        .filter(|i| Some(i.id.as_str()) != exclude)
        .collect();
    Ok(*rng.pick_one(&pool)?)
}

fn item_at<'a>(
    rng:        &mut RandomStream,
    catalog:    &'a Catalog,
    difficulty: Difficulty,
) -> RandoResult<&'a CatalogItem> {
    let pool = catalog.items_at_difficulty(difficulty);
    Ok(*rng.pick_one(&pool)?)
}

fn one_of<T>(rng: &mut RandomStream, mut options: Vec<T>) -> RandoResult<T> {
    rng.pick_and_remove(&mut options)
}

/// Draw each slot's amount and merge repeated items, keeping first-seen
/// order.
fn required_amounts(rng: &mut RandomStream, template: &[Material<'_>]) -> RandoResult<Vec<(ItemId, i64)>> {
    let mut required: Vec<(ItemId, i64)> = Vec::new();
    for material in template {
        let amount = crafting_amount(rng, material.item.difficulty)? * material.multiplier;
        match required.iter_mut().find(|(id, _)| *id == material.item.id) {
            Some((_, total)) => *total += amount,
            None => required.push((material.item.id.clone(), amount)),
        }
    }
    Ok(required)
}
