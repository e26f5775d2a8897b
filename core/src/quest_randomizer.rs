//! Quests. Every quest gets a fresh giver, a second NPC to mention, the
//! item its type calls for, a count and a reward. Quests announced by
//! mail get a matching letter.

use crate::{
    catalog::{Catalog, CatalogItem, Difficulty, ItemCategory, QuestDefinition, QuestItemType},
    error::RandoResult,
    module::{ModuleContext, RandomizerModule},
    rng::RandomStream,
};
use serde_json::{json, Map, Value};

pub const QUESTS_KEY: &str = "Data/Quests";
pub const MAIL_KEY: &str = "Data/mail";

/// Everything one quest may draw. Drawn in full for every quest so the
/// draw sequence doesn't depend on quest type.
struct QuestDraw<'a> {
    person:       Option<String>,
    other_person: Option<String>,
    crop:         Option<&'a CatalogItem>,
    dish:         Option<&'a CatalogItem>,
    fish:         Option<&'a CatalogItem>,
    item:         Option<&'a CatalogItem>,
    count:        i64,
    reward:       i64,
}

impl<'a> QuestDraw<'a> {
    fn new(rng: &mut RandomStream, catalog: &'a Catalog) -> RandoResult<Self> {
        let people = &catalog.questable_npcs;
        let person = rng.pick_one(people).ok().cloned();
        let others: Vec<&String> = people.iter().filter(|p| Some(*p) != person.as_ref()).collect();
        let other_person = rng.pick_one(&others).ok().map(|p| (*p).clone());

        let mut pick = |category: ItemCategory| rng.pick_one(&catalog.items_in(category)).ok().copied();
        let crop = pick(ItemCategory::Crop);
        let dish = pick(ItemCategory::Cooked);
        let fish = pick(ItemCategory::Fish);
        let item = rng
            .pick_one(&catalog.items_below_difficulty(Difficulty::LargeTimeRequirements))
            .ok()
            .copied();

        Ok(Self {
            person,
            other_person,
            crop,
            dish,
            fish,
            item,
            count:  rng.next_int_in_range(2, 10)?,
            reward: rng.next_int_in_range(300, 3000)?,
        })
    }

    fn item_for(&self, quest: &QuestDefinition, catalog: &'a Catalog) -> Option<&'a CatalogItem> {
        match quest.kind {
            QuestItemType::Static => quest.item_id.as_deref().and_then(|id| catalog.expect_item(id, "static quest")),
            QuestItemType::Crop   => self.crop,
            QuestItemType::Dish   => self.dish,
            QuestItemType::Fish   => self.fish,
            QuestItemType::Item   => self.item,
        }
    }
}

pub struct QuestRandomizer;

impl RandomizerModule for QuestRandomizer {
    fn name(&self) -> &'static str {
        "quests"
    }

    fn produces(&self) -> &'static [&'static str] {
        &[QUESTS_KEY, MAIL_KEY]
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
        if !ctx.config.quests {
            return Ok(());
        }

        let mut rng = ctx.farm_stream()?;
        let catalog = ctx.catalog;
        ctx.spoiler_section("QUESTS", true);

        let mut quests = Map::new();
        let mut mail = Map::new();
        for quest in &catalog.quests {
            let draw = QuestDraw::new(&mut rng, catalog)?;
            let Some(item) = draw.item_for(quest, catalog) else {
                log::warn!("quests: no item available for quest {}", quest.id);
                continue;
            };
            let giver = draw.person.clone().unwrap_or_default();
            let other = draw.other_person.clone().unwrap_or_default();

            ctx.spoiler_line(format!(
                "Quest {}: {giver} wants {} {} ({}g)",
                quest.id, draw.count, item.name, draw.reward
            ));
            quests.insert(
                quest.id.clone(),
                json!({
                    "giver":  giver,
                    "other":  other,
                    "item":   item.id,
                    "count":  draw.count,
                    "reward": draw.reward,
                }),
            );
            if let Some(key) = &quest.mail_key {
                mail.insert(
                    key.clone(),
                    Value::String(format!(
                        "{giver} needs {} {}. {other} said you might help. Reward: {}g",
                        draw.count, item.name, draw.reward
                    )),
                );
            }
        }

        ctx.write(QUESTS_KEY, Value::Object(quests))?;
        if !mail.is_empty() {
            ctx.write(MAIL_KEY, Value::Object(mail))?;
        }
        Ok(())
    }
}
