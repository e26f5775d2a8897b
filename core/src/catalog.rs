//! Game content catalog. The external item/NPC/quest data the
//! randomizer modules draw from.
//!
//! The catalog is content, not engine: the host (or the runner's data
//! directory) supplies it. Lookups that should succeed but don't are
//! data-integrity warnings; callers substitute a documented default and
//! carry on.

use crate::types::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const BEER_ID: &str     = "(O)346";
pub const COFFEE_ID: &str   = "(O)395";
pub const SLIME_ID: &str    = "(O)766";
pub const COAL_ID: &str     = "(O)382";
pub const GOLD_ORE_ID: &str = "(O)384";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    NoRequirements,
    SmallTimeRequirements,
    MediumTimeRequirements,
    LargeTimeRequirements,
    UncommonItem,
    RareItem,
    EndgameItem,
    Impossible,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::NoRequirements
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Object,
    Resource,
    Crop,
    Fish,
    Cooked,
    MonsterLoot,
    Furniture,
    Hat,
    Clothing,
    BigCraftable,
    Boots,
    MeleeWeapon,
    Totem,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id:            ItemId,
    pub name:          String,
    pub category:      ItemCategory,
    pub sale_price:    u32,
    #[serde(default)]
    pub difficulty:    Difficulty,
    #[serde(default)]
    pub craftable:     bool,
    #[serde(default)]
    pub gift_category: Option<i32>,
}

impl CatalogItem {
    /// Plain objects: anything that isn't furniture, wearable, gear,
    /// a big craftable or a totem.
    pub fn is_object(&self) -> bool {
        matches!(
            self.category,
            ItemCategory::Object
                | ItemCategory::Resource
                | ItemCategory::Crop
                | ItemCategory::Fish
                | ItemCategory::Cooked
                | ItemCategory::MonsterLoot
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonsterData {
    pub name:  String,
    /// Raw drop string: "itemId probability itemId probability ...".
    pub drops: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestItemType {
    Static,
    Crop,
    Dish,
    Fish,
    Item,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestDefinition {
    pub id:       String,
    pub kind:     QuestItemType,
    #[serde(default)]
    pub mail_key: Option<String>,
    /// Item for `Static` quests.
    #[serde(default)]
    pub item_id:  Option<ItemId>,
}

/// A farm building and its unrandomized gold cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildingDefinition {
    pub name:       String,
    pub build_cost: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Catalog {
    pub items:                   Vec<CatalogItem>,
    pub monsters:                Vec<MonsterData>,
    pub npc_swap_pools:          Vec<Vec<String>>,
    pub giftable_npcs:           Vec<String>,
    pub gift_categories:         BTreeMap<i32, String>,
    pub questable_npcs:          Vec<String>,
    pub quests:                  Vec<QuestDefinition>,
    pub artifact_spot_locations: Vec<String>,
    /// locale → (string key → text)
    pub ui_strings:              BTreeMap<String, BTreeMap<String, String>>,
    pub critter_variants:        Vec<String>,
    pub rain_variants:           Vec<String>,
    pub pets:                    Vec<String>,
    pub farm_animals:            Vec<String>,
    /// Song cue names.
    pub songs:                   Vec<String>,
    pub buildings:               Vec<BuildingDefinition>,
}

impl Catalog {
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/catalog.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let catalog: Catalog = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(catalog)
    }

    pub fn item(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Look up an item that is expected to exist; warn when it doesn't.
    pub fn expect_item(&self, id: &str, context: &str) -> Option<&CatalogItem> {
        let found = self.item(id);
        if found.is_none() {
            log::warn!("catalog: missing item {id} ({context})");
        }
        found
    }

    /// Name for display, or the raw id when the item is unknown.
    pub fn item_name(&self, id: &str) -> String {
        self.item(id).map(|i| i.name.clone()).unwrap_or_else(|| id.to_string())
    }

    pub fn items_in(&self, category: ItemCategory) -> Vec<&CatalogItem> {
        self.items.iter().filter(|i| i.category == category).collect()
    }

    pub fn items_at_difficulty(&self, difficulty: Difficulty) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|i| i.is_object() && i.difficulty == difficulty)
            .collect()
    }

    pub fn items_below_difficulty(&self, difficulty: Difficulty) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|i| i.is_object() && i.difficulty < difficulty)
            .collect()
    }

    pub fn giftables(&self) -> Vec<&CatalogItem> {
        self.items.iter().filter(|i| i.gift_category.is_some()).collect()
    }

    pub fn craftables(&self) -> Vec<&CatalogItem> {
        self.items.iter().filter(|i| i.craftable).collect()
    }

    /// A small but complete catalog for tests.
    pub fn default_test() -> Self {
        use Difficulty::*;
        use ItemCategory::*;

        let rows: &[(&str, &str, ItemCategory, u32, Difficulty, bool, Option<i32>)] = &[
            // Resources and basic objects
            ("(O)388", "Wood",            Resource,    2,    NoRequirements,         false, Some(-16)),
            ("(O)390", "Stone",           Resource,    2,    NoRequirements,         false, Some(-16)),
            ("(O)330", "Clay",            Resource,    20,   SmallTimeRequirements,  false, Some(-16)),
            ("(O)771", "Fiber",           Resource,    1,    NoRequirements,         false, Some(-16)),
            ("(O)382", "Coal",            Resource,    15,   SmallTimeRequirements,  false, Some(-15)),
            ("(O)378", "Copper Ore",      Resource,    5,    SmallTimeRequirements,  false, Some(-15)),
            ("(O)380", "Iron Ore",        Resource,    10,   MediumTimeRequirements, false, Some(-15)),
            ("(O)384", "Gold Ore",        Resource,    25,   LargeTimeRequirements,  false, Some(-15)),
            ("(O)386", "Iridium Ore",     Resource,    100,  RareItem,               false, Some(-15)),
            ("(O)60",  "Emerald",         Object,      250,  UncommonItem,           false, Some(-2)),
            ("(O)62",  "Aquamarine",      Object,      180,  UncommonItem,           false, Some(-2)),
            ("(O)72",  "Diamond",         Object,      750,  RareItem,               false, Some(-2)),
            ("(O)337", "Iridium Bar",     Object,      1000, EndgameItem,            false, Some(-15)),
            ("(O)335", "Iron Bar",        Object,      120,  MediumTimeRequirements, false, Some(-15)),
            ("(O)336", "Gold Bar",        Object,      250,  LargeTimeRequirements,  false, Some(-15)),
            ("(O)787", "Battery Pack",    Object,      500,  LargeTimeRequirements,  false, None),
            ("(O)428", "Cloth",           Object,      470,  MediumTimeRequirements, false, Some(-26)),
            // Monster loot
            ("(O)766", "Slime",           MonsterLoot, 5,    NoRequirements,         false, Some(-28)),
            ("(O)767", "Bat Wing",        MonsterLoot, 15,   SmallTimeRequirements,  false, Some(-28)),
            ("(O)684", "Bug Meat",        MonsterLoot, 8,    SmallTimeRequirements,  false, Some(-28)),
            ("(O)768", "Solar Essence",   MonsterLoot, 40,   MediumTimeRequirements, false, Some(-28)),
            ("(O)769", "Void Essence",    MonsterLoot, 50,   LargeTimeRequirements,  false, Some(-28)),
            // Crops and fish
            ("(O)24",  "Parsnip",         Crop,        35,   NoRequirements,         false, Some(-75)),
            ("(O)284", "Beet",            Crop,        100,  SmallTimeRequirements,  false, Some(-75)),
            ("(O)254", "Melon",           Crop,        250,  MediumTimeRequirements, false, Some(-79)),
            ("(O)276", "Pumpkin",         Crop,        320,  MediumTimeRequirements, false, Some(-75)),
            ("(O)136", "Largemouth Bass", Fish,        100,  SmallTimeRequirements,  false, Some(-4)),
            ("(O)145", "Sunfish",         Fish,        30,   NoRequirements,         false, Some(-4)),
            ("(O)143", "Catfish",         Fish,        200,  MediumTimeRequirements, false, Some(-4)),
            // Cooked dishes
            ("(O)346", "Beer",            Cooked,      200,  SmallTimeRequirements,  false, Some(-26)),
            ("(O)395", "Coffee",          Cooked,      150,  SmallTimeRequirements,  false, Some(-26)),
            ("(O)194", "Fried Egg",       Cooked,      35,   SmallTimeRequirements,  false, Some(-7)),
            ("(O)196", "Salad",           Cooked,      110,  SmallTimeRequirements,  false, Some(-7)),
            ("(O)198", "Baked Fish",      Cooked,      100,  MediumTimeRequirements, false, Some(-7)),
            ("(O)200", "Vegetable Medley",Cooked,      120,  MediumTimeRequirements, false, Some(-7)),
            ("(O)206", "Pizza",           Cooked,      300,  MediumTimeRequirements, false, Some(-7)),
            ("(O)211", "Pancakes",        Cooked,      80,   SmallTimeRequirements,  false, Some(-7)),
            ("(O)214", "Crispy Bass",     Cooked,      150,  MediumTimeRequirements, false, Some(-7)),
            ("(O)228", "Maki Roll",       Cooked,      220,  MediumTimeRequirements, false, Some(-7)),
            // Furniture
            ("(F)0",    "Oak Chair",      Furniture,   350,  NoRequirements,         false, None),
            ("(F)3",    "Walnut Chair",   Furniture,   350,  NoRequirements,         false, None),
            ("(F)131",  "Birch Table",    Furniture,   750,  NoRequirements,         false, None),
            ("(F)1228", "Tropical Bed",   Furniture,   2500, NoRequirements,         false, None),
            ("(F)1362", "Small Plant",    Furniture,   250,  NoRequirements,         false, None),
            ("(F)1376", "House Plant",    Furniture,   250,  NoRequirements,         false, None),
            ("(F)1402", "Calendar",       Furniture,   2000, NoRequirements,         false, None),
            // Hats and clothing
            ("(H)0",    "Cowboy Hat",     Hat,         1000, NoRequirements,         false, None),
            ("(H)4",    "Top Hat",        Hat,         1000, NoRequirements,         false, None),
            ("(S)1000", "Classic Shirt",  Clothing,    50,   NoRequirements,         false, None),
            ("(P)1",    "Farmer Pants",   Clothing,    50,   NoRequirements,         false, None),
            // Big craftables
            ("(BC)13",  "Furnace",        BigCraftable, 50,  SmallTimeRequirements,  true,  None),
            ("(BC)15",  "Preserves Jar",  BigCraftable, 50,  SmallTimeRequirements,  true,  None),
            ("(BC)16",  "Cheese Press",   BigCraftable, 50,  MediumTimeRequirements, true,  None),
            ("(BC)21",  "Crystalarium",   BigCraftable, 50,  LargeTimeRequirements,  true,  None),
            // Gear
            ("(B)504",  "Sneakers",       Boots,       500,  NoRequirements,         false, None),
            ("(B)506",  "Leather Boots",  Boots,       1000, SmallTimeRequirements,  false, None),
            ("(W)0",    "Rusty Sword",    MeleeWeapon, 100,  NoRequirements,         false, None),
            ("(W)4",    "Galaxy Sword",   MeleeWeapon, 10000,RareItem,               false, None),
            // Totems
            ("(O)688", "Warp Totem: Farm",      Totem, 20, MediumTimeRequirements, true, None),
            ("(O)689", "Warp Totem: Mountains", Totem, 20, MediumTimeRequirements, true, None),
            ("(O)690", "Warp Totem: Beach",     Totem, 20, MediumTimeRequirements, true, None),
            ("(O)261", "Warp Totem: Desert",    Totem, 20, LargeTimeRequirements,  true, None),
            ("(O)681", "Rain Totem",            Totem, 20, MediumTimeRequirements, true, None),
        ];

        let items = rows
            .iter()
            .map(|(id, name, category, price, difficulty, craftable, gift)| CatalogItem {
                id:            (*id).into(),
                name:          (*name).into(),
                category:      *category,
                sale_price:    *price,
                difficulty:    *difficulty,
                craftable:     *craftable,
                gift_category: *gift,
            })
            .collect();

        let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let mut en = BTreeMap::new();
        en.insert("JunimoNote_BundleRemixed".to_string(), "Remixed bundles".to_string());
        en.insert("JunimoNote_RewardRemixed".to_string(), "A remixed reward".to_string());
        let mut fr = BTreeMap::new();
        fr.insert("JunimoNote_BundleRemixed".to_string(), "Paquets remixés".to_string());
        let mut ui_strings = BTreeMap::new();
        ui_strings.insert("en".to_string(), en);
        ui_strings.insert("fr".to_string(), fr);

        let gift_categories = [
            (-2, "Gems"), (-4, "Fish"), (-7, "Cooking"), (-15, "Metals"),
            (-16, "Resources"), (-26, "Artisan Goods"), (-28, "Monster Loot"),
            (-75, "Vegetables"), (-79, "Fruit"),
        ]
        .into_iter()
        .map(|(id, name)| (id, name.to_string()))
        .collect();

        let quest = |id: &str, kind, mail: Option<&str>, item: Option<&str>| QuestDefinition {
            id:       id.into(),
            kind,
            mail_key: mail.map(Into::into),
            item_id:  item.map(Into::into),
        };

        Self {
            items,
            monsters: vec![
                MonsterData { name: "Green Slime".into(), drops: "766 .75 766 .05 153 .3".into() },
                MonsterData { name: "Bat".into(),         drops: "767 .9 767 .4 -4 .1".into() },
                MonsterData { name: "Bug".into(),         drops: "684 .76 684 .1".into() },
                MonsterData { name: "Shadow Brute".into(),drops: "769 .75 -6 .1".into() },
            ],
            npc_swap_pools: vec![
                names(&["Abigail", "Alex", "Caroline", "Emily", "Gus", "Haley", "Leah", "Pierre"]),
                names(&["Dwarf", "Krobus"]),
                names(&["Gunther", "MrQi"]),
            ],
            giftable_npcs: names(&["Abigail", "Alex", "Emily", "Gus", "Krobus", "Leah"]),
            gift_categories,
            questable_npcs: names(&["Alex", "Emily", "Gus", "Haley", "Leah", "Pierre", "Robin", "Willy"]),
            quests: vec![
                quest("3",   QuestItemType::Static, None,                Some("(O)284")),
                quest("22",  QuestItemType::Static, None,                Some("(O)136")),
                quest("101", QuestItemType::Crop,   Some("spring_19_1"), None),
                quest("103", QuestItemType::Dish,   Some("summer_14_1"), None),
                quest("109", QuestItemType::Fish,   Some("winter_2_1"),  None),
                quest("110", QuestItemType::Item,   Some("winter_6_1"),  None),
            ],
            artifact_spot_locations: names(&["Town", "Mountain", "Forest", "Beach", "Desert"]),
            ui_strings,
            critter_variants: names(&["crittersBears", "crittersseagullcrow", "crittersWsquirrelPseagull", "crittersBlueBunny"]),
            rain_variants: names(&["Blue", "Green", "Purple", "Red"]),
            pets: names(&["cat", "dog"]),
            farm_animals: names(&["Pig", "Goat", "Brown Cow", "White Cow"]),
            songs: names(&[
                "CloudCountry", "grandpas_theme", "spring1", "springtown", "Saloon1",
                "summer1", "fall1", "winter1", "WizardSong", "FlowerDance",
                "moonlightJellies", "Of Dwarves", "christmasTheme", "EmilyTheme",
            ]),
            buildings: [
                ("Silo", 100), ("Mill", 2500), ("Shipping Bin", 250), ("Coop", 4000),
                ("Big Coop", 10000), ("Deluxe Coop", 20000), ("Barn", 6000),
                ("Big Barn", 12000), ("Deluxe Barn", 25000), ("Slime Hutch", 10000),
                ("Shed", 15000), ("Cabin", 100), ("Well", 1000), ("Fish Pond", 5000),
                ("Stable", 10000),
            ]
            .into_iter()
            .map(|(name, build_cost)| BuildingDefinition { name: name.to_string(), build_cost })
            .collect(),
        }
    }
}
