pub mod calendar;
pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod host;
pub mod module;
pub mod orchestrator;
pub mod registry;
pub mod rng;
pub mod seed;
pub mod session;
pub mod snapshot;
pub mod spoiler;
pub mod stock;
pub mod types;

// Randomizer modules
pub mod animal_skin_randomizer;
pub mod artifact_spot_randomizer;
pub mod building_randomizer;
pub mod crafting_recipe_randomizer;
pub mod gift_taste_randomizer;
pub mod monster_drop_randomizer;
pub mod music_randomizer;
pub mod npc_skin_randomizer;
pub mod quest_randomizer;
pub mod rain_randomizer;
pub mod rendered_image_randomizer;
pub mod ui_strings_randomizer;

// Shops
pub mod adventure_shop;
pub mod club_shop;
pub mod saloon_shop;
pub mod sewer_shop;
