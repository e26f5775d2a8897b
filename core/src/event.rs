//! The host event surface. Everything the game tells the randomizer, and
//! everything the randomizer answers.
//!
//! Variants are added as the host integration grows. Never reordered.

use crate::{
    stock::ShopStock,
    types::{AssetKey, Seed, ShopId},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEvent {
    // ── Lifecycle ──────────────────────────────────
    GameLaunched {
        locale: String,
    },
    SaveLoaded {
        farm_name: String,
        day_index: u64,
    },
    DayEnding,
    Saving,
    Saved,
    ReturnedToTitle,
    LocaleChanged {
        locale: String,
    },

    // ── Menus ──────────────────────────────────────
    MenuOpened {
        shop_id: ShopId,
        #[serde(default)]
        stock:   ShopStock,
    },
    MenuClosed {
        shop_id: ShopId,
    },

    // ── Content ────────────────────────────────────
    AssetRequested {
        key: AssetKey,
    },

    // ── Player state ───────────────────────────────
    RecipeLearned {
        item_id: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostResponse {
    Ack,
    Invalidated {
        keys: Vec<AssetKey>,
    },
    PassCompleted {
        root_seed:        Seed,
        modules_run:      Vec<String>,
        keys_invalidated: Vec<AssetKey>,
        spoiler_path:     Option<PathBuf>,
    },
    Stock {
        shop_id: ShopId,
        entries: ShopStock,
    },
    Asset {
        key:         AssetKey,
        replacement: Option<Value>,
    },
}
