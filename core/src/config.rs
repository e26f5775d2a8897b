//! Randomizer configuration: a nested set of flags and count ranges.
//!
//! RULE: Configuration is read-only. It is loaded once, validated at the
//! start of every per-save pass, and passed explicitly into every module
//! and shop call. No component mutates it.

use crate::{
    error::{RandoError, RandoResult},
    rendered_image_randomizer::RENDERED_PREFIX,
    rng::RandomStream,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The host's item name and description table.
pub const OBJECT_INFORMATION_KEY: &str = "Data/ObjectInformation";

/// An inclusive count range drawn with `next_int_in_range`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn validate(&self) -> RandoResult<()> {
        if self.min > self.max {
            return Err(RandoError::InvalidRange {
                min: i64::from(self.min),
                max: i64::from(self.max),
            });
        }
        Ok(())
    }

    pub fn draw(&self, rng: &mut RandomStream) -> RandoResult<usize> {
        let value = rng.next_int_in_range(i64::from(self.min), i64::from(self.max))?;
        Ok(value as usize)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopsConfig {
    pub randomize_club_shop:   bool,
    pub randomize_saloon_shop: bool,
    pub randomize_sewer_shop:  bool,
    pub club_furniture:        CountRange,
    pub club_misc_items:       CountRange,
    pub saloon_cooked_items:   CountRange,
    pub saloon_recipes:        CountRange,
    pub sewer_furniture:       CountRange,
    pub sewer_big_craftables:  CountRange,
}

impl Default for ShopsConfig {
    fn default() -> Self {
        Self {
            randomize_club_shop:   true,
            randomize_saloon_shop: true,
            randomize_sewer_shop:  true,
            club_furniture:        CountRange::new(3, 5),
            club_misc_items:       CountRange::new(2, 3),
            saloon_cooked_items:   CountRange::new(3, 5),
            saloon_recipes:        CountRange::new(3, 5),
            sewer_furniture:       CountRange::new(2, 4),
            sewer_big_craftables:  CountRange::new(1, 2),
        }
    }
}

impl ShopsConfig {
    fn ranges(&self) -> [&CountRange; 6] {
        [
            &self.club_furniture,
            &self.club_misc_items,
            &self.saloon_cooked_items,
            &self.saloon_recipes,
            &self.sewer_furniture,
            &self.sewer_big_craftables,
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    pub sprite_shuffle:                   bool,
    pub randomize_individual_preferences: bool,
    pub randomize_universal_preferences:  bool,
}

impl Default for NpcConfig {
    fn default() -> Self {
        Self {
            sprite_shuffle:                   true,
            randomize_individual_preferences: true,
            randomize_universal_preferences:  true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    pub randomize: bool,
}

impl Default for ToggleConfig {
    fn default() -> Self {
        Self { randomize: true }
    }
}

/// One image rendered by the host's background step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderedImage {
    pub asset_key:   String,
    pub output_path: PathBuf,
    #[serde(default = "enabled_by_default")]
    pub enabled:     bool,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    pub outputs:          Vec<RenderedImage>,
    pub poll_interval_ms: u64,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            outputs:          Vec::new(),
            poll_interval_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoilerConfig {
    pub enabled:    bool,
    /// Directory for the per-save file. `None` keeps the log in memory only.
    pub output_dir: Option<PathBuf>,
}

impl Default for SpoilerConfig {
    fn default() -> Self {
        Self {
            enabled:    true,
            output_dir: Some(PathBuf::from(".")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomizerConfig {
    pub shops:                 ShopsConfig,
    pub npcs:                  NpcConfig,
    pub crafting_recipes:      ToggleConfig,
    pub monsters:              ToggleConfig,
    pub weapons:               ToggleConfig,
    pub boots:                 ToggleConfig,
    pub animal_skins:          bool,
    pub rain:                  bool,
    pub artifact_spot_items:   bool,
    pub quests:                bool,
    pub remixed_bundle_ui:     bool,
    pub music:                 bool,
    pub building_costs:        bool,
    pub critter_hue_shift_max: u32,
    pub images:                ImagesConfig,
    pub spoiler_log:           SpoilerConfig,
    /// Keys served unreplaced from day end until the save is written.
    /// The host's day-end order processing must see the original table;
    /// the sold-items summary shown while saving sees the replacement.
    pub suspend_until_saving:  Vec<String>,
}

impl Default for RandomizerConfig {
    fn default() -> Self {
        Self {
            shops:                 ShopsConfig::default(),
            npcs:                  NpcConfig::default(),
            crafting_recipes:      ToggleConfig::default(),
            monsters:              ToggleConfig::default(),
            weapons:               ToggleConfig::default(),
            boots:                 ToggleConfig::default(),
            animal_skins:          true,
            rain:                  true,
            artifact_spot_items:   true,
            quests:                true,
            remixed_bundle_ui:     true,
            music:                 true,
            building_costs:        true,
            critter_hue_shift_max: 100,
            images:                ImagesConfig::default(),
            spoiler_log:           SpoilerConfig::default(),
            suspend_until_saving:  vec![OBJECT_INFORMATION_KEY.to_string()],
        }
    }
}

impl RandomizerConfig {
    /// Load from the data/ directory.
    /// In tests, use RandomizerConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: RandomizerConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Every randomization flag on, original count ranges, and the spoiler
    /// log kept in memory.
    pub fn default_test() -> Self {
        Self {
            spoiler_log: SpoilerConfig {
                enabled:    true,
                output_dir: None,
            },
            ..Self::default()
        }
    }

    /// Reject malformed ranges and image keys. Runs before any random draw.
    pub fn validate(&self) -> RandoResult<()> {
        for range in self.shops.ranges() {
            range.validate()?;
        }
        for image in &self.images.outputs {
            if !image.asset_key.starts_with(RENDERED_PREFIX) {
                return Err(RandoError::UndeclaredAsset {
                    module: "rendered_images".to_string(),
                    asset:  image.asset_key.clone(),
                });
            }
        }
        Ok(())
    }
}
