//! Music. Every song cue plays some other song from the same list;
//! the list is a permutation, so each song is used exactly once.

use crate::{
    error::RandoResult,
    module::{ModuleContext, RandomizerModule},
};
use serde_json::Value;

pub const MUSIC_PREFIX: &str = "Music/";

/// The asset key for a song cue. Cue names are matched case-insensitively.
pub fn music_key(song: &str) -> String {
    format!("{MUSIC_PREFIX}{}", song.to_lowercase())
}

pub struct MusicRandomizer;

impl RandomizerModule for MusicRandomizer {
    fn name(&self) -> &'static str {
        "music"
    }

    fn produces(&self) -> &'static [&'static str] {
        &["Music/*"]
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
        if !ctx.config.music {
            return Ok(());
        }

        let mut rng = ctx.farm_stream()?;
        let catalog = ctx.catalog;
        ctx.spoiler_section("MUSIC", true);

        let mut replacements = catalog.songs.clone();
        for song in &catalog.songs {
            let plays = rng.pick_and_remove(&mut replacements)?;
            ctx.spoiler_line(format!("{song} is now {plays}"));
            ctx.write(music_key(song), Value::String(plays))?;
        }
        Ok(())
    }
}
