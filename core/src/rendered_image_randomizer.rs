//! Images rendered by the host's background step.
//!
//! Each enabled output is waited for (poll + sleep, no timeout) and then
//! registered as a load replacement pointing at the rendered file.

use crate::{
    error::RandoResult,
    host::wait_for_file,
    module::{ModuleContext, RandomizerModule},
};
use serde_json::json;
use std::time::Duration;

pub const RENDERED_PREFIX: &str = "Rendered/";

pub struct RenderedImageRandomizer;

impl RandomizerModule for RenderedImageRandomizer {
    fn name(&self) -> &'static str {
        "rendered_images"
    }

    fn produces(&self) -> &'static [&'static str] {
        &["Rendered/*"]
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
        let config = ctx.config;
        let images = &config.images;
        let poll_interval = Duration::from_millis(images.poll_interval_ms);

        for output in images.outputs.iter().filter(|o| o.enabled) {
            let polls = wait_for_file(&output.output_path, poll_interval);
            log::debug!(
                "rendered_images: {} ready after {polls} polls",
                output.output_path.display()
            );
            ctx.write(
                output.asset_key.clone(),
                json!({ "path": output.output_path.display().to_string() }),
            )?;
        }
        Ok(())
    }
}
