//! Remixed-bundle UI text. Depends only on the locale, so it runs in the
//! pre-load pass and again whenever the locale changes.

use crate::{
    error::RandoResult,
    module::{ModuleContext, Pass, RandomizerModule},
};
use serde_json::{Map, Value};

pub const UI_STRINGS_KEY: &str = "Strings/UI";
const FALLBACK_LOCALE: &str = "en";

pub struct UiStringsRandomizer;

impl RandomizerModule for UiStringsRandomizer {
    fn name(&self) -> &'static str {
        "ui_strings"
    }

    fn produces(&self) -> &'static [&'static str] {
        &[UI_STRINGS_KEY]
    }

    fn pass(&self) -> Pass {
        Pass::PreLoad
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
        if !ctx.config.remixed_bundle_ui {
            return Ok(());
        }

        let strings = match ctx.catalog.ui_strings.get(ctx.locale) {
            Some(strings) => strings,
            None => {
                log::warn!("ui_strings: no strings for locale '{}', using '{FALLBACK_LOCALE}'", ctx.locale);
                match ctx.catalog.ui_strings.get(FALLBACK_LOCALE) {
                    Some(strings) => strings,
                    None => return Ok(()),
                }
            }
        };

        let entries: Map<String, Value> = strings
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        ctx.write(UI_STRINGS_KEY, Value::Object(entries))
    }
}
