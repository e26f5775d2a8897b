//! Randomizer module trait and the context each module runs in.
//!
//! RULE: Every randomizer implements RandomizerModule.
//! The orchestrator calls run() on each registered module in dependency
//! order, once per pass. Modules are stateless between runs: everything
//! they need arrives through the ModuleContext, everything they produce
//! leaves through it.

use crate::{
    calendar::GameDate,
    catalog::Catalog,
    config::RandomizerConfig,
    error::{RandoError, RandoResult},
    registry::{ReplacementRegistry, ReplacementTable},
    rng::RandomStream,
    seed::SeedHierarchy,
    spoiler::SpoilerLog,
};
use serde_json::Value;

/// Which computation pass a module belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Runs before any save is chosen. No player seed available.
    PreLoad,
    /// Runs once per save load, seeded from the farm name.
    PerSave,
}

/// How often a per-save module's tables are recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    OncePerSave,
    /// Recomputed at every day end with a day-scoped stream.
    Daily,
}

/// The contract every randomizer module must fulfill.
pub trait RandomizerModule: Send {
    /// Unique stable name. Also the default stream purpose.
    fn name(&self) -> &'static str;

    /// Logical-asset-keys this module may write. A trailing `*` matches
    /// any key with that prefix.
    fn produces(&self) -> &'static [&'static str];

    /// Modules that must run before this one.
    fn depends_on(&self) -> &'static [&'static str] {
        &[]
    }

    fn pass(&self) -> Pass {
        Pass::PerSave
    }

    fn refresh(&self) -> Refresh {
        Refresh::OncePerSave
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()>;
}

pub fn pattern_matches(pattern: &str, key: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => key.starts_with(prefix),
        None => pattern == key,
    }
}

/// True if some key could match both patterns.
pub fn patterns_overlap(a: &str, b: &str) -> bool {
    match (a.strip_suffix('*'), b.strip_suffix('*')) {
        (Some(pa), Some(pb)) => pa.starts_with(pb) || pb.starts_with(pa),
        (Some(_), None) => pattern_matches(a, b),
        (None, Some(_)) => pattern_matches(b, a),
        (None, None) => a == b,
    }
}

/// Everything a module may read, and the only place it may write.
pub struct ModuleContext<'a> {
    module:      &'static str,
    produces:    &'static [&'static str],
    pub config:  &'a RandomizerConfig,
    pub catalog: &'a Catalog,
    pub date:    GameDate,
    pub locale:  &'a str,
    seeds:       Option<SeedHierarchy>,
    earlier:     &'a ReplacementRegistry,
    table:       ReplacementTable,
    spoiler:     &'a mut SpoilerLog,
}

impl<'a> ModuleContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        module:  &dyn RandomizerModule,
        config:  &'a RandomizerConfig,
        catalog: &'a Catalog,
        date:    GameDate,
        locale:  &'a str,
        seeds:   Option<SeedHierarchy>,
        earlier: &'a ReplacementRegistry,
        spoiler: &'a mut SpoilerLog,
    ) -> Self {
        Self {
            module: module.name(),
            produces: module.produces(),
            config,
            catalog,
            date,
            locale,
            seeds,
            earlier,
            table: ReplacementTable::new(module.name()),
            spoiler,
        }
    }

    pub fn module(&self) -> &'static str {
        self.module
    }

    pub fn seeds(&self) -> RandoResult<SeedHierarchy> {
        self.seeds.ok_or_else(|| RandoError::SeedUnavailable {
            module: self.module.to_string(),
        })
    }

    /// The module's own save-long stream, keyed by its name.
    pub fn farm_stream(&self) -> RandoResult<RandomStream> {
        Ok(self.seeds()?.farm_stream(self.module))
    }

    /// The module's own day-scoped stream for the context date.
    pub fn daily_stream(&self) -> RandoResult<RandomStream> {
        Ok(self.seeds()?.daily_stream(self.module, self.date))
    }

    /// A value written earlier in this pass by a dependency.
    pub fn dependency(&self, key: &str) -> Option<&Value> {
        self.earlier.get(key)
    }

    pub fn write(&mut self, key: impl Into<String>, value: Value) -> RandoResult<()> {
        let key = key.into();
        if !self.produces.iter().any(|p| pattern_matches(p, &key)) {
            return Err(RandoError::UndeclaredAsset {
                module: self.module.to_string(),
                asset:  key,
            });
        }
        self.table.entries.insert(key, value);
        Ok(())
    }

    pub fn spoiler_section(&mut self, title: &str, record: bool) {
        self.spoiler.begin_section(title, record);
    }

    pub fn spoiler_line(&mut self, text: impl Into<String>) {
        self.spoiler.line(text);
    }

    pub(crate) fn into_table(self) -> ReplacementTable {
        self.spoiler.end_section();
        self.table
    }
}
