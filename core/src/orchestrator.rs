//! The replacement orchestrator.
//!
//! EXECUTION ORDER (computed once, before any random draw):
//!   Modules run in topological order of their declared dependencies.
//!   Ties are broken by registration order, so the order is stable
//!   across runs and machines.
//!
//! RULES:
//!   - The module graph is validated before the first draw. A cycle, an
//!     unknown dependency or two modules claiming one asset aborts the
//!     pass with no side effects.
//!   - Every per-save pass rebuilds every table from scratch and
//!     publishes them together. Re-running with the same seed
//!     reproduces byte-identical tables.
//!   - The spoiler log is written once, at the end of the pass. A write
//!     failure is logged and never blocks publication.
//!   - After publication the host is asked to invalidate every key that
//!     was or now is replaced.

use crate::{
    animal_skin_randomizer::AnimalSkinRandomizer,
    artifact_spot_randomizer::ArtifactSpotRandomizer,
    building_randomizer::BuildingRandomizer,
    calendar::GameDate,
    catalog::Catalog,
    config::RandomizerConfig,
    crafting_recipe_randomizer::CraftingRecipeRandomizer,
    error::{RandoError, RandoResult},
    gift_taste_randomizer::GiftTasteRandomizer,
    host::ContentHost,
    module::{patterns_overlap, ModuleContext, Pass, RandomizerModule, Refresh},
    monster_drop_randomizer::MonsterDropRandomizer,
    music_randomizer::MusicRandomizer,
    npc_skin_randomizer::NpcSkinRandomizer,
    quest_randomizer::QuestRandomizer,
    rain_randomizer::RainRandomizer,
    registry::{AssetResponse, ReplacementRegistry, ReplacementTable},
    rendered_image_randomizer::RenderedImageRandomizer,
    seed::SeedHierarchy,
    snapshot::RegistrySnapshot,
    spoiler::SpoilerLog,
    types::{AssetKey, Seed},
    ui_strings_randomizer::UiStringsRandomizer,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    path::PathBuf,
};

/// What a per-save pass did.
#[derive(Debug)]
pub struct PassReport {
    pub root_seed:        Seed,
    pub modules_run:      Vec<&'static str>,
    pub keys_invalidated: Vec<AssetKey>,
    pub spoiler:          SpoilerLog,
    pub spoiler_path:     Option<PathBuf>,
}

pub struct ReplacementOrchestrator {
    modules: Vec<Box<dyn RandomizerModule>>,
    order:   Option<Vec<usize>>,
    preload: ReplacementRegistry,
    save:    ReplacementRegistry,
    seeds:   Option<SeedHierarchy>,
}

impl Default for ReplacementOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplacementOrchestrator {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            order:   None,
            preload: ReplacementRegistry::new(),
            save:    ReplacementRegistry::new(),
            seeds:   None,
        }
    }

    /// Build an orchestrator with every shipped module registered and the
    /// execution order validated.
    pub fn build() -> RandoResult<Self> {
        let mut orchestrator = Self::new();

        // Registration order is the tie-breaker; dependencies decide the rest.
        orchestrator.register(Box::new(UiStringsRandomizer));
        orchestrator.register(Box::new(AnimalSkinRandomizer));
        orchestrator.register(Box::new(NpcSkinRandomizer));
        orchestrator.register(Box::new(MonsterDropRandomizer));
        orchestrator.register(Box::new(CraftingRecipeRandomizer));
        orchestrator.register(Box::new(ArtifactSpotRandomizer));
        orchestrator.register(Box::new(GiftTasteRandomizer));
        orchestrator.register(Box::new(QuestRandomizer));
        orchestrator.register(Box::new(RainRandomizer));
        orchestrator.register(Box::new(MusicRandomizer));
        orchestrator.register(Box::new(BuildingRandomizer));
        orchestrator.register(Box::new(RenderedImageRandomizer));

        orchestrator.resolve()?;
        Ok(orchestrator)
    }

    /// Register a module. Invalidates any previously resolved order.
    pub fn register(&mut self, module: Box<dyn RandomizerModule>) {
        self.modules.push(module);
        self.order = None;
    }

    /// Validate the module graph and compute the execution order.
    pub fn resolve(&mut self) -> RandoResult<()> {
        if self.order.is_none() {
            self.order = Some(self.compute_order()?);
        }
        Ok(())
    }

    /// Module names in execution order.
    pub fn module_order(&mut self) -> RandoResult<Vec<&'static str>> {
        let order = self.ordered()?;
        Ok(order.iter().map(|&i| self.modules[i].name()).collect())
    }

    fn ordered(&mut self) -> RandoResult<Vec<usize>> {
        self.resolve()?;
        Ok(self.order.clone().unwrap_or_default())
    }

    fn compute_order(&self) -> RandoResult<Vec<usize>> {
        let mut by_name: BTreeMap<&'static str, usize> = BTreeMap::new();
        for (i, module) in self.modules.iter().enumerate() {
            if by_name.insert(module.name(), i).is_some() {
                return Err(RandoError::DuplicateModule { name: module.name().to_string() });
            }
        }

        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.modules.len()];
        let mut in_degree = vec![0usize; self.modules.len()];
        for (i, module) in self.modules.iter().enumerate() {
            for dependency in module.depends_on() {
                let Some(&d) = by_name.get(dependency) else {
                    return Err(RandoError::UnknownDependency {
                        module:     module.name().to_string(),
                        dependency: dependency.to_string(),
                    });
                };
                if module.pass() == Pass::PreLoad && self.modules[d].pass() == Pass::PerSave {
                    return Err(RandoError::PassOrder {
                        module:     module.name().to_string(),
                        dependency: dependency.to_string(),
                    });
                }
                dependents[d].push(i);
                in_degree[i] += 1;
            }
        }

        for (i, a) in self.modules.iter().enumerate() {
            for b in &self.modules[i + 1..] {
                for pa in a.produces() {
                    if let Some(pb) = b.produces().iter().find(|pb| patterns_overlap(pa, pb)) {
                        return Err(RandoError::ConflictingProducers {
                            asset:  format!("{pa} / {pb}"),
                            first:  a.name().to_string(),
                            second: b.name().to_string(),
                        });
                    }
                }
            }
        }

        // Kahn's algorithm; the ready set is ordered by registration index.
        let mut ready: BTreeSet<usize> =
            (0..self.modules.len()).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(self.modules.len());
        while let Some(next) = ready.pop_first() {
            order.push(next);
            for &dependent in &dependents[next] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        if order.len() < self.modules.len() {
            let modules = (0..self.modules.len())
                .filter(|&i| in_degree[i] > 0)
                .map(|i| self.modules[i].name().to_string())
                .collect();
            return Err(RandoError::CyclicDependency { modules });
        }

        Ok(order)
    }

    // ── Pre-load pass ──────────────────────────────────────────

    /// Compute the tables that don't need a save (locale-only UI text).
    /// Also the handler for a locale change.
    pub fn calculate_edits_before_load(
        &mut self,
        config:  &RandomizerConfig,
        catalog: &Catalog,
        locale:  &str,
        host:    &mut dyn ContentHost,
    ) -> RandoResult<Vec<AssetKey>> {
        let order = self.ordered()?;
        let mut registry = ReplacementRegistry::new();
        let mut spoiler = SpoilerLog::new("", false);

        for &i in &order {
            let module = self.modules[i].as_ref();
            if module.pass() != Pass::PreLoad {
                continue;
            }
            log::debug!("orchestrator: running pre-load module {}", module.name());
            let table = run_module(
                module, config, catalog, GameDate::default(), locale, None,
                &registry, &mut spoiler,
            )?;
            registry.insert_table(table)?;
        }

        let keys = touched_keys(&self.preload, &registry);
        self.preload = registry;
        invalidate_all(host, &keys);
        Ok(keys)
    }

    pub fn on_locale_changed(
        &mut self,
        config:  &RandomizerConfig,
        catalog: &Catalog,
        locale:  &str,
        host:    &mut dyn ContentHost,
    ) -> RandoResult<Vec<AssetKey>> {
        log::info!("orchestrator: locale changed to '{locale}', recomputing UI edits");
        self.calculate_edits_before_load(config, catalog, locale, host)
    }

    // ── Per-save pass ──────────────────────────────────────────

    /// Compute every per-save table for the farm named `identifier`.
    #[allow(clippy::too_many_arguments)]
    pub fn calculate_all_replacements(
        &mut self,
        identifier: &str,
        date:       GameDate,
        config:     &RandomizerConfig,
        catalog:    &Catalog,
        locale:     &str,
        host:       &mut dyn ContentHost,
    ) -> RandoResult<PassReport> {
        let order = self.ordered()?;
        config.validate()?;

        let seeds = SeedHierarchy::from_identifier(identifier);
        let mut spoiler = SpoilerLog::new(identifier, config.spoiler_log.enabled);
        let mut registry = ReplacementRegistry::new();
        let mut modules_run = Vec::new();

        for &i in &order {
            let module = self.modules[i].as_ref();
            if module.pass() != Pass::PerSave {
                continue;
            }
            log::debug!("orchestrator: running module {}", module.name());
            let table = run_module(
                module, config, catalog, date, locale, Some(seeds),
                &registry, &mut spoiler,
            )
            .inspect_err(|e| log::error!("orchestrator: module {} failed: {e}", module.name()))?;
            registry.insert_table(table)?;
            modules_run.push(module.name());
        }

        let spoiler_path = match &config.spoiler_log.output_dir {
            Some(dir) => match spoiler.write_file(dir) {
                Ok(path) => Some(path),
                Err(e) => {
                    log::error!("orchestrator: could not write spoiler log: {e}");
                    None
                }
            },
            None => None,
        };

        let keys = touched_keys(&self.save, &registry);
        self.save = registry;
        self.seeds = Some(seeds);
        invalidate_all(host, &keys);

        log::info!(
            "orchestrator: pass complete for seed {} ({} modules, {} assets)",
            seeds.root(),
            modules_run.len(),
            self.save.len()
        );

        Ok(PassReport {
            root_seed: seeds.root(),
            modules_run,
            keys_invalidated: keys,
            spoiler,
            spoiler_path,
        })
    }

    /// Recompute the daily-cadence tables for `date`. Does nothing before
    /// a save is loaded.
    pub fn refresh_daily(
        &mut self,
        date:    GameDate,
        config:  &RandomizerConfig,
        catalog: &Catalog,
        locale:  &str,
        host:    &mut dyn ContentHost,
    ) -> RandoResult<Vec<AssetKey>> {
        let Some(seeds) = self.seeds else {
            return Ok(Vec::new());
        };
        let order = self.ordered()?;
        let mut spoiler = SpoilerLog::new("", false);

        let mut tables: Vec<ReplacementTable> = Vec::new();
        for &i in &order {
            let module = self.modules[i].as_ref();
            if module.pass() != Pass::PerSave || module.refresh() != Refresh::Daily {
                continue;
            }
            log::debug!("orchestrator: refreshing daily module {} for day {}", module.name(), date.day_index());
            tables.push(run_module(
                module, config, catalog, date, locale, Some(seeds),
                &self.save, &mut spoiler,
            )?);
        }

        let mut touched = BTreeSet::new();
        for table in tables {
            touched.extend(self.save.replace_table(table)?);
        }
        let keys: Vec<AssetKey> = touched.into_iter().collect();
        invalidate_all(host, &keys);
        Ok(keys)
    }

    // ── Asset requests ─────────────────────────────────────────

    /// Answer a host asset request: the precomputed replacement, or pass
    /// through unchanged.
    pub fn handle_asset_request(&self, key: &str) -> AssetResponse<'_> {
        if self.save.contains(key) {
            return self.save.lookup(key);
        }
        self.preload.lookup(key)
    }

    /// Temporarily serve the original asset for `key` (between day end
    /// and the save write). Invalidates so the original is reloaded.
    /// Returns true if the key was newly suspended.
    pub fn suspend_asset(&mut self, key: &str, host: &mut dyn ContentHost) -> bool {
        let changed = self.save.suspend(key);
        if changed {
            host.invalidate_cache(key);
        }
        changed
    }

    pub fn resume_asset(&mut self, key: &str, host: &mut dyn ContentHost) -> bool {
        let changed = self.save.resume(key);
        if changed {
            host.invalidate_cache(key);
        }
        changed
    }

    /// Forget the loaded save: drop its seeds and tables and invalidate
    /// every key they replaced. Pre-load tables stay.
    pub fn unload(&mut self, host: &mut dyn ContentHost) -> Vec<AssetKey> {
        let keys: Vec<AssetKey> = self.save.keys().cloned().collect();
        self.save = ReplacementRegistry::new();
        self.seeds = None;
        invalidate_all(host, &keys);
        log::info!("orchestrator: save unloaded, {} assets released", keys.len());
        keys
    }

    pub fn seeds(&self) -> Option<SeedHierarchy> {
        self.seeds
    }

    pub fn registry(&self) -> &ReplacementRegistry {
        &self.save
    }

    pub fn preload_registry(&self) -> &ReplacementRegistry {
        &self.preload
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        self.save.snapshot(self.seeds.map(|s| s.root()))
    }
}

#[allow(clippy::too_many_arguments)]
fn run_module(
    module:  &dyn RandomizerModule,
    config:  &RandomizerConfig,
    catalog: &Catalog,
    date:    GameDate,
    locale:  &str,
    seeds:   Option<SeedHierarchy>,
    earlier: &ReplacementRegistry,
    spoiler: &mut SpoilerLog,
) -> RandoResult<ReplacementTable> {
    let mut ctx = ModuleContext::new(module, config, catalog, date, locale, seeds, earlier, spoiler);
    module.run(&mut ctx)?;
    Ok(ctx.into_table())
}

/// Keys replaced before or after a publication, sorted and deduplicated.
fn touched_keys(old: &ReplacementRegistry, new: &ReplacementRegistry) -> Vec<AssetKey> {
    old.keys()
        .chain(new.keys())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn invalidate_all(host: &mut dyn ContentHost, keys: &[AssetKey]) {
    for key in keys {
        log::debug!("orchestrator: invalidating {key}");
        host.invalidate_cache(key);
    }
}
