//! Module graph validation and execution order.

use randomizer_core::{
    calendar::GameDate,
    catalog::Catalog,
    config::RandomizerConfig,
    error::{RandoError, RandoResult},
    host::RecordingHost,
    module::{ModuleContext, Pass, RandomizerModule},
    orchestrator::ReplacementOrchestrator,
};
use serde_json::json;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// A module that draws once and writes a counter to its first key.
struct Probe {
    name:     &'static str,
    deps:     &'static [&'static str],
    produces: &'static [&'static str],
    pass:     Pass,
    draws:    Arc<AtomicUsize>,
}

impl Probe {
    fn new(name: &'static str, deps: &'static [&'static str], produces: &'static [&'static str]) -> Self {
        Self { name, deps, produces, pass: Pass::PerSave, draws: Arc::new(AtomicUsize::new(0)) }
    }

    fn counting(mut self, draws: &Arc<AtomicUsize>) -> Self {
        self.draws = Arc::clone(draws);
        self
    }
}

impl RandomizerModule for Probe {
    fn name(&self) -> &'static str {
        self.name
    }

    fn produces(&self) -> &'static [&'static str] {
        self.produces
    }

    fn depends_on(&self) -> &'static [&'static str] {
        self.deps
    }

    fn pass(&self) -> Pass {
        self.pass
    }

    fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
        let value = ctx.farm_stream()?.next_u64();
        let order = self.draws.fetch_add(1, Ordering::SeqCst);
        ctx.write(self.produces[0], json!({ "value": value.to_string(), "order": order }))
    }
}

fn run(orchestrator: &mut ReplacementOrchestrator, host: &mut RecordingHost) -> RandoResult<()> {
    let config = RandomizerConfig::default_test();
    let catalog = Catalog::default_test();
    orchestrator
        .calculate_all_replacements("Maple", GameDate::new(0), &config, &catalog, "en", host)
        .map(|_| ())
}

/// A cycle is rejected before any module draws.
#[test]
fn cycle_rejected_before_any_draw() {
    let draws = Arc::new(AtomicUsize::new(0));
    let mut orchestrator = ReplacementOrchestrator::new();
    orchestrator.register(Box::new(Probe::new("free", &[], &["Data/Free"]).counting(&draws)));
    orchestrator.register(Box::new(Probe::new("a", &["b"], &["Data/A"]).counting(&draws)));
    orchestrator.register(Box::new(Probe::new("b", &["a"], &["Data/B"]).counting(&draws)));

    let mut host = RecordingHost::default();
    let err = run(&mut orchestrator, &mut host).unwrap_err();

    match err {
        RandoError::CyclicDependency { modules } => {
            assert_eq!(modules, vec!["a".to_string(), "b".to_string()]);
        }
        other => panic!("Expected CyclicDependency, got {other:?}"),
    }
    assert!(orchestrator.resolve().unwrap_err().is_configuration_error());
    assert_eq!(draws.load(Ordering::SeqCst), 0, "No module may run when the graph is invalid");
    assert!(host.invalidated.is_empty());
}

#[test]
fn unknown_dependency_rejected() {
    let mut orchestrator = ReplacementOrchestrator::new();
    orchestrator.register(Box::new(Probe::new("a", &["ghost"], &["Data/A"])));
    assert!(matches!(
        orchestrator.resolve(),
        Err(RandoError::UnknownDependency { .. })
    ));
}

#[test]
fn duplicate_module_rejected() {
    let mut orchestrator = ReplacementOrchestrator::new();
    orchestrator.register(Box::new(Probe::new("a", &[], &["Data/A"])));
    orchestrator.register(Box::new(Probe::new("a", &[], &["Data/B"])));
    assert!(matches!(orchestrator.resolve(), Err(RandoError::DuplicateModule { .. })));
}

#[test]
fn overlapping_producers_rejected() {
    let mut orchestrator = ReplacementOrchestrator::new();
    orchestrator.register(Box::new(Probe::new("skins", &[], &["Characters/*"])));
    orchestrator.register(Box::new(Probe::new("abigail", &[], &["Characters/Abigail"])));
    assert!(matches!(
        orchestrator.resolve(),
        Err(RandoError::ConflictingProducers { .. })
    ));
}

#[test]
fn preload_module_cannot_depend_on_per_save_module() {
    let mut early = Probe::new("early", &["late"], &["Strings/Early"]);
    early.pass = Pass::PreLoad;

    let mut orchestrator = ReplacementOrchestrator::new();
    orchestrator.register(Box::new(early));
    orchestrator.register(Box::new(Probe::new("late", &[], &["Data/Late"])));
    assert!(matches!(orchestrator.resolve(), Err(RandoError::PassOrder { .. })));
}

/// Dependencies run first even when registered later; otherwise
/// registration order holds.
#[test]
fn dependencies_run_first() {
    let mut orchestrator = ReplacementOrchestrator::new();
    orchestrator.register(Box::new(Probe::new("recipes", &["drops"], &["Data/Recipes"])));
    orchestrator.register(Box::new(Probe::new("quests", &[], &["Data/Quests"])));
    orchestrator.register(Box::new(Probe::new("drops", &[], &["Data/Drops"])));

    assert_eq!(
        orchestrator.module_order().unwrap(),
        vec!["quests", "drops", "recipes"]
    );

    let mut host = RecordingHost::default();
    run(&mut orchestrator, &mut host).unwrap();
    let registry = orchestrator.registry();
    assert_eq!(registry.get("Data/Quests").unwrap()["order"], 0);
    assert_eq!(registry.get("Data/Drops").unwrap()["order"], 1);
    assert_eq!(registry.get("Data/Recipes").unwrap()["order"], 2);
}

#[test]
fn shipped_modules_resolve() {
    let mut orchestrator = ReplacementOrchestrator::build().unwrap();
    let order = orchestrator.module_order().unwrap();
    let drops = order.iter().position(|m| *m == "monster_drops").unwrap();
    let recipes = order.iter().position(|m| *m == "crafting_recipes").unwrap();
    assert!(drops < recipes, "monster_drops must run before crafting_recipes");
    assert!(order.contains(&"music") && order.contains(&"buildings"));
    assert_eq!(order.len(), 12);
}

/// A module reading its dependency's table sees this pass's value.
#[test]
fn dependent_reads_dependency_table() {
    struct Base;
    impl RandomizerModule for Base {
        fn name(&self) -> &'static str { "base" }
        fn produces(&self) -> &'static [&'static str] { &["Data/Base"] }
        fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
            ctx.write("Data/Base", json!(20))
        }
    }

    struct Derived;
    impl RandomizerModule for Derived {
        fn name(&self) -> &'static str { "derived" }
        fn produces(&self) -> &'static [&'static str] { &["Data/Derived"] }
        fn depends_on(&self) -> &'static [&'static str] { &["base"] }
        fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
            let base = ctx.dependency("Data/Base").and_then(|v| v.as_i64()).unwrap_or(0);
            ctx.write("Data/Derived", json!(base + 1))
        }
    }

    let mut orchestrator = ReplacementOrchestrator::new();
    orchestrator.register(Box::new(Derived));
    orchestrator.register(Box::new(Base));

    let mut host = RecordingHost::default();
    run(&mut orchestrator, &mut host).unwrap();
    assert_eq!(orchestrator.registry().get("Data/Derived"), Some(&json!(21)));
}

/// Writing outside the declared keys fails the pass and leaves the
/// previously published tables in place.
#[test]
fn undeclared_write_aborts_pass() {
    struct Rogue;
    impl RandomizerModule for Rogue {
        fn name(&self) -> &'static str { "rogue" }
        fn produces(&self) -> &'static [&'static str] { &["Data/Mine"] }
        fn run(&self, ctx: &mut ModuleContext<'_>) -> RandoResult<()> {
            ctx.write("Data/Mine", json!(1))?;
            ctx.write("Data/Yours", json!(2))
        }
    }

    let mut orchestrator = ReplacementOrchestrator::new();
    orchestrator.register(Box::new(Rogue));
    let mut host = RecordingHost::default();

    let err = run(&mut orchestrator, &mut host).unwrap_err();
    assert!(matches!(err, RandoError::UndeclaredAsset { .. }));
    assert!(orchestrator.registry().is_empty());
    assert!(orchestrator.seeds().is_none());
}

/// Pre-load modules have no player seed to draw from.
#[test]
fn preload_module_has_no_seed() {
    let mut early = Probe::new("early", &[], &["Strings/Early"]);
    early.pass = Pass::PreLoad;

    let mut orchestrator = ReplacementOrchestrator::new();
    orchestrator.register(Box::new(early));

    let config = RandomizerConfig::default_test();
    let catalog = Catalog::default_test();
    let mut host = RecordingHost::default();
    let err = orchestrator
        .calculate_edits_before_load(&config, &catalog, "en", &mut host)
        .unwrap_err();
    assert!(matches!(err, RandoError::SeedUnavailable { .. }));
}

/// An invalid count range aborts the pass before any draw.
#[test]
fn invalid_range_aborts_pass() {
    let draws = Arc::new(AtomicUsize::new(0));
    let mut orchestrator = ReplacementOrchestrator::new();
    orchestrator.register(Box::new(Probe::new("a", &[], &["Data/A"]).counting(&draws)));

    let mut config = RandomizerConfig::default_test();
    config.shops.saloon_recipes.min = 6;
    let catalog = Catalog::default_test();
    let mut host = RecordingHost::default();

    let err = orchestrator
        .calculate_all_replacements("Maple", GameDate::new(0), &config, &catalog, "en", &mut host)
        .unwrap_err();
    assert!(matches!(err, RandoError::InvalidRange { min: 6, max: 5 }));
    assert_eq!(draws.load(Ordering::SeqCst), 0);
}
