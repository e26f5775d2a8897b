//! The randomizer as the host sees it: one object, fed host events.
//!
//! RULE: This is glue only. Every decision is made by the orchestrator
//! or the stock controller; the session just routes events and owns the
//! state that outlives a single call (date, locale, player state).

use crate::{
    calendar::GameDate,
    catalog::Catalog,
    config::RandomizerConfig,
    error::RandoResult,
    event::{HostEvent, HostResponse},
    host::ContentHost,
    orchestrator::{PassReport, ReplacementOrchestrator},
    registry::AssetResponse,
    stock::{PeriodicStockController, PlayerState},
    types::AssetKey,
};

pub const DEFAULT_LOCALE: &str = "en";

pub struct Randomizer<H: ContentHost> {
    pub orchestrator: ReplacementOrchestrator,
    pub controller:   PeriodicStockController,
    pub config:       RandomizerConfig,
    pub catalog:      Catalog,
    pub date:         GameDate,
    pub locale:       String,
    pub player:       PlayerState,
    pub host:         H,
    last_report:      Option<PassReport>,
}

impl<H: ContentHost> Randomizer<H> {
    /// Every shipped module and shop, graph validated up front.
    pub fn new(config: RandomizerConfig, catalog: Catalog, host: H) -> RandoResult<Self> {
        config.validate()?;
        Ok(Self {
            orchestrator: ReplacementOrchestrator::build()?,
            controller:   PeriodicStockController::with_default_shops(),
            config,
            catalog,
            date:         GameDate::default(),
            locale:       DEFAULT_LOCALE.to_string(),
            player:       PlayerState::default(),
            host,
            last_report:  None,
        })
    }

    pub fn last_report(&self) -> Option<&PassReport> {
        self.last_report.as_ref()
    }

    /// Serve the day-end suspended keys again. Returns the keys resumed.
    fn resume_suspended(&mut self) -> Vec<AssetKey> {
        let mut resumed = Vec::new();
        for key in &self.config.suspend_until_saving {
            if self.orchestrator.resume_asset(key, &mut self.host) {
                resumed.push(key.clone());
            }
        }
        resumed
    }

    pub fn handle(&mut self, event: HostEvent) -> RandoResult<HostResponse> {
        match event {
            HostEvent::GameLaunched { locale } | HostEvent::LocaleChanged { locale } => {
                self.locale = locale;
                let keys = self.orchestrator.on_locale_changed(
                    &self.config,
                    &self.catalog,
                    &self.locale,
                    &mut self.host,
                )?;
                Ok(HostResponse::Invalidated { keys })
            }

            HostEvent::SaveLoaded { farm_name, day_index } => {
                self.date = GameDate::new(day_index);
                self.controller.clear();
                self.player = PlayerState::default();
                let report = self.orchestrator.calculate_all_replacements(
                    &farm_name,
                    self.date,
                    &self.config,
                    &self.catalog,
                    &self.locale,
                    &mut self.host,
                )?;
                let response = HostResponse::PassCompleted {
                    root_seed:        report.root_seed,
                    modules_run:      report.modules_run.iter().map(|m| m.to_string()).collect(),
                    keys_invalidated: report.keys_invalidated.clone(),
                    spoiler_path:     report.spoiler_path.clone(),
                };
                self.last_report = Some(report);
                self.resume_suspended();
                Ok(response)
            }

            HostEvent::DayEnding => {
                self.controller.reset_daily();
                self.date = self.date.next_day();
                let mut keys = self.orchestrator.refresh_daily(
                    self.date,
                    &self.config,
                    &self.catalog,
                    &self.locale,
                    &mut self.host,
                )?;
                for key in &self.config.suspend_until_saving {
                    if self.orchestrator.suspend_asset(key, &mut self.host) {
                        keys.push(key.clone());
                    }
                }
                Ok(HostResponse::Invalidated { keys })
            }

            HostEvent::Saving => {
                let keys = self.resume_suspended();
                Ok(HostResponse::Invalidated { keys })
            }

            HostEvent::Saved => Ok(HostResponse::Ack),

            HostEvent::ReturnedToTitle => {
                self.controller.clear();
                self.player = PlayerState::default();
                self.last_report = None;
                let keys = self.orchestrator.unload(&mut self.host);
                Ok(HostResponse::Invalidated { keys })
            }

            HostEvent::MenuOpened { shop_id, stock } => {
                let Some(seeds) = self.orchestrator.seeds() else {
                    return Ok(HostResponse::Stock { shop_id, entries: stock });
                };
                let entries = self.controller.on_open(
                    &shop_id,
                    stock,
                    self.date,
                    &self.player,
                    &seeds,
                    &self.config,
                    &self.catalog,
                )?;
                Ok(HostResponse::Stock { shop_id, entries })
            }

            HostEvent::MenuClosed { shop_id } => {
                self.controller.on_close(&shop_id);
                Ok(HostResponse::Ack)
            }

            HostEvent::AssetRequested { key } => {
                let replacement = match self.orchestrator.handle_asset_request(&key) {
                    AssetResponse::Replace(value) => Some(value.clone()),
                    AssetResponse::PassThrough => None,
                };
                Ok(HostResponse::Asset { key, replacement })
            }

            HostEvent::RecipeLearned { item_id } => {
                self.player.known_recipes.insert(item_id);
                Ok(HostResponse::Ack)
            }
        }
    }
}
