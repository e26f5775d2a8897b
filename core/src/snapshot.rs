//! Snapshot serialization: the full set of computed tables as JSON.
//!
//! Two passes with the same root seed, config and catalog must produce
//! byte-identical snapshots. The runner prints one; the determinism
//! tests compare two.

use crate::{
    error::RandoResult,
    registry::ReplacementTable,
    types::Seed,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrySnapshot {
    pub root_seed: Option<Seed>,
    pub tables:    Vec<ReplacementTable>,
}

impl RegistrySnapshot {
    pub fn to_json(&self) -> RandoResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> RandoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
