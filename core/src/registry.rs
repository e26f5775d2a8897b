//! Replacement registry. The published answer to every asset request.
//!
//! RULE: Tables are built from scratch by a computation pass and
//! published whole. Outside a pass the only mutation allowed is
//! swapping an entire module's table (daily refresh) or toggling a
//! key's suspension.

use crate::{
    error::{RandoError, RandoResult},
    snapshot::RegistrySnapshot,
    types::{AssetKey, Seed},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// The engine's answer to an asset request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AssetResponse<'a> {
    Replace(&'a Value),
    PassThrough,
}

impl AssetResponse<'_> {
    pub fn is_replacement(&self) -> bool {
        matches!(self, Self::Replace(_))
    }
}

/// One module's computed output: logical-asset-key → payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplacementTable {
    pub module:  String,
    pub entries: BTreeMap<AssetKey, Value>,
}

impl ReplacementTable {
    pub fn new(module: impl Into<String>) -> Self {
        Self { module: module.into(), entries: BTreeMap::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ReplacementRegistry {
    tables:    Vec<ReplacementTable>,
    index:     BTreeMap<AssetKey, usize>,
    suspended: BTreeSet<AssetKey>,
}

impl ReplacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a table in execution order. A key already owned by another
    /// module is a configuration error.
    pub fn insert_table(&mut self, table: ReplacementTable) -> RandoResult<()> {
        for key in table.entries.keys() {
            if let Some(&owner) = self.index.get(key) {
                return Err(RandoError::ConflictingProducers {
                    asset:  key.clone(),
                    first:  self.tables[owner].module.clone(),
                    second: table.module.clone(),
                });
            }
        }
        let slot = self.tables.len();
        for key in table.entries.keys() {
            self.index.insert(key.clone(), slot);
        }
        self.tables.push(table);
        Ok(())
    }

    /// Swap out a module's whole table, keeping its position. Returns the
    /// keys that changed ownership or content (old ∪ new).
    pub fn replace_table(&mut self, table: ReplacementTable) -> RandoResult<Vec<AssetKey>> {
        let Some(slot) = self.tables.iter().position(|t| t.module == table.module) else {
            let keys = table.entries.keys().cloned().collect();
            self.insert_table(table)?;
            return Ok(keys);
        };

        for key in table.entries.keys() {
            if let Some(&owner) = self.index.get(key) {
                if owner != slot {
                    return Err(RandoError::ConflictingProducers {
                        asset:  key.clone(),
                        first:  self.tables[owner].module.clone(),
                        second: table.module.clone(),
                    });
                }
            }
        }

        let mut touched: BTreeSet<AssetKey> = self.tables[slot].entries.keys().cloned().collect();
        for key in &touched {
            self.index.remove(key);
        }
        for key in table.entries.keys() {
            self.index.insert(key.clone(), slot);
            touched.insert(key.clone());
        }
        self.tables[slot] = table;
        Ok(touched.into_iter().collect())
    }

    pub fn table(&self, module: &str) -> Option<&ReplacementTable> {
        self.tables.iter().find(|t| t.module == module)
    }

    pub fn tables(&self) -> &[ReplacementTable] {
        &self.tables
    }

    /// Raw access for dependent modules; ignores suspension.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.index
            .get(key)
            .and_then(|&slot| self.tables[slot].entries.get(key))
    }

    /// Answer an asset request from the host.
    pub fn lookup(&self, key: &str) -> AssetResponse<'_> {
        if self.suspended.contains(key) {
            return AssetResponse::PassThrough;
        }
        match self.get(key) {
            Some(value) => AssetResponse::Replace(value),
            None => AssetResponse::PassThrough,
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Every key with a replacement, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &AssetKey> {
        self.index.keys()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Make lookups for `key` pass through until resumed.
    /// Returns true if the suspension state changed.
    pub fn suspend(&mut self, key: &str) -> bool {
        self.suspended.insert(key.to_string())
    }

    pub fn resume(&mut self, key: &str) -> bool {
        self.suspended.remove(key)
    }

    pub fn is_suspended(&self, key: &str) -> bool {
        self.suspended.contains(key)
    }

    pub fn snapshot(&self, root_seed: Option<Seed>) -> RegistrySnapshot {
        RegistrySnapshot {
            root_seed,
            tables: self.tables.clone(),
        }
    }
}
