//! Seed hierarchy. Every random stream descends from one root seed.
//!
//! RULE: The root seed is derived from the player's farm name and
//! nothing else. Child seeds are derived by digesting
//! (root ‖ purpose ‖ period), never by adding offsets, so two unrelated
//! purposes cannot collide on a small period value.
//!
//! Three period modes exist:
//!   - None:  valid for the life of the save (building costs, skin swaps)
//!   - Week:  day_index / 7, changes every 7 in-game days
//!   - Day:   day_index, changes every in-game day

use crate::{calendar::GameDate, rng::RandomStream, types::Seed};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Identifier used when the player left the farm name empty.
pub const FALLBACK_IDENTIFIER: &str = "\u{0}randomizer-empty-farm-name";

/// Purpose name of the stream handed to modules that share the root stream.
pub const ROOT_PURPOSE: &str = "root";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum Period {
    None,
    Week(u64),
    Day(u64),
}

impl Period {
    fn tag(&self) -> u8 {
        match self {
            Self::None    => 0,
            Self::Week(_) => 1,
            Self::Day(_)  => 2,
        }
    }

    fn value(&self) -> u64 {
        match self {
            Self::None => 0,
            Self::Week(v) | Self::Day(v) => *v,
        }
    }
}

/// (purpose, period) pair naming one child stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct StreamKey {
    pub purpose: String,
    pub period:  Period,
}

impl StreamKey {
    pub fn new(purpose: impl Into<String>, period: Period) -> Self {
        Self { purpose: purpose.into(), period }
    }

    /// A stream that lives as long as the save.
    pub fn farm(purpose: impl Into<String>) -> Self {
        Self::new(purpose, Period::None)
    }

    pub fn weekly(purpose: impl Into<String>, date: GameDate) -> Self {
        Self::new(purpose, Period::Week(date.week_index()))
    }

    pub fn daily(purpose: impl Into<String>, date: GameDate) -> Self {
        Self::new(purpose, Period::Day(date.day_index()))
    }
}

/// Derive the root seed from the player's identifier (the farm name).
///
/// SHA-256 over the UTF-8 bytes, folded to the first 8 bytes (LE).
/// An empty identifier falls back to [`FALLBACK_IDENTIFIER`].
pub fn derive_root_seed(identifier: &str) -> Seed {
    let source = if identifier.is_empty() { FALLBACK_IDENTIFIER } else { identifier };
    let digest = Sha256::digest(source.as_bytes());
    fold_digest(&digest)
}

/// Derive a child seed. Pure; identical inputs always give identical output.
pub fn derive_child_seed(root: Seed, key: &StreamKey) -> Seed {
    let mut hasher = Sha256::new();
    hasher.update(root.to_le_bytes());
    hasher.update((key.purpose.len() as u64).to_le_bytes());
    hasher.update(key.purpose.as_bytes());
    hasher.update([key.period.tag()]);
    hasher.update(key.period.value().to_le_bytes());
    fold_digest(&hasher.finalize())
}

fn fold_digest(digest: &[u8]) -> Seed {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// The per-save seed hierarchy. Cheap to copy; hand it to every module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedHierarchy {
    root: Seed,
}

impl SeedHierarchy {
    pub fn new(root: Seed) -> Self {
        Self { root }
    }

    pub fn from_identifier(identifier: &str) -> Self {
        let root = derive_root_seed(identifier);
        log::info!("seed: root seed {root} derived for farm '{identifier}'");
        Self { root }
    }

    pub fn root(&self) -> Seed {
        self.root
    }

    pub fn child_seed(&self, key: &StreamKey) -> Seed {
        derive_child_seed(self.root, key)
    }

    pub fn stream(&self, key: &StreamKey) -> RandomStream {
        RandomStream::new(self.child_seed(key)).with_name(key.purpose.clone())
    }

    /// The shared root stream, seeded directly from the root seed.
    pub fn root_stream(&self) -> RandomStream {
        RandomStream::new(self.root).with_name(ROOT_PURPOSE)
    }

    pub fn farm_stream(&self, purpose: &str) -> RandomStream {
        self.stream(&StreamKey::farm(purpose))
    }

    pub fn weekly_stream(&self, purpose: &str, date: GameDate) -> RandomStream {
        self.stream(&StreamKey::weekly(purpose, date))
    }

    pub fn daily_stream(&self, purpose: &str, date: GameDate) -> RandomStream {
        self.stream(&StreamKey::daily(purpose, date))
    }
}
