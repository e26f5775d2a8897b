//! Shared primitive types used across the entire randomizer.

/// A root or derived seed. Every random stream is rooted in one of these.
pub type Seed = u64;

/// An opaque logical-asset-key, e.g. "Data/CraftingRecipes".
pub type AssetKey = String;

/// A stable identifier for a randomizable shop, e.g. "Casino".
pub type ShopId = String;

/// A catalog item identifier, e.g. "(O)395".
pub type ItemId = String;
