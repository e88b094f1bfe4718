//! Shared primitive types used across the core.

/// Seconds since the Unix epoch, as supplied by the host at boot and flush.
/// 0 means "never saved".
pub type Timestamp = i64;

/// Catalog identifier for a pantry item.
pub type ItemId = String;

/// Catalog identifier for a recipe.
pub type RecipeId = String;
