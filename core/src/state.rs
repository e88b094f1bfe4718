//! The persisted record — everything that must survive a restart.
//!
//! One record per player, owned by whoever booted the core. Anything not in
//! here (the sub-second cook accumulator, the dirty flag, listener lists) is
//! rebuilt from scratch on the next boot.

use crate::{
    catalog::IngredientCost,
    types::{ItemId, RecipeId, Timestamp},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pantry contents a fresh profile starts with.
pub const STARTER_INVENTORY: &[(&str, u32)] = &[
    ("flour", 10),
    ("water", 10),
    ("berry", 6),
    ("mushroom", 4),
    ("meat", 2),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub current_energy: u32,
    pub max_energy:     u32,
    /// Seconds of partial progress toward the next energy unit.
    /// Stays in `[0, regen interval)` after any normalization pass.
    pub regen_accumulator: f64,
    /// Epoch seconds stamped at the last flush. 0 = never saved.
    pub last_shutdown: Timestamp,
    /// Item counts. An absent key means zero; ordered so the serialized
    /// form is byte-stable across saves.
    pub inventory: BTreeMap<ItemId, u32>,
    /// The one in-flight cook, if any.
    pub active_recipe: Option<RecipeId>,
    /// Whole seconds left on the active cook. Meaningless when
    /// `active_recipe` is `None`.
    pub activity_remaining: f64,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            current_energy:    100,
            max_energy:        100,
            regen_accumulator: 0.0,
            last_shutdown:     0,
            inventory: STARTER_INVENTORY
                .iter()
                .map(|(id, count)| (id.to_string(), *count))
                .collect(),
            active_recipe:      None,
            activity_remaining: 0.0,
        }
    }
}

impl PersistedState {
    pub fn item_count(&self, id: &str) -> u32 {
        self.inventory.get(id).copied().unwrap_or(0)
    }

    /// True when every cost line is covered by the pantry.
    pub fn has_ingredients(&self, costs: &[IngredientCost]) -> bool {
        costs.iter().all(|cost| self.item_count(&cost.item_id) >= cost.amount)
    }

    /// Debit `costs` from the pantry. Callers check `has_ingredients`
    /// first; counts saturate at zero rather than wrapping.
    pub fn consume_ingredients(&mut self, costs: &[IngredientCost]) {
        for cost in costs {
            if let Some(count) = self.inventory.get_mut(&cost.item_id) {
                *count = count.saturating_sub(cost.amount);
            }
        }
    }
}
