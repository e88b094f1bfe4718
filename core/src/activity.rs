//! The cook slot — at most one timed activity in flight.
//!
//! RULE: in-memory state mutates first, persistence second. A slow or
//! failing write degrades durability, never the running session.
//!
//! Two writes here bypass the dirty-flag path on purpose: the start of a
//! cook (must be on disk before `start` returns) and the per-second
//! checkpoint (a crash may cost at most ~1 s of cook progress).

use crate::{
    catalog::{RecipeCatalog, RecipeDefinition},
    error::StartRefusal,
    event::GameEvent,
    saver::DirtySaveCoordinator,
    state::PersistedState,
    store::SaveStore,
    types::RecipeId,
};

/// Energy debited when a cook starts.
pub const COOK_ENERGY_COST: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
enum ActivitySlot {
    Idle,
    Running { recipe_id: RecipeId, remaining: f64 },
}

pub struct ActivityScheduler {
    slot: ActivitySlot,
    /// Sub-second progress toward the next one-second checkpoint.
    /// Not persisted; a restart rounds the cook to whole seconds.
    second_accumulator: f64,
}

impl Default for ActivityScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityScheduler {
    pub fn new() -> Self {
        Self {
            slot: ActivitySlot::Idle,
            second_accumulator: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.slot, ActivitySlot::Running { .. })
    }

    /// The in-flight cook, if any: (recipe id, whole seconds left).
    pub fn current(&self) -> Option<(&str, f64)> {
        match &self.slot {
            ActivitySlot::Idle => None,
            ActivitySlot::Running { recipe_id, remaining } => {
                Some((recipe_id.as_str(), *remaining))
            }
        }
    }

    /// Begin cooking `recipe`. Refusals leave the record untouched.
    ///
    /// On success the ingredients and energy are deducted, the slot runs,
    /// and the record is written through before this returns — a started
    /// cook survives an immediate crash.
    pub fn start(
        &mut self,
        state: &mut PersistedState,
        recipe: &RecipeDefinition,
        store: &SaveStore,
    ) -> Result<Vec<GameEvent>, StartRefusal> {
        if self.is_running() {
            return Err(StartRefusal::AlreadyCooking);
        }
        if !state.has_ingredients(&recipe.ingredient_costs) {
            return Err(StartRefusal::MissingIngredients);
        }
        if state.current_energy < COOK_ENERGY_COST {
            return Err(StartRefusal::InsufficientEnergy);
        }

        state.consume_ingredients(&recipe.ingredient_costs);
        state.current_energy -= COOK_ENERGY_COST;
        state.active_recipe = Some(recipe.id.clone());
        state.activity_remaining = recipe.required_time;
        self.slot = ActivitySlot::Running {
            recipe_id: recipe.id.clone(),
            remaining: recipe.required_time,
        };
        self.second_accumulator = 0.0;

        if let Err(e) = store.save(state) {
            log::error!("failed to persist cook start: {e}");
        }
        log::info!("cooking '{}' for {:.0}s", recipe.id, recipe.required_time);

        Ok(vec![
            GameEvent::EnergyChanged {
                current: state.current_energy,
                max: state.max_energy,
            },
            GameEvent::ActivityStarted {
                recipe_id: recipe.id.clone(),
            },
        ])
    }

    /// Re-enter a cook the loaded record says was in flight. Boot only.
    ///
    /// Cost and ingredients were already spent at the original start, so
    /// nothing is re-charged. A recipe id the catalog no longer resolves
    /// abandons the resumption — the spent cost is an accepted loss.
    pub fn resume(
        &mut self,
        state: &mut PersistedState,
        catalog: &RecipeCatalog,
        saver: &mut DirtySaveCoordinator,
    ) -> Vec<GameEvent> {
        let Some(recipe_id) = state.active_recipe.clone() else {
            return Vec::new();
        };
        if catalog.get(&recipe_id).is_none() {
            log::warn!("cannot resume '{recipe_id}': recipe no longer in catalog");
            state.active_recipe = None;
            state.activity_remaining = 0.0;
            saver.mark_dirty();
            return Vec::new();
        }

        let remaining = state.activity_remaining;
        if remaining <= 0.0 {
            // The last shutdown landed exactly on completion; deliver the
            // finish now instead of spinning up a zero-length cook.
            state.active_recipe = None;
            state.activity_remaining = 0.0;
            saver.mark_dirty();
            return vec![GameEvent::ActivityFinished {
                recipe_id,
                success: true,
            }];
        }

        log::info!("resuming '{recipe_id}' with {remaining:.0}s left");
        self.slot = ActivitySlot::Running { recipe_id, remaining };
        self.second_accumulator = 0.0;
        Vec::new()
    }

    /// Advance the active cook by `delta_seconds`.
    ///
    /// Each whole-second boundary crossed decrements the remaining time by
    /// one and checkpoints the record. Reaching zero clears the slot,
    /// persists, and reports the finished cook — completion has no failure
    /// outcome.
    pub fn tick(
        &mut self,
        state: &mut PersistedState,
        store: &SaveStore,
        delta_seconds: f64,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if delta_seconds <= 0.0 || !self.is_running() {
            return events;
        }

        self.second_accumulator += delta_seconds;
        while self.second_accumulator >= 1.0 {
            self.second_accumulator -= 1.0;
            let ActivitySlot::Running { recipe_id, remaining } = &mut self.slot else {
                break;
            };
            *remaining -= 1.0;

            if *remaining <= 0.0 {
                let finished = recipe_id.clone();
                self.slot = ActivitySlot::Idle;
                self.second_accumulator = 0.0;
                state.active_recipe = None;
                state.activity_remaining = 0.0;
                if let Err(e) = store.save(state) {
                    log::error!("failed to persist cook completion: {e}");
                }
                log::info!("finished cooking '{finished}'");
                events.push(GameEvent::ActivityFinished {
                    recipe_id: finished,
                    success: true,
                });
                break;
            }

            let left = *remaining;
            state.activity_remaining = left;
            if let Err(e) = store.save(state) {
                log::error!("failed to checkpoint cook progress: {e}");
            }
            events.push(GameEvent::ActivityTick { remaining: left });
        }
        events
    }
}
