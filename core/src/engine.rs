//! Core wiring — one `GameCore` owns the record, the store, and both
//! ticking parts. Everything is passed in at construction; there are no
//! global instances.
//!
//! EXECUTION ORDER per step (fixed, never reordered):
//!   1. energy regeneration
//!   2. the active cook
//! Steps are strictly sequential — no step overlaps another, so the
//! accumulator and remaining-time arithmetic stay deterministic.

use crate::{
    activity::ActivityScheduler,
    catalog::{IngredientCost, RecipeCatalog},
    error::StartRefusal,
    event::{EventHub, Listener},
    regen::ResourceRegenerator,
    saver::DirtySaveCoordinator,
    state::PersistedState,
    store::SaveStore,
    types::Timestamp,
};

pub struct GameCore {
    state:     PersistedState,
    store:     SaveStore,
    catalog:   RecipeCatalog,
    regen:     ResourceRegenerator,
    scheduler: ActivityScheduler,
    saver:     DirtySaveCoordinator,
    hub:       EventHub,
    advancing: bool,
}

impl GameCore {
    /// Load the record (or synthesize a fresh one) and wire the parts.
    /// Call `recover` once — after subscribing listeners, before the first
    /// `step` — to account for offline time and re-enter a pending cook.
    pub fn new(store: SaveStore, catalog: RecipeCatalog) -> Self {
        let state = store.load();
        Self {
            state,
            store,
            catalog,
            regen:     ResourceRegenerator::new(),
            scheduler: ActivityScheduler::new(),
            saver:     DirtySaveCoordinator::new(),
            hub:       EventHub::new(),
            advancing: true,
        }
    }

    /// One-shot startup recovery: offline regeneration catch-up, then
    /// resumption of a cook that was in flight at the last shutdown.
    pub fn recover(&mut self, now: Timestamp) {
        let mut events = self
            .regen
            .catch_up_offline(&mut self.state, now, &mut self.saver);
        events.extend(
            self.scheduler
                .resume(&mut self.state, &self.catalog, &mut self.saver),
        );
        self.hub.dispatch(&events);
    }

    /// One simulation step. While the host reports "not advancing" this is
    /// a no-op — the gate is scheduling, not cancellation; un-pausing
    /// continues from the stored accumulators with no catch-up.
    pub fn step(&mut self, delta_seconds: f64) {
        if !self.advancing {
            return;
        }
        let mut events = self
            .regen
            .tick_running(&mut self.state, delta_seconds, &mut self.saver);
        events.extend(
            self.scheduler
                .tick(&mut self.state, &self.store, delta_seconds),
        );
        self.hub.dispatch(&events);
    }

    /// Start cooking the catalog recipe `recipe_id`.
    pub fn start_cooking(&mut self, recipe_id: &str) -> Result<(), StartRefusal> {
        let recipe = self
            .catalog
            .get(recipe_id)
            .ok_or(StartRefusal::UnknownRecipe)?
            .clone();
        let events = self.scheduler.start(&mut self.state, &recipe, &self.store)?;
        self.hub.dispatch(&events);
        Ok(())
    }

    // ── Host signals ──────────────────────────────────────────────

    pub fn set_advancing(&mut self, advancing: bool) {
        self.advancing = advancing;
    }

    pub fn is_advancing(&self) -> bool {
        self.advancing
    }

    /// Host is backgrounding: flush unsaved progress.
    pub fn suspend(&mut self, now: Timestamp) {
        if self
            .saver
            .flush_if_dirty(&mut self.state, &self.store, now)
        {
            log::debug!("suspend flush written");
        }
    }

    /// Host is terminating: flush unsaved progress.
    pub fn shutdown(&mut self, now: Timestamp) {
        if self
            .saver
            .flush_if_dirty(&mut self.state, &self.store, now)
        {
            log::info!("shutdown flush written");
        }
    }

    // ── Query surface for the presentation layer ──────────────────

    pub fn subscribe(&mut self, listener: Listener) {
        self.hub.subscribe(listener);
    }

    pub fn energy(&self) -> (u32, u32) {
        (self.state.current_energy, self.state.max_energy)
    }

    pub fn item_count(&self, id: &str) -> u32 {
        self.state.item_count(id)
    }

    pub fn has_ingredients(&self, costs: &[IngredientCost]) -> bool {
        self.state.has_ingredients(costs)
    }

    pub fn is_cooking(&self) -> bool {
        self.scheduler.is_running()
    }

    /// The in-flight cook, if any: (recipe id, whole seconds left).
    pub fn current_cook(&self) -> Option<(&str, f64)> {
        self.scheduler.current()
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn catalog(&self) -> &RecipeCatalog {
        &self.catalog
    }

    /// Direct store access, for tooling and tests that inspect writes.
    pub fn store(&self) -> &SaveStore {
        &self.store
    }
}
