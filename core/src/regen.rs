//! Energy regeneration — steady ticking while the game runs, and one bulk
//! catch-up for the time that passed while it did not.

use crate::{
    event::GameEvent, saver::DirtySaveCoordinator, state::PersistedState, types::Timestamp,
};

/// Seconds of real time per regenerated energy unit.
pub const REGEN_INTERVAL_SECONDS: f64 = 5.0;

/// Energy granted per elapsed interval.
pub const ENERGY_PER_TICK: u32 = 1;

pub struct ResourceRegenerator {
    interval: f64,
    per_tick: u32,
}

impl Default for ResourceRegenerator {
    fn default() -> Self {
        Self {
            interval: REGEN_INTERVAL_SECONDS,
            per_tick: ENERGY_PER_TICK,
        }
    }
}

impl ResourceRegenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tests exercise other cadences through this.
    pub fn with_interval(interval: f64, per_tick: u32) -> Self {
        assert!(interval > 0.0, "regen interval must be positive");
        Self { interval, per_tick }
    }

    /// Advance regeneration by `delta_seconds` of running time.
    ///
    /// Full intervals drain from the accumulator even while energy sits at
    /// the cap — time spent capped does not bank a burst for later.
    pub fn tick_running(
        &self,
        state: &mut PersistedState,
        delta_seconds: f64,
        saver: &mut DirtySaveCoordinator,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if delta_seconds <= 0.0 {
            return events;
        }
        state.regen_accumulator += delta_seconds;
        while state.regen_accumulator >= self.interval {
            state.regen_accumulator -= self.interval;
            if state.current_energy < state.max_energy {
                state.current_energy =
                    (state.current_energy + self.per_tick).min(state.max_energy);
                saver.mark_dirty();
                events.push(GameEvent::EnergyChanged {
                    current: state.current_energy,
                    max: state.max_energy,
                });
            }
        }
        events
    }

    /// One-shot recovery of energy for the downtime between the last flush
    /// and this boot. Runs once, before any ticking begins.
    pub fn catch_up_offline(
        &self,
        state: &mut PersistedState,
        now: Timestamp,
        saver: &mut DirtySaveCoordinator,
    ) -> Vec<GameEvent> {
        if state.last_shutdown == 0 {
            // First-ever run: there is no downtime to account for.
            return Vec::new();
        }
        let elapsed = (now - state.last_shutdown).max(0) as f64;
        let total = elapsed + state.regen_accumulator;
        let units = (total / self.interval).floor() as u64;
        state.regen_accumulator = total % self.interval;
        if units == 0 {
            return Vec::new();
        }

        // Units past the cap are discarded, not banked.
        let headroom = u64::from(state.max_energy.saturating_sub(state.current_energy));
        let gained = (units * u64::from(self.per_tick)).min(headroom) as u32;
        state.current_energy += gained;
        saver.mark_dirty();

        log::info!(
            "offline catch-up: {elapsed:.0}s away, +{gained} energy ({} discarded past cap)",
            units * u64::from(self.per_tick) - u64::from(gained)
        );

        if gained == 0 {
            return Vec::new();
        }
        vec![GameEvent::EnergyChanged {
            current: state.current_energy,
            max: state.max_energy,
        }]
    }
}
