//! Notifications the core emits for the presentation layer.
//!
//! RULE: fire-and-forget. Listeners see each event once, in emission order.
//! The core never waits on a listener and never hears back from one.

use crate::types::RecipeId;
use serde::{Deserialize, Serialize};

/// Every notification the core can emit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    EnergyChanged {
        current: u32,
        max: u32,
    },
    ActivityStarted {
        recipe_id: RecipeId,
    },
    ActivityTick {
        remaining: f64,
    },
    ActivityFinished {
        recipe_id: RecipeId,
        success: bool,
    },
}

pub type Listener = Box<dyn Fn(&GameEvent)>;

/// The subscriber list. Replaces the source's delegate-event pattern with
/// an explicit observer list the presentation layer registers into.
#[derive(Default)]
pub struct EventHub {
    listeners: Vec<Listener>,
}

impl EventHub {
    pub fn new() -> Self {
        Self { listeners: Vec::new() }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    /// Hand a batch of events to every listener, in order.
    pub fn dispatch(&self, events: &[GameEvent]) {
        for event in events {
            for listener in &self.listeners {
                listener(event);
            }
        }
    }
}
