//! Save-file tests — round-trip fidelity, corrupt-save recovery, and
//! flush coalescing.

use galley_core::{saver::DirtySaveCoordinator, state::PersistedState, store::SaveStore};

fn store() -> SaveStore {
    let _ = env_logger::builder().is_test(true).try_init();
    SaveStore::in_memory().expect("in-memory store")
}

#[test]
fn save_then_load_round_trips_every_field() {
    let store = store();
    let mut state = PersistedState::default();
    state.current_energy = 42;
    state.max_energy = 120;
    state.regen_accumulator = 3.25;
    state.last_shutdown = 1_700_000_000;
    state.inventory.insert("truffle".into(), 1);
    state.inventory.insert("flour".into(), 0);
    state.active_recipe = Some("hunters_pie".into());
    state.activity_remaining = 61.0;

    store.save(&state).expect("save");
    let reloaded = store.load();

    assert_eq!(reloaded, state);
}

#[test]
fn missing_save_loads_a_fresh_default() {
    let store = store();
    assert_eq!(store.load(), PersistedState::default());
}

/// A corrupt save is logged and replaced by a fresh default — it must
/// never block the session from starting.
#[test]
fn corrupt_save_loads_a_fresh_default() {
    let store = store();
    store.put_raw("{ not json at all").expect("plant corrupt blob");

    assert_eq!(store.load(), PersistedState::default());
}

#[test]
fn every_save_bumps_the_revision() {
    let store = store();
    let state = PersistedState::default();

    assert_eq!(store.revision().unwrap(), 0);
    store.save(&state).expect("save");
    store.save(&state).expect("save");
    store.save(&state).expect("save");
    assert_eq!(store.revision().unwrap(), 3);
}

#[test]
fn flush_stamps_the_shutdown_timestamp() {
    let store = store();
    let mut saver = DirtySaveCoordinator::new();
    let mut state = PersistedState::default();

    saver.mark_dirty();
    let wrote = saver.flush_if_dirty(&mut state, &store, 123_456);

    assert!(wrote);
    assert_eq!(state.last_shutdown, 123_456);
    assert_eq!(store.load().last_shutdown, 123_456);
    assert!(!saver.is_dirty());
}

/// Two flushes with no mutation in between coalesce to one write.
#[test]
fn double_flush_without_mutation_writes_once() {
    let store = store();
    let mut saver = DirtySaveCoordinator::new();
    let mut state = PersistedState::default();

    saver.mark_dirty();
    assert!(saver.flush_if_dirty(&mut state, &store, 100));
    assert_eq!(store.revision().unwrap(), 1);

    assert!(!saver.flush_if_dirty(&mut state, &store, 200));
    assert_eq!(store.revision().unwrap(), 1, "second flush must not write");
}

#[test]
fn flush_on_a_clean_record_is_a_noop() {
    let store = store();
    let mut saver = DirtySaveCoordinator::new();
    let mut state = PersistedState::default();

    assert!(!saver.flush_if_dirty(&mut state, &store, 100));
    assert_eq!(store.revision().unwrap(), 0);
    assert_eq!(state.last_shutdown, 0, "no write, no stamp");
}

#[test]
fn mark_dirty_is_idempotent() {
    let store = store();
    let mut saver = DirtySaveCoordinator::new();
    let mut state = PersistedState::default();

    saver.mark_dirty();
    saver.mark_dirty();
    saver.mark_dirty();
    assert!(saver.flush_if_dirty(&mut state, &store, 100));
    assert_eq!(store.revision().unwrap(), 1);
}
