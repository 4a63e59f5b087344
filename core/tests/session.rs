//! Session and store tests.
//!
//! Tests cover: persist-on-mutation, reopening a slot, the event journal,
//! and the live ticker against a shared session.

mod common;

use common::engine_with_draws;
use petsim_core::{
    action::PetAction,
    config::PetConfig,
    engine::RESTORED_MESSAGE,
    profile::Species,
    session::{self, PetSession},
    snapshot::PetSnapshot,
    store::PetStore,
};
use std::time::{Duration, Instant};

/// A named shared-cache memory database, so two connections see one DB.
fn shared_memory_uri(name: &str) -> String {
    format!("file:{name}?mode=memory&cache=shared")
}

fn open_session(uri: &str) -> PetSession {
    let store = PetStore::open(uri).expect("open store");
    PetSession::open_with_engine(store, engine_with_draws(&[12]), 42).expect("open session")
}

#[test]
fn every_accepted_action_is_saved_to_the_slot() {
    let store = PetStore::in_memory().unwrap();
    let mut session = PetSession::open(store, PetConfig::default(), 1).unwrap();

    session
        .dispatch(PetAction::CreatePet { name: "Rex".into(), species: Species::Dog })
        .unwrap();
    session.dispatch(PetAction::Feed).unwrap();

    let saved = session
        .store()
        .load_snapshot("virtual-pet-v1")
        .unwrap()
        .expect("slot saved");
    let snapshot = PetSnapshot::from_json(&saved);
    assert_eq!(snapshot.name, "Rex");
    assert_eq!(snapshot.money, 45);
    assert_eq!(snapshot.expenses.len(), 1);
    assert_eq!(snapshot.to_state(), *session.engine().state());
}

#[test]
fn reopening_the_slot_restores_the_pet() {
    let uri = shared_memory_uri("pet_session_reopen");
    let mut first = open_session(&uri);
    first
        .dispatch(PetAction::CreatePet { name: "Mochi".into(), species: Species::Cat })
        .unwrap();
    first.dispatch(PetAction::DoChore).unwrap();
    first.run_ticks(4).unwrap();
    first.dispatch(PetAction::Vet).unwrap();

    // Keep `first` alive so the shared memory database survives.
    let second = open_session(&uri);

    assert_eq!(second.engine().state(), first.engine().state());
    assert_eq!(second.engine().balance(), 50 + 12 - 25);
    assert_eq!(second.engine().status_message(), RESTORED_MESSAGE);
    assert_ne!(second.session_id, first.session_id);
}

#[test]
fn declines_are_journaled_but_not_saved() {
    let store = PetStore::in_memory().unwrap();
    let mut session = PetSession::open(store, PetConfig::default(), 3).unwrap();

    let outcome = session.dispatch(PetAction::Feed).unwrap();

    assert!(!outcome.is_accepted());
    assert_eq!(session.store().load_snapshot("virtual-pet-v1").unwrap(), None);
    let events = session.events().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "action_declined");
}

#[test]
fn journal_records_ticks_and_actions_in_order() {
    let store = PetStore::in_memory().unwrap();
    let mut session = PetSession::open(store, PetConfig::default(), 9).unwrap();
    session
        .dispatch(PetAction::CreatePet { name: "Pip".into(), species: Species::Rabbit })
        .unwrap();
    session.run_ticks(3).unwrap();
    session.dispatch(PetAction::Play).unwrap();

    let types: Vec<String> = session
        .events()
        .unwrap()
        .into_iter()
        .map(|e| e.event_type)
        .collect();
    assert_eq!(
        types,
        ["pet_created", "tick_applied", "tick_applied", "tick_applied", "action_accepted"]
    );
    assert_eq!(
        session.store().event_count(&session.session_id, "tick_applied").unwrap(),
        3
    );
}

#[test]
fn reset_overwrites_the_slot_with_a_fresh_pet() {
    let store = PetStore::in_memory().unwrap();
    let mut session = PetSession::open(store, PetConfig::default(), 5).unwrap();
    session
        .dispatch(PetAction::CreatePet { name: "Rex".into(), species: Species::Dog })
        .unwrap();

    session.reset().unwrap();

    let saved = session.store().load_snapshot("virtual-pet-v1").unwrap().unwrap();
    let snapshot = PetSnapshot::from_json(&saved);
    assert!(!snapshot.created);
    assert_eq!(snapshot.name, "Fluffy");
}

#[test]
fn file_backed_save_survives_reopen() {
    let path = std::env::temp_dir().join(format!("petsim-{}-reopen.db", std::process::id()));
    let path = path.to_str().unwrap().to_string();
    let _ = std::fs::remove_file(&path);

    {
        let mut session = open_session(&path);
        session
            .dispatch(PetAction::CreatePet { name: "Disk".into(), species: Species::Rabbit })
            .unwrap();
    }

    let reopened = open_session(&path);
    assert_eq!(reopened.engine().profile().name, "Disk");
    assert_eq!(reopened.engine().status_message(), RESTORED_MESSAGE);

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{path}{suffix}"));
    }
}

#[test]
fn custom_slots_are_independent() {
    let uri = shared_memory_uri("pet_session_slots");
    let keep_alive = PetStore::open(&uri).unwrap();
    keep_alive.migrate().unwrap();

    let config = PetConfig { save_slot: "second-pet".into(), ..PetConfig::default() };
    let mut session = PetSession::open(PetStore::open(&uri).unwrap(), config, 1).unwrap();
    session
        .dispatch(PetAction::CreatePet { name: "Two".into(), species: Species::Other })
        .unwrap();

    assert!(keep_alive.load_snapshot("second-pet").unwrap().is_some());
    assert!(keep_alive.load_snapshot("virtual-pet-v1").unwrap().is_none());
    assert!(keep_alive.delete_snapshot("second-pet").unwrap());
    assert!(keep_alive.load_snapshot("second-pet").unwrap().is_none());
}

#[test]
fn live_ticker_decays_the_shared_pet_and_stops_on_cancel() {
    let store = PetStore::in_memory().unwrap();
    let config = PetConfig { tick_interval_ms: 5, ..PetConfig::default() };
    let mut session = PetSession::open(store, config, 11).unwrap();
    session
        .dispatch(PetAction::CreatePet { name: "Zip".into(), species: Species::Dog })
        .unwrap();
    let shared = session.into_shared();

    let handle = session::start_ticker(&shared).unwrap();
    let deadline = Instant::now() + Duration::from_secs(5);
    while session::lock(&shared).unwrap().engine().clock.current_tick < 3
        && Instant::now() < deadline
    {
        std::thread::sleep(Duration::from_millis(2));
    }

    // Actions interleave with ticks under the same lock.
    session::lock(&shared).unwrap().dispatch(PetAction::Rest).unwrap();

    handle.cancel();
    let stopped_at = session::lock(&shared).unwrap().engine().clock.current_tick;
    assert!(stopped_at >= 3, "expected at least 3 live ticks, got {stopped_at}");

    std::thread::sleep(Duration::from_millis(40));
    let guard = session::lock(&shared).unwrap();
    assert_eq!(guard.engine().clock.current_tick, stopped_at, "tick after cancel");
    assert!(guard.engine().stats().in_range());
}
