//! Shared builders for the integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use petsim_core::{
    clock::FixedTimeSource,
    config::PetConfig,
    engine::PetEngine,
    profile::Species,
    rng::ScriptedRandom,
    snapshot::PetSnapshot,
};

pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
        .and_then(|d| d.and_hms_opt(8, 15, 30))
        .expect("valid timestamp")
}

/// Engine with pinned time and scripted chore draws.
pub fn engine_with_draws(draws: &[i64]) -> PetEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    PetEngine::with_sources(
        PetConfig::default(),
        Box::new(ScriptedRandom::new(draws.iter().copied())),
        Box::new(FixedTimeSource(fixed_now())),
    )
}

/// Fresh engine with a created pet named Fluffy.
pub fn created_engine() -> PetEngine {
    let mut engine = engine_with_draws(&[10]);
    assert!(engine.create_pet("Fluffy", Species::Dog).is_accepted());
    engine.drain_events();
    engine
}

/// Created pet with the given stats and balance.
pub fn engine_at(
    hunger: f64,
    happiness: f64,
    health: f64,
    cleanliness: f64,
    energy: f64,
    money: i64,
) -> PetEngine {
    let mut engine = engine_with_draws(&[10]);
    engine.restore(&PetSnapshot {
        created: true,
        hunger,
        happiness,
        health,
        cleanliness,
        energy,
        money,
        ..PetSnapshot::default()
    });
    engine.drain_events();
    engine
}
