//! Two engines, same seed, same script.
//! They must end in identical states with identical event journals.

use petsim_core::{
    action::PetAction,
    config::PetConfig,
    engine::PetEngine,
    profile::Species,
};

fn run_script(seed: u64) -> (PetEngine, Vec<String>) {
    let mut engine = PetEngine::new(PetConfig::default(), seed);
    let mut journal = Vec::new();
    engine.create_pet("Fluffy", Species::Dog);

    for round in 0..120u64 {
        match round % 5 {
            0 => engine.do_chore(),
            1 => engine.play(),
            2 => engine.feed(),
            3 => engine.rest(),
            _ => engine.apply(PetAction::DoChore),
        };
        engine.tick();
        journal.extend(
            engine
                .drain_events()
                .iter()
                .map(|e| serde_json::to_string(e).expect("serialize event")),
        );
    }
    (engine, journal)
}

#[test]
fn same_seed_produces_identical_journals() {
    const SEED: u64 = 0xDEAD_BEEF_CAFE_1234;

    let (engine_a, log_a) = run_script(SEED);
    let (engine_b, log_b) = run_script(SEED);

    assert_eq!(log_a.len(), log_b.len());
    for (i, (a, b)) in log_a.iter().zip(log_b.iter()).enumerate() {
        assert_eq!(a, b, "journal diverged at entry {i}");
    }
    // Ledger timestamps come from the wall clock; compare the rest.
    assert_eq!(engine_a.stats(), engine_b.stats());
    assert_eq!(engine_a.balance(), engine_b.balance());
    assert_eq!(engine_a.economy().ledger.len(), engine_b.economy().ledger.len());
}

#[test]
fn different_seeds_produce_different_journals() {
    let (_, log_a) = run_script(42);
    let (_, log_b) = run_script(99);

    assert_ne!(log_a, log_b, "different seeds produced identical chore income");
}
