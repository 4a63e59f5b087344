//! Mood evaluator tests — priority order and the renderer signals.

use petsim_core::{
    mood::{evaluate_mood, status_message, Mood, VisualSignals, IDLE_MESSAGE},
    profile::Species,
    stats::StatBlock,
};

// Cleanliness is irrelevant to mood; pinned at 80.
fn stats(hunger: f64, happiness: f64, health: f64, energy: f64) -> StatBlock {
    StatBlock::new(hunger, happiness, health, 80.0, energy)
}

#[test]
fn no_mood_before_creation() {
    let sick = stats(99.0, 0.0, 0.0, 0.0);
    assert_eq!(evaluate_mood(false, &sick), None);
    assert_eq!(status_message(false, "Fluffy", &sick), IDLE_MESSAGE);
}

#[test]
fn sickness_outranks_hunger() {
    let s = stats(80.0, 50.0, 30.0, 50.0);
    assert_eq!(evaluate_mood(true, &s), Some(Mood::Sick));
    assert_eq!(
        status_message(true, "Fluffy", &s),
        "Fluffy looks sick - consider a vet visit."
    );
}

#[test]
fn priority_order_is_sick_hungry_sad_tired_happy() {
    let cases = [
        (stats(90.0, 10.0, 39.9, 5.0), Mood::Sick),
        (stats(75.1, 10.0, 40.0, 5.0), Mood::Hungry),
        (stats(75.0, 29.9, 40.0, 5.0), Mood::Sad),
        (stats(75.0, 30.0, 40.0, 19.9), Mood::Tired),
        (stats(75.0, 30.0, 40.0, 20.0), Mood::Happy),
    ];
    for (s, expected) in cases {
        assert_eq!(evaluate_mood(true, &s), Some(expected), "{s:?}");
    }
}

#[test]
fn messages_use_the_pet_name() {
    assert_eq!(Mood::Hungry.message("Rex"), "Rex is very hungry.");
    assert_eq!(Mood::Sad.message("Rex"), "Rex seems sad.");
    assert_eq!(Mood::Tired.message("Rex"), "Rex needs rest.");
    assert_eq!(Mood::Happy.message("Rex"), "Rex seems happy and playful!");
}

#[test]
fn vitality_needs_both_happiness_and_energy() {
    let lively = VisualSignals::derive(Species::Cat, &stats(50.0, 61.0, 90.0, 41.0));
    assert!(lively.vitality);
    assert_eq!(lively.spin_speed, 1.5);
    assert_eq!(lively.color, 0xc790ff);

    let sleepy = VisualSignals::derive(Species::Cat, &stats(50.0, 61.0, 90.0, 40.0));
    assert!(!sleepy.vitality);
    assert_eq!(sleepy.spin_speed, 0.3);

    let glum = VisualSignals::derive(Species::Other, &stats(50.0, 60.0, 90.0, 90.0));
    assert!(!glum.vitality);
    assert_eq!(glum.color, 0x9aff9a);
}
