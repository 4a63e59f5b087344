//! Mood evaluation and the read-only signals handed to the renderer.
//!
//! Mood is derived, never stored. Priority order (first match wins):
//! sick > hungry > sad > tired > happy.

use crate::{profile::Species, stats::StatBlock};
use serde::{Deserialize, Serialize};

pub const SICK_HEALTH_BELOW:    f64 = 40.0;
pub const HUNGRY_HUNGER_ABOVE:  f64 = 75.0;
pub const SAD_HAPPINESS_BELOW:  f64 = 30.0;
pub const TIRED_ENERGY_BELOW:   f64 = 20.0;

pub const VITAL_HAPPINESS_ABOVE: f64 = 60.0;
pub const VITAL_ENERGY_ABOVE:    f64 = 40.0;

pub const IDLE_MESSAGE: &str = "Welcome! Create your pet to begin.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Sick,
    Hungry,
    Sad,
    Tired,
    Happy,
}

impl Mood {
    pub fn message(&self, name: &str) -> String {
        match self {
            Self::Sick   => format!("{name} looks sick - consider a vet visit."),
            Self::Hungry => format!("{name} is very hungry."),
            Self::Sad    => format!("{name} seems sad."),
            Self::Tired  => format!("{name} needs rest."),
            Self::Happy  => format!("{name} seems happy and playful!"),
        }
    }
}

/// None until the pet exists.
pub fn evaluate_mood(created: bool, stats: &StatBlock) -> Option<Mood> {
    if !created {
        return None;
    }
    let mood = if stats.health() < SICK_HEALTH_BELOW {
        Mood::Sick
    } else if stats.hunger() > HUNGRY_HUNGER_ABOVE {
        Mood::Hungry
    } else if stats.happiness() < SAD_HAPPINESS_BELOW {
        Mood::Sad
    } else if stats.energy() < TIRED_ENERGY_BELOW {
        Mood::Tired
    } else {
        Mood::Happy
    };
    Some(mood)
}

/// Status line for a pet: the idle prompt before creation, else the mood.
pub fn status_message(created: bool, name: &str, stats: &StatBlock) -> String {
    match evaluate_mood(created, stats) {
        Some(mood) => mood.message(name),
        None => IDLE_MESSAGE.to_string(),
    }
}

/// What the renderer may read. It never writes back.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct VisualSignals {
    pub species:    Species,
    pub vitality:   bool,
    pub spin_speed: f64,
    pub color:      u32,
}

impl VisualSignals {
    pub fn derive(species: Species, stats: &StatBlock) -> Self {
        let vitality = stats.happiness() > VITAL_HAPPINESS_ABOVE
            && stats.energy() > VITAL_ENERGY_ABOVE;
        Self {
            species,
            vitality,
            spin_speed: if vitality { 1.5 } else { 0.3 },
            color: species.display_color(),
        }
    }
}
