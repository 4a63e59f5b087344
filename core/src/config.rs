//! Tunables for decay, actions, and chores.
//!
//! `PetConfig::default()` is the canonical game balance. A JSON file may
//! override any subset of it; absent fields keep their defaults.

use crate::{
    clock::DEFAULT_TICK_INTERVAL_MS,
    error::{SimError, SimResult},
    stats::Stat,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAVE_SLOT: &str = "virtual-pet-v1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatEffect {
    pub stat:  Stat,
    pub delta: f64,
}

impl StatEffect {
    pub fn new(stat: Stat, delta: f64) -> Self {
        Self { stat, delta }
    }
}

/// Cost and stat effects of one care action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionTuning {
    pub cost: u32,
    pub effects: Vec<StatEffect>,
}

impl ActionTuning {
    fn new(cost: u32, effects: &[(Stat, f64)]) -> Self {
        Self {
            cost,
            effects: effects.iter().map(|(s, d)| StatEffect::new(*s, *d)).collect(),
        }
    }
}

/// Per-action tunings. Each entry in a config file is merged onto that
/// action's own default, so `{"feed": {"cost": 6}}` keeps feed's effects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "ActionTableFile")]
pub struct ActionTable {
    pub feed:    ActionTuning,
    pub play:    ActionTuning,
    pub rest:    ActionTuning,
    pub clean:   ActionTuning,
    pub vet:     ActionTuning,
    pub buy_toy: ActionTuning,
}

impl Default for ActionTable {
    fn default() -> Self {
        Self {
            feed:    ActionTuning::new(5, &[(Stat::Hunger, -25.0), (Stat::Happiness, 8.0)]),
            play:    ActionTuning::new(0, &[(Stat::Happiness, 12.0), (Stat::Energy, -15.0)]),
            rest:    ActionTuning::new(0, &[(Stat::Energy, 30.0), (Stat::Happiness, 4.0)]),
            clean:   ActionTuning::new(3, &[(Stat::Cleanliness, 30.0)]),
            vet:     ActionTuning::new(25, &[(Stat::Health, 40.0)]),
            buy_toy: ActionTuning::new(8, &[(Stat::Happiness, 18.0)]),
        }
    }
}

/// Partial tuning as written in a config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ActionTuningFile {
    cost:    Option<u32>,
    effects: Option<Vec<StatEffect>>,
}

impl ActionTuningFile {
    fn merge_onto(self, base: ActionTuning) -> ActionTuning {
        ActionTuning {
            cost:    self.cost.unwrap_or(base.cost),
            effects: self.effects.unwrap_or(base.effects),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ActionTableFile {
    feed:    ActionTuningFile,
    play:    ActionTuningFile,
    rest:    ActionTuningFile,
    clean:   ActionTuningFile,
    vet:     ActionTuningFile,
    buy_toy: ActionTuningFile,
}

impl From<ActionTableFile> for ActionTable {
    fn from(file: ActionTableFile) -> Self {
        let base = ActionTable::default();
        Self {
            feed:    file.feed.merge_onto(base.feed),
            play:    file.play.merge_onto(base.play),
            rest:    file.rest.merge_onto(base.rest),
            clean:   file.clean.merge_onto(base.clean),
            vet:     file.vet.merge_onto(base.vet),
            buy_toy: file.buy_toy.merge_onto(base.buy_toy),
        }
    }
}

/// Which stat values the per-tick health rule reads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthRuleOrdering {
    /// Hunger, happiness and cleanliness as they were before this tick's
    /// decay. Matches the shipped game.
    #[default]
    PreTick,
    /// Values after this tick's decay has been applied.
    PostTick,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HealthRuleConfig {
    pub ordering: HealthRuleOrdering,
    /// Health drops when hunger is strictly above this...
    pub sick_hunger_above:       f64,
    /// ...or cleanliness strictly below this.
    pub sick_cleanliness_below:  f64,
    pub sick_delta:              f64,
    /// Health recovers when happiness and cleanliness are both strictly above these.
    pub thrive_happiness_above:  f64,
    pub thrive_cleanliness_above: f64,
    pub thrive_delta:            f64,
}

impl Default for HealthRuleConfig {
    fn default() -> Self {
        Self {
            ordering: HealthRuleOrdering::PreTick,
            sick_hunger_above:        90.0,
            sick_cleanliness_below:   10.0,
            sick_delta:               -4.0,
            thrive_happiness_above:   80.0,
            thrive_cleanliness_above: 50.0,
            thrive_delta:             1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DecayConfig {
    pub hunger:      f64,
    pub happiness:   f64,
    pub cleanliness: f64,
    pub energy:      f64,
    pub health:      HealthRuleConfig,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            hunger:      3.0,
            happiness:   -2.0,
            cleanliness: -1.5,
            energy:      -2.5,
            health:      HealthRuleConfig::default(),
        }
    }
}

impl DecayConfig {
    /// The unconditional per-tick deltas, in application order.
    pub fn deltas(&self) -> [(Stat, f64); 4] {
        [
            (Stat::Hunger, self.hunger),
            (Stat::Happiness, self.happiness),
            (Stat::Cleanliness, self.cleanliness),
            (Stat::Energy, self.energy),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChoreConfig {
    pub min_earning: u32,
    pub max_earning: u32,
}

impl Default for ChoreConfig {
    fn default() -> Self {
        Self { min_earning: 5, max_earning: 15 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PetConfig {
    pub tick_interval_ms: u64,
    pub decay:            DecayConfig,
    pub actions:          ActionTable,
    pub chore:            ChoreConfig,
    pub save_slot:        String,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            decay:            DecayConfig::default(),
            actions:          ActionTable::default(),
            chore:            ChoreConfig::default(),
            save_slot:        DEFAULT_SAVE_SLOT.to_string(),
        }
    }
}

impl PetConfig {
    /// Load from a JSON file. Fields the file omits keep their defaults.
    pub fn load(path: &str) -> SimResult<Self> {
        let fail = |reason: String| SimError::Config { path: path.to_string(), reason };
        let content = std::fs::read_to_string(path)
            .map_err(|e| fail(format!("cannot read: {e}")))?;
        let config: PetConfig = serde_json::from_str(&content)
            .map_err(|e| fail(format!("cannot parse: {e}")))?;
        config.validate().map_err(fail)?;
        Ok(config)
    }

    /// Reject tunables the engine cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be > 0".into());
        }
        if self.chore.min_earning > self.chore.max_earning {
            return Err(format!(
                "chore.min_earning ({}) exceeds chore.max_earning ({})",
                self.chore.min_earning, self.chore.max_earning
            ));
        }
        if self.save_slot.trim().is_empty() {
            return Err("save_slot must not be empty".into());
        }
        Ok(())
    }
}
