//! The bounded welfare scalars of a pet.
//!
//! RULE: every write goes through `clamp`. StatBlock fields are private;
//! the only mutators are `set` and `adjust`, both of which clamp.

use serde::{Deserialize, Serialize};

pub const STAT_MIN: f64 = 0.0;
pub const STAT_MAX: f64 = 100.0;

/// Clamp `value` into [lo, hi]. Total: NaN maps to `lo`.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    value.max(lo).min(hi)
}

fn clamp_stat(value: f64) -> f64 {
    clamp(value, STAT_MIN, STAT_MAX)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Hunger,
    Happiness,
    Health,
    Cleanliness,
    Energy,
}

impl Stat {
    pub const ALL: [Stat; 5] = [
        Stat::Hunger,
        Stat::Happiness,
        Stat::Health,
        Stat::Cleanliness,
        Stat::Energy,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hunger      => "hunger",
            Self::Happiness   => "happiness",
            Self::Health      => "health",
            Self::Cleanliness => "cleanliness",
            Self::Energy      => "energy",
        }
    }

    /// Value a freshly created pet starts with.
    pub fn default_value(&self) -> f64 {
        match self {
            Self::Hunger      => 50.0,
            Self::Happiness   => 70.0,
            Self::Health      => 90.0,
            Self::Cleanliness => 80.0,
            Self::Energy      => 75.0,
        }
    }
}

/// Serialize only: deserializing would bypass the clamp. Snapshots
/// rebuild blocks through `StatBlock::new`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct StatBlock {
    hunger:      f64,
    happiness:   f64,
    health:      f64,
    cleanliness: f64,
    energy:      f64,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            hunger:      Stat::Hunger.default_value(),
            happiness:   Stat::Happiness.default_value(),
            health:      Stat::Health.default_value(),
            cleanliness: Stat::Cleanliness.default_value(),
            energy:      Stat::Energy.default_value(),
        }
    }
}

impl StatBlock {
    /// Build a block from raw values, clamping each one.
    pub fn new(hunger: f64, happiness: f64, health: f64, cleanliness: f64, energy: f64) -> Self {
        Self {
            hunger:      clamp_stat(hunger),
            happiness:   clamp_stat(happiness),
            health:      clamp_stat(health),
            cleanliness: clamp_stat(cleanliness),
            energy:      clamp_stat(energy),
        }
    }

    pub fn hunger(&self)      -> f64 { self.hunger }
    pub fn happiness(&self)   -> f64 { self.happiness }
    pub fn health(&self)      -> f64 { self.health }
    pub fn cleanliness(&self) -> f64 { self.cleanliness }
    pub fn energy(&self)      -> f64 { self.energy }

    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Hunger      => self.hunger,
            Stat::Happiness   => self.happiness,
            Stat::Health      => self.health,
            Stat::Cleanliness => self.cleanliness,
            Stat::Energy      => self.energy,
        }
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        let value = clamp_stat(value);
        match stat {
            Stat::Hunger      => self.hunger = value,
            Stat::Happiness   => self.happiness = value,
            Stat::Health      => self.health = value,
            Stat::Cleanliness => self.cleanliness = value,
            Stat::Energy      => self.energy = value,
        }
    }

    /// Add `delta` to a stat and clamp. Returns the new value.
    pub fn adjust(&mut self, stat: Stat, delta: f64) -> f64 {
        self.set(stat, self.get(stat) + delta);
        self.get(stat)
    }

    pub fn in_range(&self) -> bool {
        Stat::ALL
            .iter()
            .all(|s| (STAT_MIN..=STAT_MAX).contains(&self.get(*s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_is_total() {
        assert_eq!(clamp(-3.0, 0.0, 100.0), 0.0);
        assert_eq!(clamp(140.0, 0.0, 100.0), 100.0);
        assert_eq!(clamp(42.5, 0.0, 100.0), 42.5);
        assert_eq!(clamp(f64::NAN, 0.0, 100.0), 0.0);
        assert_eq!(clamp(f64::INFINITY, 0.0, 100.0), 100.0);
    }

    #[test]
    fn adjust_never_leaves_range() {
        let mut stats = StatBlock::default();
        assert_eq!(stats.adjust(Stat::Health, 500.0), 100.0);
        assert_eq!(stats.adjust(Stat::Energy, -500.0), 0.0);
        assert!(stats.in_range());
    }

    #[test]
    fn new_clamps_out_of_range_inputs() {
        let stats = StatBlock::new(-1.0, 101.0, 50.0, f64::NAN, 100.0);
        assert_eq!(stats.hunger(), 0.0);
        assert_eq!(stats.happiness(), 100.0);
        assert_eq!(stats.cleanliness(), 0.0);
    }
}
