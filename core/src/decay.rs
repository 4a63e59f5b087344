//! Per-tick decay — the only autonomous state transition.
//!
//! ORDER (fixed):
//!   1. Capture the pre-tick stats.
//!   2. Apply the unconditional deltas: hunger, happiness, cleanliness, energy.
//!   3. Apply the health rule against the pre-tick capture (or the
//!      post-decay values when configured with `PostTick`).
//!
//! Every write goes through StatBlock, so every value stays in [0, 100].

use crate::{
    config::{DecayConfig, HealthRuleConfig, HealthRuleOrdering},
    stats::{Stat, StatBlock},
};

/// Health change the rule asks for, before clamping.
pub fn health_rule_delta(observed: &StatBlock, rule: &HealthRuleConfig) -> f64 {
    if observed.hunger() > rule.sick_hunger_above
        || observed.cleanliness() < rule.sick_cleanliness_below
    {
        rule.sick_delta
    } else if observed.happiness() > rule.thrive_happiness_above
        && observed.cleanliness() > rule.thrive_cleanliness_above
    {
        rule.thrive_delta
    } else {
        0.0
    }
}

/// Run one decay step in place. Returns the health change actually applied.
pub fn apply_decay(stats: &mut StatBlock, config: &DecayConfig) -> f64 {
    let before = *stats;

    for (stat, delta) in config.deltas() {
        stats.adjust(stat, delta);
    }

    let observed = match config.health.ordering {
        HealthRuleOrdering::PreTick  => before,
        HealthRuleOrdering::PostTick => *stats,
    };
    let delta = health_rule_delta(&observed, &config.health);
    if delta == 0.0 {
        return 0.0;
    }
    let old = stats.health();
    stats.adjust(Stat::Health, delta) - old
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconditional_deltas() {
        let mut stats = StatBlock::default();
        apply_decay(&mut stats, &DecayConfig::default());
        assert_eq!(stats.hunger(), 53.0);
        assert_eq!(stats.happiness(), 68.0);
        assert_eq!(stats.cleanliness(), 78.5);
        assert_eq!(stats.energy(), 72.5);
        assert_eq!(stats.health(), 90.0);
    }

    #[test]
    fn thrive_bonus_reads_pre_tick_happiness() {
        // 81 happiness drops to 79 this tick, but the rule sees 81.
        let mut stats = StatBlock::new(50.0, 81.0, 60.0, 60.0, 50.0);
        let delta = apply_decay(&mut stats, &DecayConfig::default());
        assert_eq!(delta, 1.0);
        assert_eq!(stats.health(), 61.0);
    }

    #[test]
    fn post_tick_ordering_sees_decayed_values() {
        let mut config = DecayConfig::default();
        config.health.ordering = HealthRuleOrdering::PostTick;
        // Hunger 89 becomes 92 after decay; only post-tick sees it above 90.
        let mut stats = StatBlock::new(89.0, 50.0, 60.0, 60.0, 50.0);
        assert_eq!(apply_decay(&mut stats, &config), -4.0);

        let mut stats = StatBlock::new(89.0, 50.0, 60.0, 60.0, 50.0);
        assert_eq!(apply_decay(&mut stats, &DecayConfig::default()), 0.0);
    }

    #[test]
    fn reported_delta_is_post_clamp() {
        let mut stats = StatBlock::new(95.0, 50.0, 2.0, 60.0, 50.0);
        assert_eq!(apply_decay(&mut stats, &DecayConfig::default()), -2.0);
        assert_eq!(stats.health(), 0.0);
    }
}
