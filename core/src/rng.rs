//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call any platform RNG.
//! All randomness flows through a RandomSource handed to the engine,
//! so hosts seed it and tests script it.
//!
//! Each consumer gets its own stream, seeded from
//! (master_seed XOR slot_index * golden-ratio constant). Adding a new
//! slot never changes an existing slot's stream.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use std::collections::VecDeque;

/// Injectable source of uniformly distributed integers.
pub trait RandomSource: Send {
    /// Draw an integer in the closed range [lo, hi].
    fn next_in_range(&mut self, lo: i64, hi: i64) -> i64;
}

/// Seeded PCG stream for one slot.
pub struct PetRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl PetRng {
    /// The slot index must never change once assigned.
    pub fn new(master_seed: u64, slot: RngSlot) -> Self {
        let derived_seed = master_seed ^ (slot as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            name: slot.name(),
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }
}

impl RandomSource for PetRng {
    fn next_in_range(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        self.inner.gen_range(lo..=hi)
    }
}

/// Replays a fixed list of draws, clamped into the requested range.
/// Repeats the last value once exhausted; yields `lo` if empty.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<i64>,
    last:  Option<i64>,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = i64>) -> Self {
        Self { draws: draws.into_iter().collect(), last: None }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_in_range(&mut self, lo: i64, hi: i64) -> i64 {
        if let Some(next) = self.draws.pop_front() {
            self.last = Some(next);
        }
        self.last.unwrap_or(lo).clamp(lo, hi.max(lo))
    }
}

/// Stable slot assignments.
/// NEVER reorder or remove entries — only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngSlot {
    Chore = 0,
}

impl RngSlot {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chore => "chore",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = PetRng::new(12345, RngSlot::Chore);
        let mut b = PetRng::new(12345, RngSlot::Chore);
        for _ in 0..50 {
            assert_eq!(a.next_in_range(5, 15), b.next_in_range(5, 15));
        }
    }

    #[test]
    fn draws_stay_inside_closed_range() {
        let mut rng = PetRng::new(7, RngSlot::Chore);
        let mut seen_lo = false;
        let mut seen_hi = false;
        for _ in 0..2_000 {
            let v = rng.next_in_range(5, 15);
            assert!((5..=15).contains(&v), "draw {v} outside [5, 15]");
            seen_lo |= v == 5;
            seen_hi |= v == 15;
        }
        assert!(seen_lo && seen_hi, "both endpoints should be reachable");
    }

    #[test]
    fn scripted_source_replays_then_repeats() {
        let mut rng = ScriptedRandom::new([5, 99, 9]);
        assert_eq!(rng.next_in_range(5, 15), 5);
        assert_eq!(rng.next_in_range(5, 15), 15);
        assert_eq!(rng.next_in_range(5, 15), 9);
        assert_eq!(rng.next_in_range(5, 15), 9);
    }
}
