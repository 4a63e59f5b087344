//! Shared primitive types used across the entire simulation.

/// A simulation tick. One tick = one decay step of the pet.
pub type Tick = u64;

/// Currency amount. Whole units only.
pub type Money = i64;

/// A stable identifier for one host session (one open save slot).
pub type SessionId = String;

/// Name of a persisted save slot.
pub type SlotName = String;
