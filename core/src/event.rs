//! The event journal — a record of every state change.
//!
//! The engine emits events; the session persists them. Nothing reads
//! events back to rebuild state: snapshots are the restore path.

use crate::{
    action::{ActionKind, DeclineReason},
    mood::Mood,
    profile::Species,
    stats::StatBlock,
    types::{Money, SessionId, Tick},
};
use serde::{Deserialize, Serialize};

/// Every event emitted by the engine.
/// Variants are never removed or reordered.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PetEvent {
    PetCreated {
        name:    String,
        species: Species,
    },
    TickApplied {
        tick:  Tick,
        stats: StatBlock,
        health_delta: f64,
        mood:  Option<Mood>,
    },
    ActionAccepted {
        tick:    Tick,
        action:  ActionKind,
        spent:   u32,
        balance: Money,
    },
    ActionDeclined {
        tick:   Tick,
        action: ActionKind,
        reason: DeclineReason,
    },
    ChoreCompleted {
        tick:    Tick,
        earned:  Money,
        balance: Money,
    },
    StateRestored {
        created: bool,
        expense_count: usize,
    },
    StateReset,
}

impl PetEvent {
    /// Stable name for the event_type column.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::PetCreated { .. }     => "pet_created",
            Self::TickApplied { .. }    => "tick_applied",
            Self::ActionAccepted { .. } => "action_accepted",
            Self::ActionDeclined { .. } => "action_declined",
            Self::ChoreCompleted { .. } => "chore_completed",
            Self::StateRestored { .. }  => "state_restored",
            Self::StateReset            => "state_reset",
        }
    }
}

/// The event log entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id:         Option<i64>,
    pub session_id: SessionId,
    pub tick:       Tick,
    pub event_type: String,
    pub payload:    String, // JSON-serialized PetEvent
}
