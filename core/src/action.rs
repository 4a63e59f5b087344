use crate::{profile::Species, types::Money};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every user intent the engine accepts.
/// Variants are never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PetAction {
    CreatePet {
        name:    String,
        #[serde(default)]
        species: Species,
    },
    Feed,
    Play,
    Rest,
    Clean,
    Vet,
    BuyToy,
    DoChore,
}

impl PetAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::CreatePet { .. } => ActionKind::CreatePet,
            Self::Feed    => ActionKind::Feed,
            Self::Play    => ActionKind::Play,
            Self::Rest    => ActionKind::Rest,
            Self::Clean   => ActionKind::Clean,
            Self::Vet     => ActionKind::Vet,
            Self::BuyToy  => ActionKind::BuyToy,
            Self::DoChore => ActionKind::DoChore,
        }
    }
}

/// Payload-free tag for an action, used in outcomes and the event log.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CreatePet,
    Feed,
    Play,
    Rest,
    Clean,
    Vet,
    BuyToy,
    DoChore,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreatePet => "create_pet",
            Self::Feed      => "feed",
            Self::Play      => "play",
            Self::Rest      => "rest",
            Self::Clean     => "clean",
            Self::Vet       => "vet",
            Self::BuyToy    => "buy_toy",
            Self::DoChore   => "do_chore",
        }
    }

    /// Ledger category for cost-bearing actions.
    pub fn expense_label(&self) -> &'static str {
        match self {
            Self::Feed   => "Food",
            Self::Clean  => "Cleaning supplies",
            Self::Vet    => "Vet visit",
            Self::BuyToy => "Toy",
            _            => "Other",
        }
    }

    pub fn funds_message(&self) -> &'static str {
        match self {
            Self::Feed   => "You need more money for food.",
            Self::Clean  => "You need more money for cleaning supplies.",
            Self::Vet    => "You need more money for the vet.",
            Self::BuyToy => "You can't afford this toy.",
            _            => "You need more money.",
        }
    }

    /// Status line after the action succeeds.
    pub fn success_message(&self, name: &str) -> String {
        match self {
            Self::Feed   => format!("{name} ate happily."),
            Self::Play   => format!("{name} had fun playing!"),
            Self::Rest   => format!("{name} took a nap."),
            Self::Clean  => format!("{name} is now clean!"),
            Self::Vet    => format!("{name} feels better after the checkup."),
            Self::BuyToy => format!("{name} loves the new toy!"),
            // Creation and chores carry their own details.
            Self::CreatePet | Self::DoChore => String::new(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DeclineReason {
    #[error("pet not created yet")]
    NotCreated,

    #[error("pet already created")]
    AlreadyCreated,

    #[error("{}", .action.funds_message())]
    InsufficientFunds {
        action:    ActionKind,
        needed:    Money,
        available: Money,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    Accepted {
        kind:   ActionKind,
        /// Amount debited and written to the ledger. Zero for free actions.
        spent:  u32,
        /// Amount credited. Non-zero only for chores.
        earned: Money,
    },
    Declined {
        kind:   ActionKind,
        reason: DeclineReason,
    },
}

impl ActionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Accepted { kind, .. } | Self::Declined { kind, .. } => *kind,
        }
    }

    pub fn decline_reason(&self) -> Option<&DeclineReason> {
        match self {
            Self::Declined { reason, .. } => Some(reason),
            Self::Accepted { .. } => None,
        }
    }
}
