//! The single pet aggregate: identity, stats, and money.
//!
//! Created together, mutated together, replaced together. There is no
//! way to destroy one part on its own.

use crate::{
    ledger::EconomyState,
    profile::PetProfile,
    stats::StatBlock,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetState {
    pub profile: PetProfile,
    pub stats:   StatBlock,
    pub economy: EconomyState,
}

impl PetState {
    pub fn is_created(&self) -> bool {
        self.profile.created
    }
}
