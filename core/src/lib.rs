//! petsim-core: a virtual pet's welfare and pocket-money simulation.
//!
//! Layering, leaves first:
//!   stats / ledger / profile  -> bounded state
//!   decay / mood              -> pure rules over that state
//!   engine                    -> ticks and actions over the aggregate
//!   snapshot                  -> save format, lenient restore
//!   store / session / ticker  -> host adapter: SQLite slot, live clock

pub mod action;
pub mod clock;
pub mod config;
pub mod decay;
pub mod engine;
pub mod error;
pub mod event;
pub mod ledger;
pub mod mood;
pub mod profile;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod stats;
pub mod store;
pub mod ticker;
pub mod types;
