//! WordMatch game core
//!
//! Session state machine, bounded slot window and the replenishment queue that
//! refills it, plus the vocabulary, settings and dictionary helpers the
//! frontends need. `no_std` compatible; the `std` feature is on by default.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dictionary;
pub mod engine;
pub mod error;
pub mod log;
pub mod pool;
pub mod queue;
pub mod rng;
pub mod schedule;
pub mod settings;
pub mod state;
pub mod types;
pub mod view;
pub mod vocabulary;
pub mod window;

#[cfg(test)]
mod tests;

pub use engine::{MatchEngine, SelectOutcome};
pub use error::{GameError, GameResult};
pub use state::*;
pub use types::*;
pub use view::*;
