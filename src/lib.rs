//! # Liar's Dice
//!
//! A single heads-up round of Liar's Dice: both players roll in secret, take turns
//! raising a bid on the combined roll, and either may call lie on the last bid,
//! which reveals the hands and settles the round.
//!
//! Moves are plain integer ids (see [`codec`]) so the same engine can be driven
//! by a console player or by a policy producing one score per id.

pub mod codec;
pub mod config;
pub mod error;
pub mod hand;
pub mod human;
pub mod play;
pub mod policy;
pub mod resolve;
pub mod round;
pub mod utils;

pub use codec::{Action, ActionCodec, Bid};
pub use config::{DiceConfig, Variant};
pub use error::{Attempt, GameError, Result};
pub use hand::{FixedRolls, Hand, RandomRolls, RollSource};
pub use policy::{DecisionProvider, HeuristicPolicy, Policy, PolicyProvider};
pub use resolve::Outcome;
pub use round::{Phase, Round, RoundState, Step};
pub use utils::Player;

#[cfg(test)]
mod round_tests;
