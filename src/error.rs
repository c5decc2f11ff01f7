use crate::codec::{Action, Bid};
use crate::utils::ActionId;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// The move a rejected decision tried to make
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Attempt {
    /// A raw action id, in range or not
    Id(ActionId),
    /// A bid outside the action space, so it has no id
    Bid(Bid),
}

impl Display for Attempt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self { Attempt::Id(id) => write!(f, "{id}"), Attempt::Bid(bid) => write!(f, "{bid}") }
    }
}

/// Everything that can go wrong inside a single round.
/// None of these carry process-wide state; a failed round is simply dropped.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("illegal action {attempted} (current bid: {})", display_bid(.current))]
    IllegalAction { attempted: Attempt, current: Option<Action> },
    #[error("cannot call lie before any bid has been made")]
    IllegalChallenge,
    #[error("the round is already finished")]
    RoundAlreadyFinished,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("action id {id} is outside 0..={lie_id}")]
    DecoderRange { id: ActionId, lie_id: ActionId },
    #[error("bid of {quantity} {face}s cannot be encoded")]
    InvalidAction { quantity: u8, face: u8 },
    #[error("player quit")]
    Quit,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// Caller errors the decision provider can recover from by choosing again
    pub fn is_illegal_choice(&self) -> bool {
        matches!(self, GameError::IllegalAction { .. }
            | GameError::IllegalChallenge
            | GameError::DecoderRange { .. }
            | GameError::InvalidAction { .. })
    }
}

fn display_bid(current: &Option<Action>) -> String {
    match current { Some(a) => a.to_string(), None => "nothing".to_string() }
}

pub type Result<T> = std::result::Result<T, GameError>;
