//! # Action ids
//!
//! Every bid and the lie call are flattened to a single integer so that a policy
//! can address them as slots of one output vector. Bids are enumerated count-major:
//! `id = (quantity - 1) * sides + (face - 1)`, and the lie id sits right after the
//! largest bid. Escalation is defined by this numbering, nothing else.

use crate::config::DiceConfig;
use crate::error::{GameError, Result};
use crate::utils::{ActionId, Face};
use std::fmt::{Display, Formatter};

/// A public claim: "at least `quantity` dice on the table show `face`"
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Bid {
    pub quantity: u8,
    pub face: Face,
}

impl Bid {
    pub fn new(quantity: u8, face: Face) -> Self {
        Bid { quantity, face }
    }
}

impl Display for Bid {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}s", self.quantity, self.face)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Action {
    Bid(Bid),
    Lie,
}

impl Action {
    pub fn bid(self) -> Option<Bid> {
        match self { Action::Bid(b) => Some(b), Action::Lie => None }
    }
}

impl From<Bid> for Action {
    fn from(bid: Bid) -> Self { Action::Bid(bid) }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self { Action::Bid(b) => b.fmt(f), Action::Lie => f.write_str("lie") }
    }
}

/// Bidirectional map between actions and ids for one dice configuration
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ActionCodec {
    sides: u8,
    max_quantity: u8,
}

impl ActionCodec {
    pub fn new(config: &DiceConfig) -> Self {
        ActionCodec { sides: config.sides(), max_quantity: config.max_quantity() }
    }

    #[inline] pub fn sides(&self) -> u8 { self.sides }
    #[inline] pub fn max_quantity(&self) -> u8 { self.max_quantity }

    /// First id past the last bid
    #[inline] pub fn lie_id(&self) -> ActionId {
        self.max_quantity as ActionId * self.sides as ActionId
    }

    /// Size of the whole action space, lie included
    #[inline] pub fn num_actions(&self) -> usize {
        self.lie_id() + 1
    }

    pub fn encode_bid(&self, bid: Bid) -> Result<ActionId> {
        let in_range = (1..=self.max_quantity).contains(&bid.quantity) && (1..=self.sides).contains(&bid.face);
        if !in_range {
            return Err(GameError::InvalidAction { quantity: bid.quantity, face: bid.face });
        }
        Ok((bid.quantity as ActionId - 1) * self.sides as ActionId + (bid.face as ActionId - 1))
    }

    pub fn encode(&self, action: Action) -> Result<ActionId> {
        match action {
            Action::Bid(bid) => self.encode_bid(bid),
            Action::Lie => Ok(self.lie_id()),
        }
    }

    pub fn decode(&self, id: ActionId) -> Result<Action> {
        let lie_id = self.lie_id();
        if id == lie_id {
            return Ok(Action::Lie);
        }
        if id > lie_id {
            return Err(GameError::DecoderRange { id, lie_id });
        }
        let sides = self.sides as ActionId;
        Ok(Action::Bid(Bid {
            quantity: (id / sides + 1) as u8,
            face: (id % sides + 1) as Face,
        }))
    }

    /// Every bid in escalation order
    pub fn bids(&self) -> impl Iterator<Item = Bid> + '_ {
        (1..=self.max_quantity).flat_map(move |quantity| (1..=self.sides).map(move |face| Bid { quantity, face }))
    }
}
