//! # Round state machine
//!
//! A round is ACTIVE until someone calls lie, then FINISHED for good.
//! `RoundState` is the public part both players may look at; `Round` adds the two
//! private hands and is the only thing allowed to advance the state.

use crate::codec::{Action, ActionCodec, Bid};
use crate::config::DiceConfig;
use crate::error::{Attempt, GameError, Result};
use crate::hand::{Hand, RollSource};
use crate::resolve::{resolve, Outcome};
use crate::utils::{ActionId, Player};
use log::{debug, info};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Phase { Active, Finished }

// ---------- Public state ---------- //
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct RoundState {
    codec: ActionCodec,
    current_bid: Option<Bid>,
    turn: Player,
    history: Vec<(Player, Action)>,
    phase: Phase,
}

impl RoundState {
    /// Fresh round: nobody has bid and P1 opens
    pub fn new(config: &DiceConfig) -> Self {
        RoundState {
            codec: ActionCodec::new(config),
            current_bid: None,
            turn: Player::P1,
            history: vec![],
            phase: Phase::Active,
        }
    }

    #[inline] pub fn codec(&self) -> &ActionCodec { &self.codec }
    #[inline] pub fn current_bid(&self) -> Option<Bid> { self.current_bid }
    #[inline] pub fn turn(&self) -> Player { self.turn }
    #[inline] pub fn history(&self) -> &[(Player, Action)] { &self.history }
    #[inline] pub fn phase(&self) -> Phase { self.phase }
    #[inline] pub fn is_finished(&self) -> bool { self.phase == Phase::Finished }

    /// Id of the standing bid, if any
    pub fn current_bid_id(&self) -> Option<ActionId> {
        self.current_bid.and_then(|b| self.codec.encode_bid(b).ok())
    }

    /// Who made the standing bid
    pub fn last_bidder(&self) -> Option<Player> {
        self.history.iter().rev().find(|(_, a)| matches!(a, Action::Bid(_))).map(|(p, _)| *p)
    }

    /// Lowest id the next bid may use
    fn first_open_id(&self) -> ActionId {
        self.current_bid_id().map_or(0, |id| id + 1)
    }

    /// Ids the player to move may choose, ascending (lie last)
    pub fn legal_ids(&self) -> Vec<ActionId> {
        if self.is_finished() {
            return vec![];
        }
        let mut ids: Vec<ActionId> = (self.first_open_id()..self.codec.lie_id()).collect();
        if self.current_bid.is_some() {
            ids.push(self.codec.lie_id());
        }
        ids
    }

    pub fn legal_actions(&self) -> Vec<Action> {
        self.legal_ids().into_iter().filter_map(|id| self.codec.decode(id).ok()).collect()
    }

    /// One flag per action id, for masking policy output
    pub fn legal_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.codec.num_actions()];
        for id in self.legal_ids() {
            mask[id] = true;
        }
        mask
    }

    /// Validate without touching anything; returns the action's id
    pub fn check(&self, action: Action) -> Result<ActionId> {
        if self.is_finished() {
            return Err(GameError::RoundAlreadyFinished);
        }
        let current = self.current_bid.map(Action::Bid);
        match action {
            Action::Lie if self.current_bid.is_none() => Err(GameError::IllegalChallenge),
            Action::Lie => Ok(self.codec.lie_id()),
            Action::Bid(bid) => match self.codec.encode_bid(bid) {
                Ok(id) if id >= self.first_open_id() => Ok(id),
                Ok(id) => Err(GameError::IllegalAction { attempted: Attempt::Id(id), current }),
                Err(_) => Err(GameError::IllegalAction { attempted: Attempt::Bid(bid), current }),
            },
        }
    }

    /// Decode a raw id and validate it. Out-of-range ids are reported as illegal actions.
    pub fn check_id(&self, id: ActionId) -> Result<Action> {
        if self.is_finished() {
            return Err(GameError::RoundAlreadyFinished);
        }
        let action = self.codec.decode(id).map_err(|_| GameError::IllegalAction {
            attempted: Attempt::Id(id),
            current: self.current_bid.map(Action::Bid),
        })?;
        self.check(action)?;
        Ok(action)
    }

    /// Copy of the state after `bid` is placed
    pub fn with_bid(&self, bid: Bid) -> Result<RoundState> {
        self.check(Action::Bid(bid))?;
        let mut next = self.clone();
        next.history.push((self.turn, Action::Bid(bid)));
        next.current_bid = Some(bid);
        next.turn = self.turn.other();
        Ok(next)
    }

    fn record_lie(&mut self) {
        self.history.push((self.turn, Action::Lie));
        self.phase = Phase::Finished;
    }
}

// ---------- Engine ---------- //
/// What happened after an action was applied
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Step {
    /// A bid was placed; the other player is on turn
    Continue,
    /// Lie was called and the hands were revealed
    Finished(Outcome),
}

#[derive(Debug, Clone)]
pub struct Round {
    config: DiceConfig,
    hands: [Hand; 2],
    state: RoundState,
    outcome: Option<Outcome>,
}

impl Round {
    /// Roll both hands from `source` and open the round
    pub fn deal(config: DiceConfig, source: &mut impl RollSource) -> Result<Self> {
        let p1 = Hand::roll(&config, Player::P1, source)?;
        let p2 = Hand::roll(&config, Player::P2, source)?;
        Self::from_hands(config, [p1, p2])
    }

    /// Open a round on known hands; they must match the configuration
    pub fn from_hands(config: DiceConfig, hands: [Hand; 2]) -> Result<Self> {
        for player in [Player::P1, Player::P2] {
            let hand = &hands[player.index()];
            if hand.len() != config.dice_for(player) as usize {
                return Err(GameError::InvalidConfiguration(format!(
                    "{} holds {} dice, expected {}", player, hand.len(), config.dice_for(player)
                )));
            }
            if hand.sides() != config.sides() {
                return Err(GameError::InvalidConfiguration(format!(
                    "{} rolled {}-sided dice, the round uses {}", player, hand.sides(), config.sides()
                )));
            }
        }
        info!(
            "New round: {} sides, {}v{} dice, {} variant",
            config.sides(), hands[0].len(), hands[1].len(), config.variant()
        );
        Ok(Round { state: RoundState::new(&config), config, hands, outcome: None })
    }

    #[inline] pub fn config(&self) -> &DiceConfig { &self.config }
    #[inline] pub fn state(&self) -> &RoundState { &self.state }
    #[inline] pub fn hand(&self, player: Player) -> &Hand { &self.hands[player.index()] }
    #[inline] pub fn outcome(&self) -> Option<Outcome> { self.outcome }

    /// Apply the move of whoever is on turn. Illegal moves leave the round untouched.
    pub fn apply(&mut self, action: Action) -> Result<Step> {
        let id = self.state.check(action)?;
        let player = self.state.turn();
        debug!("{} plays {} (id {})", player, action, id);
        match action {
            Action::Bid(bid) => {
                self.state = self.state.with_bid(bid)?;
                Ok(Step::Continue)
            }
            Action::Lie => {
                // check() guarantees a standing bid
                let (bid, bidder) = match (self.state.current_bid(), self.state.last_bidder()) {
                    (Some(bid), Some(bidder)) => (bid, bidder),
                    _ => return Err(GameError::IllegalChallenge),
                };
                let outcome = resolve([&self.hands[0], &self.hands[1]], bid, bidder, self.config.variant());
                self.state.record_lie();
                self.outcome = Some(outcome);
                info!("{} called lie: {}", player, outcome);
                Ok(Step::Finished(outcome))
            }
        }
    }

    /// Apply a raw action id, as produced by a decision provider
    pub fn apply_id(&mut self, id: ActionId) -> Result<Step> {
        let action = self.state.check_id(id)?;
        self.apply(action)
    }
}
