use crate::codec::Action;
use crate::error::{GameError, Result};
use crate::policy::DecisionProvider;
use crate::resolve::Outcome;
use crate::round::{Round, Step};
use crate::utils::Player;
use std::str::FromStr;

/// Where the human sits, if anywhere
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Seat {
    First,
    Second,
    /// Computer against computer
    Watch,
}

impl Seat {
    pub fn human(self) -> Option<Player> {
        match self { Seat::First => Some(Player::P1), Seat::Second => Some(Player::P2), Seat::Watch => None }
    }
}

impl FromStr for Seat {
    type Err = GameError;

    /// Answers to "Do you want to go first? [y/n/r]"
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" | "first" => Ok(Seat::First),
            "n" | "no" | "second" => Ok(Seat::Second),
            "r" | "watch" => Ok(Seat::Watch),
            other => Err(GameError::InvalidConfiguration(format!("unknown seat '{other}'"))),
        }
    }
}

/// Ask providers for moves until someone calls lie.
/// Engine errors are not retried here: a provider that returns an illegal id ends the round.
pub fn play_round(round: &mut Round, providers: [&mut dyn DecisionProvider; 2]) -> Result<Outcome> {
    play_round_with(round, providers, |_, _| {})
}

/// Same as [`play_round`], reporting every accepted move to `on_action`
pub fn play_round_with(
    round: &mut Round,
    mut providers: [&mut dyn DecisionProvider; 2],
    mut on_action: impl FnMut(Player, Action),
) -> Result<Outcome> {
    loop {
        if let Some(outcome) = round.outcome() {
            return Ok(outcome);
        }
        let player = round.state().turn();
        let id = providers[player.index()].choose_action(round.state(), round.hand(player))?;
        let action = round.state().check_id(id)?;
        let step = round.apply(action)?;
        on_action(player, action);
        if let Step::Finished(outcome) = step {
            return Ok(outcome);
        }
    }
}
