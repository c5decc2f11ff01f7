use crate::codec::{Action, Bid};
use crate::error::{Attempt, GameError, Result};
use crate::hand::Hand;
use crate::policy::DecisionProvider;
use crate::round::RoundState;
use crate::utils::ActionId;
use log::debug;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// What a person typed, before any legality check
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Call {
    Action(Action),
    Quit,
}

/// `"24"` is two fours, `"lie"` calls a bluff, `"q"` gives up.
/// Only the two leading digits of a bid are read.
pub fn parse_call(input: &str) -> Option<Call> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("lie") {
        return Some(Call::Action(Action::Lie));
    }
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return Some(Call::Quit);
    }
    let mut digits = input.chars().map(|c| c.to_digit(10));
    match (digits.next(), digits.next()) {
        (Some(Some(n)), Some(Some(d))) if n > 0 && d > 0 => {
            Some(Call::Action(Action::Bid(Bid::new(n as u8, d as u8))))
        }
        _ => None,
    }
}

/// Console player. Keeps asking until the entry is a legal move.
pub struct HumanProvider<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanProvider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        HumanProvider { input, output }
    }
}

/// What to tell the player when their call was rejected
pub(crate) fn complaint(state: &RoundState, action: Action, err: &GameError) -> String {
    let codec = state.codec();
    match (action, err) {
        (_, GameError::IllegalChallenge) => "You cannot call a bluff before anyone has made a call.".to_string(),
        (Action::Bid(bid), GameError::IllegalAction { attempted: Attempt::Bid(_), .. }) if bid.quantity > codec.max_quantity() => {
            let max = codec.decode(codec.lie_id() - 1).map(|a| a.to_string()).unwrap_or_default();
            format!("The maximum call you can make is {max}.")
        }
        (_, GameError::IllegalAction { attempted: Attempt::Bid(_), .. }) => format!("Dice only have faces 1 to {}.", codec.sides()),
        (_, GameError::IllegalAction { current, .. }) => {
            let last = current.map(|a| a.to_string()).unwrap_or_else(|| "nothing".to_string());
            format!("Invalid call! You cannot call after {last}.")
        }
        (_, other) => other.to_string(),
    }
}

impl HumanProvider<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        HumanProvider::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> DecisionProvider for HumanProvider<R, W> {
    fn choose_action(&mut self, state: &RoundState, _hand: &Hand) -> Result<ActionId> {
        loop {
            write!(self.output, "Your move [e.g. 24 for 2 fours, or \"lie\" to call a bluff]: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(GameError::Quit);
            }
            let action = match parse_call(&line) {
                Some(Call::Quit) => return Err(GameError::Quit),
                Some(Call::Action(action)) => action,
                None => {
                    writeln!(self.output, "Could not read '{}'.", line.trim())?;
                    continue;
                }
            };
            match state.check(action) {
                Ok(id) => return Ok(id),
                Err(err) if err.is_illegal_choice() => {
                    debug!("Rejected human call {}: {}", action, err);
                    let msg = complaint(state, action, &err);
                    writeln!(self.output, "{msg}")?;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
