use crate::error::{GameError, Result};
use crate::utils::{Player, DEFAULT_DICE_PER_PLAYER, DEFAULT_SIDES};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How dice are counted when a bid is challenged.
/// Variants never change which bids are legal, only the resolution tally.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Variant {
    #[default]
    Normal,
    /// Ones are wild
    Joker,
    /// Ones are wild and a straight `1..=n` counts as `n + 1` of anything
    Stairs,
}

impl Variant {
    pub fn has_wildcard(self) -> bool {
        !matches!(self, Variant::Normal)
    }
}

impl FromStr for Variant {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Variant::Normal),
            "joker" => Ok(Variant::Joker),
            "stairs" => Ok(Variant::Stairs),
            other => Err(GameError::InvalidConfiguration(format!("unknown variant '{other}'"))),
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self { Variant::Normal => "normal", Variant::Joker => "joker", Variant::Stairs => "stairs" };
        f.write_str(name)
    }
}

/// Static parameters of one round
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DiceConfig {
    sides: u8,
    dice: [u8; 2],
    variant: Variant,
}

impl DiceConfig {
    pub fn new(sides: u8, dice_p1: u8, dice_p2: u8, variant: Variant) -> Result<Self> {
        if sides == 0 {
            return Err(GameError::InvalidConfiguration("dice need at least one side".into()));
        }
        if dice_p1 == 0 || dice_p2 == 0 {
            return Err(GameError::InvalidConfiguration(format!(
                "both players need at least one die (got {dice_p1} and {dice_p2})"
            )));
        }
        // total dice must fit in a u8 quantity
        if dice_p1.checked_add(dice_p2).is_none() {
            return Err(GameError::InvalidConfiguration("too many dice in play".into()));
        }
        Ok(DiceConfig { sides, dice: [dice_p1, dice_p2], variant })
    }

    #[inline] pub fn sides(&self) -> u8 { self.sides }
    #[inline] pub fn variant(&self) -> Variant { self.variant }
    #[inline] pub fn dice_for(&self, player: Player) -> u8 { self.dice[player.index()] }

    /// Largest quantity anyone could truthfully claim
    #[inline] pub fn max_quantity(&self) -> u8 {
        self.dice[0] + self.dice[1]
    }
}

impl Default for DiceConfig {
    fn default() -> Self {
        DiceConfig {
            sides: DEFAULT_SIDES,
            dice: [DEFAULT_DICE_PER_PLAYER, DEFAULT_DICE_PER_PLAYER],
            variant: Variant::Normal,
        }
    }
}
