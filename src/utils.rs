use std::fmt::{Display, Formatter};

// ---------- Tune-ables ---------- //
pub const DEFAULT_SIDES: u8 = 6;  // Faces on every die
pub const DEFAULT_DICE_PER_PLAYER: u8 = 5;  // Dice each player rolls at round start
pub const WILD_FACE: u8 = 1;  // Face counted toward every bid in the wildcard variants

// ---------- Basic types (renamed for pretty) ---------- //
pub type ActionId = usize;
pub type Face = u8;
pub type Score = f32;

/// Liar's dice is played heads-up here: the opener is always P1
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Player { P1, P2 }

impl Player {
    #[inline] pub fn other(self) -> Player {
        match self { Player::P1 => Player::P2, Player::P2 => Player::P1 }
    }
    #[inline] pub fn index(self) -> usize {
        match self { Player::P1 => 0, Player::P2 => 1 }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self { Player::P1 => write!(f, "P1"), Player::P2 => write!(f, "P2") }
    }
}
