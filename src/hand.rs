use crate::config::DiceConfig;
use crate::error::{GameError, Result};
use crate::utils::{Face, Player};
use rand::Rng;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};

// ---------- Roll sources ---------- //
/// Where a round's dice come from. Owned by whoever sets up the round, never by a hand.
pub trait RollSource {
    /// `count` values, each in `1..=sides`
    fn roll_dice(&mut self, count: u8, sides: u8) -> Vec<Face>;
}

/// Fair dice from any rng (seed it for reproducible games)
pub struct RandomRolls<R: Rng>(pub R);

impl<R: Rng> RollSource for RandomRolls<R> {
    fn roll_dice(&mut self, count: u8, sides: u8) -> Vec<Face> {
        (0..count).map(|_| self.0.random_range(1..=sides)).collect()
    }
}

/// Replays pre-recorded hands in order; once exhausted every die shows the top face
#[derive(Debug, Clone, Default)]
pub struct FixedRolls {
    queue: VecDeque<Vec<Face>>,
}

impl FixedRolls {
    pub fn new(hands: impl IntoIterator<Item = Vec<Face>>) -> Self {
        FixedRolls { queue: hands.into_iter().collect() }
    }
}

impl RollSource for FixedRolls {
    fn roll_dice(&mut self, count: u8, sides: u8) -> Vec<Face> {
        let mut dice = self.queue.pop_front().unwrap_or_default();
        dice.resize(count as usize, sides);
        dice
    }
}

// ---------- Private hand ---------- //
/// A player's hidden dice. Only the owner sees the faces; the resolver only needs counts.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Hand {
    dice: Vec<Face>,
    sides: u8,
}

impl Hand {
    /// Rejects faces outside `1..=sides`
    pub fn new(dice: Vec<Face>, sides: u8) -> Result<Self> {
        if let Some(bad) = dice.iter().find(|&&d| d == 0 || d > sides) {
            return Err(GameError::InvalidConfiguration(format!("die face {bad} is outside 1..={sides}")));
        }
        Ok(Hand { dice, sides })
    }

    pub fn roll(config: &DiceConfig, player: Player, source: &mut impl RollSource) -> Result<Self> {
        let count = config.dice_for(player);
        let dice = source.roll_dice(count, config.sides());
        if dice.len() != count as usize {
            return Err(GameError::InvalidConfiguration(format!(
                "roll source produced {} dice, expected {count}", dice.len()
            )));
        }
        Hand::new(dice, config.sides())
    }

    #[inline] pub fn dice(&self) -> &[Face] { &self.dice }
    #[inline] pub fn sides(&self) -> u8 { self.sides }
    #[inline] pub fn len(&self) -> usize { self.dice.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.dice.is_empty() }

    pub fn count_face(&self, face: Face) -> usize {
        self.dice.iter().filter(|&&d| d == face).count()
    }

    /// How many dice show each face, index 0 is face 1
    pub fn face_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.sides as usize];
        for &d in &self.dice {
            counts[(d - 1) as usize] += 1;
        }
        counts
    }

    /// True when the hand is exactly `1, 2, ..., n` in some order
    pub fn is_straight(&self) -> bool {
        let mut sorted = self.dice.clone();
        sorted.sort_unstable();
        sorted.iter().enumerate().all(|(i, &d)| d as usize == i + 1)
    }
}

impl Display for Hand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.dice.iter().map(|d| d.to_string()).collect();
        write!(f, "({})", faces.join(", "))
    }
}
