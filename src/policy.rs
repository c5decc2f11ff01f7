use crate::codec::Action;
use crate::config::Variant;
use crate::error::{GameError, Result};
use crate::hand::Hand;
use crate::round::RoundState;
use crate::utils::{ActionId, Face, Score, WILD_FACE};
use log::{debug, warn};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

// ---------- Decision providers ---------- //
/// Anything that can pick a move: a person at a terminal, a trained network, a script.
/// The returned id is validated by the round before it is applied, so a provider
/// may be wrong; it is never trusted.
pub trait DecisionProvider {
    fn choose_action(&mut self, state: &RoundState, hand: &Hand) -> Result<ActionId>;
}

impl<D: DecisionProvider + ?Sized> DecisionProvider for Box<D> {
    fn choose_action(&mut self, state: &RoundState, hand: &Hand) -> Result<ActionId> {
        (**self).choose_action(state, hand)
    }
}

/// Scores every action id for the player to move. Higher is better; negative or
/// non-finite scores are treated as zero weight.
pub trait Policy {
    fn action_scores(&mut self, state: &RoundState, hand: &Hand) -> Vec<Score>;
}

// ---------- Policy adapter ---------- //
/// Turns raw policy output into a legal action id
pub struct PolicyProvider<P: Policy, R: Rng> {
    policy: P,
    rng: R,
    greedy: bool,
}

impl<P: Policy, R: Rng> PolicyProvider<P, R> {
    /// Sample moves in proportion to their scores
    pub fn sampling(policy: P, rng: R) -> Self {
        PolicyProvider { policy, rng, greedy: false }
    }

    /// Always take the best scoring legal move (ties go to the lowest id)
    pub fn greedy(policy: P, rng: R) -> Self {
        PolicyProvider { policy, rng, greedy: true }
    }

    pub fn policy(&self) -> &P { &self.policy }
}

impl<P: Policy, R: Rng> DecisionProvider for PolicyProvider<P, R> {
    fn choose_action(&mut self, state: &RoundState, hand: &Hand) -> Result<ActionId> {
        let legal = state.legal_ids();
        let Some(&lowest) = legal.first() else {
            return Err(GameError::RoundAlreadyFinished);
        };
        let scores = self.policy.action_scores(state, hand);
        if scores.len() != state.codec().num_actions() {
            warn!("Policy returned {} scores for {} actions, playing lowest legal", scores.len(), state.codec().num_actions());
            return Ok(lowest);
        }
        let weights: Vec<Score> = legal.iter()
            .map(|&id| scores[id])
            .map(|s| if s.is_finite() && s > 0.0 { s } else { 0.0 })
            .collect();

        let choice = if self.greedy {
            argmax(&weights)
        } else {
            WeightedIndex::new(&weights).ok().map(|dist| dist.sample(&mut self.rng))
        };
        match choice {
            Some(idx) => {
                debug!("Policy picked {} with weight {:.3}", legal[idx], weights[idx]);
                Ok(legal[idx])
            }
            None => {
                warn!("Policy gave no weight to any legal action, playing lowest legal");
                Ok(lowest)
            }
        }
    }
}

/// Index of the largest positive weight, first one wins ties
fn argmax(weights: &[Score]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 { continue; }
        if best.map_or(true, |b| w > weights[b]) { best = Some(i); }
    }
    best
}

// ---------- Heuristic policy ---------- //
/// Plays from the expected dice count: the own hand is known, every unseen die
/// matches with the variant's single-die probability.
/// The variant is not part of the public state, so it is fixed at construction.
#[derive(Debug, Copy, Clone, Default)]
pub struct HeuristicPolicy {
    variant: Variant,
}

impl HeuristicPolicy {
    pub fn new(variant: Variant) -> Self {
        HeuristicPolicy { variant }
    }

    fn match_probability(&self, face: Face, sides: u8) -> f32 {
        if self.variant.has_wildcard() && face != WILD_FACE { (2.0 / sides as f32).min(1.0) }
        else { 1.0 / sides as f32 }
    }

    fn own_matches(&self, hand: &Hand, face: Face) -> usize {
        if self.variant.has_wildcard() && face != WILD_FACE { hand.count_face(face) + hand.count_face(WILD_FACE) }
        else { hand.count_face(face) }
    }

    /// Expected number of dice supporting `face` across the table
    pub fn expected_count(&self, state: &RoundState, hand: &Hand, face: Face) -> f32 {
        let unseen = (state.codec().max_quantity() as usize).saturating_sub(hand.len());
        let p = self.match_probability(face, state.codec().sides());
        self.own_matches(hand, face) as f32 + unseen as f32 * p
    }
}

impl Policy for HeuristicPolicy {
    fn action_scores(&mut self, state: &RoundState, hand: &Hand) -> Vec<Score> {
        let codec = state.codec();
        let mut scores = vec![0.0; codec.num_actions()];
        for id in state.legal_ids() {
            scores[id] = match codec.decode(id) {
                Ok(Action::Bid(bid)) => {
                    // each die claimed past expectation halves the score
                    let excess = (bid.quantity as f32 - self.expected_count(state, hand, bid.face)).max(0.0);
                    0.5f32.powf(excess)
                }
                Ok(Action::Lie) => match state.current_bid() {
                    Some(current) => {
                        let excess = current.quantity as f32 - self.expected_count(state, hand, current.face);
                        if excess > 0.0 { 1.0 + excess } else { 0.0 }
                    }
                    None => 0.0,
                },
                Err(_) => 0.0,
            };
        }
        scores
    }
}
