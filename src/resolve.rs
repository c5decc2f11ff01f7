use crate::codec::Bid;
use crate::config::Variant;
use crate::hand::Hand;
use crate::utils::{Face, Player, WILD_FACE};
use std::fmt::{Display, Formatter};

/// Final result of a challenged round
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Outcome {
    pub loser: Player,
    pub final_bid: Bid,
    pub total_matching: usize,
}

impl Outcome {
    #[inline] pub fn winner(&self) -> Player { self.loser.other() }

    #[inline] pub fn bid_was_truthful(&self) -> bool {
        self.total_matching >= self.final_bid.quantity as usize
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.bid_was_truthful() { "valid" } else { "a bluff" };
        write!(f, "the call {} was {} ({} on the table), {} loses", self.final_bid, verdict, self.total_matching, self.loser)
    }
}

/// Dice in one hand that count toward `face`
fn hand_matches(hand: &Hand, face: Face, variant: Variant) -> usize {
    match variant {
        Variant::Normal => hand.count_face(face),
        Variant::Joker => wild_matches(hand, face),
        Variant::Stairs => {
            if hand.is_straight() { hand.len() + 1 } else { wild_matches(hand, face) }
        }
    }
}

fn wild_matches(hand: &Hand, face: Face) -> usize {
    if face == WILD_FACE { hand.count_face(face) }
    else { hand.count_face(face) + hand.count_face(WILD_FACE) }
}

/// Dice across both hands that support a bid on `face`
pub fn count_matching(hands: [&Hand; 2], face: Face, variant: Variant) -> usize {
    hands.iter().map(|h| hand_matches(h, face, variant)).sum()
}

/// Reveal both hands and decide who lost.
/// `bidder` made `bid`; the other player called lie on it.
pub fn resolve(hands: [&Hand; 2], bid: Bid, bidder: Player, variant: Variant) -> Outcome {
    let total_matching = count_matching(hands, bid.face, variant);
    let loser = if total_matching >= bid.quantity as usize { bidder.other() } else { bidder };
    Outcome { loser, final_bid: bid, total_matching }
}
