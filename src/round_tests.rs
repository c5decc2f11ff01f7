/// Tests for round transitions: escalation, challenges and the finished state

#[cfg(test)]
mod tests {
    use crate::codec::{Action, Bid};
    use crate::config::{DiceConfig, Variant};
    use crate::error::{Attempt, GameError};
    use crate::hand::{FixedRolls, Hand};
    use crate::round::{Phase, Round, RoundState, Step};
    use crate::utils::Player;

    fn config() -> DiceConfig {
        DiceConfig::new(6, 5, 5, Variant::Normal).unwrap()
    }

    fn scenario_round() -> Round {
        let hands = [
            Hand::new(vec![2, 2, 5, 1, 3], 6).unwrap(),
            Hand::new(vec![6, 6, 2, 4, 4], 6).unwrap(),
        ];
        Round::from_hands(config(), hands).unwrap()
    }

    fn bid(quantity: u8, face: u8) -> Action {
        Action::Bid(Bid::new(quantity, face))
    }

    #[test]
    fn test_initial_state() {
        let state = RoundState::new(&config());
        assert_eq!(state.current_bid(), None);
        assert_eq!(state.turn(), Player::P1);
        assert!(state.history().is_empty());
        assert_eq!(state.phase(), Phase::Active);
    }

    #[test]
    fn test_no_lie_before_first_bid() {
        let state = RoundState::new(&config());
        let legal = state.legal_actions();
        assert_eq!(legal.len(), 60);
        assert!(!legal.contains(&Action::Lie));
        assert!(!state.legal_mask()[state.codec().lie_id()]);
    }

    /// Scenario C
    #[test]
    fn test_lie_without_bid_is_illegal_challenge() {
        let mut round = scenario_round();
        let before = round.state().clone();
        assert!(matches!(round.apply(Action::Lie), Err(GameError::IllegalChallenge)));
        assert!(matches!(round.apply_id(60), Err(GameError::IllegalChallenge)));
        assert_eq!(round.state(), &before);
        assert!(round.outcome().is_none());
    }

    /// Scenario D
    #[test]
    fn test_escalation_boundary() {
        let state = RoundState::new(&config()).with_bid(Bid::new(3, 4)).unwrap();
        let codec = *state.codec();
        let current = codec.encode_bid(Bid::new(3, 4)).unwrap();

        let expected: Vec<Action> = codec.bids()
            .filter(|&b| codec.encode_bid(b).unwrap() > current)
            .map(Action::Bid)
            .chain(std::iter::once(Action::Lie))
            .collect();
        assert_eq!(state.legal_actions(), expected);

        assert!(state.check(bid(3, 5)).is_ok());
        assert!(state.check(bid(4, 1)).is_ok());
        assert!(matches!(state.check(bid(3, 4)), Err(GameError::IllegalAction { .. })));
        assert!(matches!(state.check(bid(3, 3)), Err(GameError::IllegalAction { .. })));
        assert!(matches!(state.check(bid(2, 6)), Err(GameError::IllegalAction { .. })));
    }

    #[test]
    fn test_illegal_action_reports_id_and_bid() {
        let mut round = scenario_round();
        round.apply(bid(3, 4)).unwrap();
        match round.apply(bid(3, 3)) {
            Err(GameError::IllegalAction { attempted, current }) => {
                assert_eq!(attempted, Attempt::Id(14));
                assert_eq!(current, Some(bid(3, 4)));
            }
            other => panic!("expected IllegalAction, got {:?}", other),
        }
        let err = round.apply(bid(3, 3)).unwrap_err();
        assert_eq!(err.to_string(), "illegal action 14 (current bid: 3 4s)");
    }

    #[test]
    fn test_bids_flip_turn_and_append_history() {
        let mut round = scenario_round();
        assert_eq!(round.apply(bid(1, 2)).unwrap(), Step::Continue);
        assert_eq!(round.state().turn(), Player::P2);
        assert_eq!(round.apply(bid(2, 2)).unwrap(), Step::Continue);
        assert_eq!(round.state().turn(), Player::P1);

        let state = round.state();
        assert_eq!(state.current_bid(), Some(Bid::new(2, 2)));
        assert_eq!(state.last_bidder(), Some(Player::P2));
        assert_eq!(state.history(), &[(Player::P1, bid(1, 2)), (Player::P2, bid(2, 2))]);
    }

    #[test]
    fn test_illegal_apply_does_not_mutate() {
        let mut round = scenario_round();
        round.apply(bid(4, 1)).unwrap();
        let before = round.state().clone();
        for action in [bid(4, 1), bid(1, 6), bid(11, 1), bid(3, 9), bid(0, 2)] {
            let err = round.apply(action).unwrap_err();
            assert!(matches!(err, GameError::IllegalAction { current: Some(_), .. }), "{:?}", err);
            assert_eq!(round.state(), &before);
        }
        assert!(matches!(round.apply_id(61), Err(GameError::IllegalAction { attempted: Attempt::Id(61), .. })));
        assert!(matches!(round.apply_id(9999), Err(GameError::IllegalAction { attempted: Attempt::Id(9999), .. })));
        assert_eq!(round.state(), &before);
    }

    /// Bids with no action id are still just illegal moves, on every entry point
    #[test]
    fn test_bids_outside_action_space_are_illegal() {
        let mut round = scenario_round();
        round.apply(bid(3, 4)).unwrap();
        for (quantity, face) in [(11, 1), (3, 9), (0, 2)] {
            let out_of_range = Bid::new(quantity, face);
            match round.apply(Action::Bid(out_of_range)) {
                Err(GameError::IllegalAction { attempted, current }) => {
                    assert_eq!(attempted, Attempt::Bid(out_of_range));
                    assert_eq!(current, Some(bid(3, 4)));
                }
                other => panic!("expected IllegalAction, got {:?}", other),
            }
            assert!(matches!(round.state().with_bid(out_of_range), Err(GameError::IllegalAction { .. })));
        }
        let err = round.apply(bid(11, 1)).unwrap_err();
        assert_eq!(err.to_string(), "illegal action 11 1s (current bid: 3 4s)");

        let fresh = RoundState::new(&config());
        assert!(matches!(
            fresh.check(bid(3, 7)),
            Err(GameError::IllegalAction { attempted: Attempt::Bid(_), current: None })
        ));
    }

    #[test]
    fn test_with_bid_leaves_original_alone() {
        let state = RoundState::new(&config());
        let next = state.with_bid(Bid::new(1, 1)).unwrap();
        assert!(state.history().is_empty());
        assert_eq!(next.history().len(), 1);
        assert_eq!(next.turn(), Player::P2);
    }

    #[test]
    fn test_only_lie_after_max_bid() {
        let mut round = scenario_round();
        round.apply(bid(10, 6)).unwrap();
        assert_eq!(round.state().legal_actions(), vec![Action::Lie]);
        assert_eq!(round.state().legal_ids(), vec![60]);
    }

    /// Scenario A through the engine: P2 challenges a truthful bid and loses
    #[test]
    fn test_lie_on_truthful_bid() {
        let mut round = scenario_round();
        round.apply(bid(3, 2)).unwrap();
        match round.apply(Action::Lie).unwrap() {
            Step::Finished(outcome) => {
                assert_eq!(outcome.total_matching, 3);
                assert_eq!(outcome.final_bid, Bid::new(3, 2));
                assert_eq!(outcome.loser, Player::P2);
                assert_eq!(outcome.winner(), Player::P1);
            }
            Step::Continue => panic!("lie should finish the round"),
        }
        assert!(round.state().is_finished());
        assert_eq!(round.state().history().last(), Some(&(Player::P2, Action::Lie)));
    }

    /// Scenario B through the engine: P1 challenges P2's bluff and wins
    #[test]
    fn test_lie_on_bluff() {
        let mut round = scenario_round();
        round.apply(bid(2, 5)).unwrap();
        round.apply(bid(4, 6)).unwrap();
        let outcome = match round.apply_id(60).unwrap() {
            Step::Finished(outcome) => outcome,
            Step::Continue => panic!("lie should finish the round"),
        };
        assert_eq!(outcome.total_matching, 2);
        assert_eq!(outcome.loser, Player::P2);
        assert_eq!(round.outcome(), Some(outcome));
    }

    /// Whoever sits last in the history called lie; the outcome alone says how they fared
    #[test]
    fn test_outcome_names_the_challenger() {
        for (bids, truthful) in [(vec![bid(3, 2)], true), (vec![bid(3, 2), bid(4, 6)], false), (vec![bid(4, 6)], false)] {
            let mut round = scenario_round();
            for b in bids {
                round.apply(b).unwrap();
            }
            let challenger = round.state().turn();
            let outcome = match round.apply(Action::Lie).unwrap() {
                Step::Finished(outcome) => outcome,
                Step::Continue => panic!("lie should finish the round"),
            };
            assert_eq!(round.state().history().last(), Some(&(challenger, Action::Lie)));
            assert_eq!(outcome.bid_was_truthful(), truthful);
            let expected = if truthful { outcome.loser } else { outcome.winner() };
            assert_eq!(expected, challenger);
        }
    }

    #[test]
    fn test_finished_round_rejects_everything() {
        let mut round = scenario_round();
        round.apply(bid(3, 2)).unwrap();
        round.apply(Action::Lie).unwrap();
        let frozen = round.state().clone();
        let outcome = round.outcome();

        for _ in 0..2 {
            assert!(matches!(round.apply(bid(9, 6)), Err(GameError::RoundAlreadyFinished)));
            assert!(matches!(round.apply(Action::Lie), Err(GameError::RoundAlreadyFinished)));
            assert!(matches!(round.apply_id(0), Err(GameError::RoundAlreadyFinished)));
            assert_eq!(round.state(), &frozen);
            assert_eq!(round.outcome(), outcome);
        }
        assert!(round.state().legal_actions().is_empty());
    }

    #[test]
    fn test_deal_uses_injected_rolls() {
        let config = DiceConfig::new(6, 2, 3, Variant::Normal).unwrap();
        let mut source = FixedRolls::new(vec![vec![1, 4], vec![4, 4, 6]]);
        let round = Round::deal(config, &mut source).unwrap();
        assert_eq!(round.hand(Player::P1).dice(), &[1, 4]);
        assert_eq!(round.hand(Player::P2).dice(), &[4, 4, 6]);
        assert_eq!(round.state().codec().lie_id(), 30);
    }

    #[test]
    fn test_from_hands_checks_sizes() {
        let hands = [Hand::new(vec![1, 2], 6).unwrap(), Hand::new(vec![3, 4, 5, 6, 1], 6).unwrap()];
        assert!(matches!(Round::from_hands(config(), hands), Err(GameError::InvalidConfiguration(_))));

        // faces are fine for six sides, but the round plays with four
        let small = DiceConfig::new(4, 1, 1, Variant::Normal).unwrap();
        let hands = [Hand::new(vec![2], 6).unwrap(), Hand::new(vec![1], 4).unwrap()];
        assert!(matches!(Round::from_hands(small, hands), Err(GameError::InvalidConfiguration(_))));

        let hands = [Hand::new(vec![2], 4).unwrap(), Hand::new(vec![4], 4).unwrap()];
        let round = Round::from_hands(small, hands).unwrap();
        assert_eq!(round.hand(Player::P2).face_counts(), vec![0, 0, 0, 1]);
    }
}
