use landlord_core::game::protocol::{GameEvent, Request, Response};
use landlord_core::game::rejection::Rejection;
use landlord_core::game::round::RoundPhase;
use landlord_core::game::validator::TurnValidator;
use landlord_core::model::beat::can_beat;
use landlord_core::model::card::{CardId, parse_cards};
use landlord_core::model::combination::{Combination, CombinationKind, classify};
use landlord_core::model::deck::Deck;
use landlord_core::model::hand::Hand;
use landlord_core::model::player::PlayerPosition;
use landlord_core::strategy::{legal_candidates, potential_combinations, recommend};

fn combo(codes: &str) -> Combination {
    classify(&parse_cards(codes).unwrap())
}

fn ids(codes: &str) -> Vec<CardId> {
    parse_cards(codes)
        .unwrap()
        .into_iter()
        .map(|card| card.id)
        .collect()
}

fn hand(codes: &str) -> Hand {
    Hand::with_cards(parse_cards(codes).unwrap())
}

#[test]
fn documented_shapes_classify_as_expected() {
    let straight = combo("3S 4S 5H 6D 7C");
    assert_eq!(straight.kind(), CombinationKind::Straight);
    assert_eq!(straight.power(), 7);

    assert_eq!(combo("2S 3S 4H 5D 6C").kind(), CombinationKind::Invalid);

    let full = combo("3S 3H 3D 4S 4H");
    assert_eq!(full.kind(), CombinationKind::TripleWithPair);
    assert_eq!(full.power(), 3);

    assert!(can_beat(&combo("7S 7H"), &combo("5S 5H")));
    assert!(!can_beat(&combo("7S 7H"), &combo("7C 7D 7H")));
}

#[test]
fn classification_is_deterministic_across_orderings() {
    let mut cards = parse_cards("8S 8H 8D 9S 9H 9D 3C 4C").unwrap();
    let forward = classify(&cards);
    cards.reverse();
    assert_eq!(classify(&cards), forward);
    assert_eq!(forward.kind(), CombinationKind::PlaneWithSingles);
}

#[test]
fn variable_length_comparison_needs_equal_length_and_higher_power() {
    let runs = ["3S 4S 5H 6D 7C", "4H 5S 6H 7D 8C", "4H 5S 6H 7D 8C 9C"];
    let combos: Vec<_> = runs.iter().map(|codes| combo(codes)).collect();
    for a in &combos {
        for b in &combos {
            let expected = a.len() == b.len() && a.power() > b.power();
            assert_eq!(can_beat(a, b), expected, "{a} vs {b}");
        }
    }
}

#[test]
fn rocket_dominates_every_combination_in_a_hand() {
    let rocket = combo("SJ BJ");
    let deal = Deck::shuffled_with_seed(77).deal();
    for combination in potential_combinations(deal.hand(PlayerPosition::East).cards()) {
        if combination.kind() == CombinationKind::Rocket {
            continue;
        }
        assert!(can_beat(&rocket, &combination), "{combination}");
        assert!(!can_beat(&combination, &rocket), "{combination}");
    }
}

#[test]
fn trick_clears_after_two_passes_and_owner_leads_freely() {
    let mut validator = TurnValidator::in_play(
        [
            hand("KS KH 3D 4D"),
            hand("5S 5H 9C"),
            hand("6S 6H 10C"),
        ],
        PlayerPosition::East,
        1,
    );
    validator
        .play_cards(PlayerPosition::East, &ids("5S 5H"))
        .unwrap();
    validator
        .play_cards(PlayerPosition::West, &ids("6S 6H"))
        .unwrap();
    validator
        .play_cards(PlayerPosition::South, &ids("KS KH"))
        .unwrap();
    validator.pass_turn(PlayerPosition::East).unwrap();
    let events = validator.pass_turn(PlayerPosition::West).unwrap();

    assert!(events.contains(&GameEvent::TrickCleared {
        leader: PlayerPosition::South
    }));
    assert!(validator.round().last_play().is_none());
    assert!(validator.round().last_play_owner().is_none());
    assert_eq!(validator.round().pass_count(), 0);
    assert_eq!(validator.current_player(), PlayerPosition::South);

    validator
        .play_cards(PlayerPosition::South, &ids("3D"))
        .unwrap();
}

#[test]
fn rejections_leave_state_untouched() {
    let mut validator = TurnValidator::in_play(
        [hand("3S 4S 5H 6D 7C 8C"), hand("9S 9H"), hand("JD QD")],
        PlayerPosition::South,
        1,
    );
    let before_round = validator.round().clone();
    let before_hands = validator.hands().clone();

    let attempts = [
        Request::PlayCards {
            player: PlayerPosition::East,
            cards: ids("9S"),
        },
        Request::PlayCards {
            player: PlayerPosition::South,
            cards: ids("3S 5H"),
        },
        Request::PlayCards {
            player: PlayerPosition::South,
            cards: ids("9S"),
        },
        Request::PassTurn {
            player: PlayerPosition::South,
        },
        Request::Bid {
            player: PlayerPosition::South,
            amount: 1,
        },
    ];
    for request in attempts {
        let response = validator.handle(request.clone());
        assert!(
            matches!(response, Response::Rejected(_)),
            "{request:?} was accepted"
        );
    }

    assert_eq!(validator.round(), &before_round);
    assert_eq!(validator.hands(), &before_hands);
    assert!(validator.history().is_empty());
}

#[test]
fn full_bid_and_play_flow_through_requests() {
    let deal = Deck::shuffled_with_seed(2718).deal();
    let mut validator = TurnValidator::new(deal, PlayerPosition::South);

    let response = validator.handle(Request::Bid {
        player: PlayerPosition::South,
        amount: 3,
    });
    let Response::Accepted(events) = response else {
        panic!("max bid should be accepted");
    };
    assert!(events.iter().any(|event| matches!(
        event,
        GameEvent::LandlordChosen {
            landlord: PlayerPosition::South,
            bid: 3,
            ..
        }
    )));
    assert_eq!(validator.phase(), RoundPhase::Playing);

    assert_eq!(
        validator.bid(PlayerPosition::East, 0),
        Err(Rejection::WrongPhase {
            request: "bid",
            phase: "playing"
        })
    );

    let mut steps = 0;
    while !validator.is_finished() {
        steps += 1;
        assert!(steps < 500, "game did not finish");
        let seat = validator.current_player();
        let hint = validator.hint(seat);
        let request = match hint.combination {
            Some(combination) => Request::PlayCards {
                player: seat,
                cards: combination.card_ids(),
            },
            None => Request::PassTurn { player: seat },
        };
        let response = validator.handle(request);
        let events = match response {
            Response::Accepted(events) => events,
            other => panic!("hinted move rejected: {other:?}"),
        };
        assert!(matches!(
            events.last(),
            Some(GameEvent::StateChanged { .. })
        ));
    }

    let settlement = validator.settlement().copied().unwrap();
    let total: i64 = PlayerPosition::LOOP
        .iter()
        .map(|seat| settlement.delta(*seat))
        .sum();
    assert_eq!(total, 0);
}

#[test]
fn recommendation_stays_within_hand_and_is_repeatable() {
    for seed in [1u64, 2, 3, 4, 5] {
        let deal = Deck::shuffled_with_seed(seed).deal();
        let hand = deal.hand(PlayerPosition::West);
        let reference = combo("5S 5H");
        let legal = legal_candidates(hand.cards(), Some(&reference));
        let first = recommend(hand, &legal, hand.len(), false);
        let second = recommend(hand, &legal, hand.len(), false);
        assert_eq!(first, second);
        if let Some(pick) = first {
            assert!(pick.combination.is_valid());
            assert!(hand.holds_all(pick.combination.cards()));
            assert!(can_beat(&pick.combination, &reference));
        } else {
            assert!(legal.is_empty());
        }
    }
}
