use game_core::{
    beats, classify, standard_deck, BiddingOutcome, Card, FirstBidder, GameError, GameState,
    GreedyBot, Hand, PatternKind, Phase, RulesConfig, Side, Strategy, Wings,
};
use std::collections::HashSet;

fn cards(codes: &str) -> Vec<Card> {
    codes
        .split_whitespace()
        .map(|code| Card::from_code(code).unwrap())
        .collect()
}

fn fixed_rules(seat: usize) -> RulesConfig {
    RulesConfig {
        first_bidder: FirstBidder::Seat(seat),
        ..RulesConfig::default()
    }
}

/// Deck whose first 51 cards deal `hands` round-robin; the rest is the pile.
fn stacked_deck(hands: [&str; 3]) -> Vec<Card> {
    let hands: Vec<Vec<Card>> = hands.iter().map(|codes| cards(codes)).collect();
    let mut deck = Vec::new();
    for i in 0..17 {
        for hand in hands.iter() {
            deck.push(hand[i]);
        }
    }
    let used: HashSet<Card> = deck.iter().copied().collect();
    deck.extend(standard_deck().into_iter().filter(|card| !used.contains(card)));
    deck
}

fn assert_pack_partitioned(state: &GameState) {
    let mut all: Vec<Card> = state
        .players
        .iter()
        .flat_map(|player| player.hand.cards().iter().copied())
        .collect();
    all.extend(state.landlord_pile.iter().copied());
    all.extend(state.played.iter().copied());
    assert_eq!(all.len(), 54);
    let unique: HashSet<Card> = all.into_iter().collect();
    assert_eq!(unique.len(), 54);
}

#[test]
fn triplet_with_single_then_mismatched_triplet_with_pair() {
    let deck = stacked_deck([
        "S3 H3 D3 C4 C9 C10 CJ CQ CK CA C2 D9 D10 DJ DQ DK DA",
        "S5 H5 D5 C6 S6 H9 H10 HJ HQ HK HA H2 S9 S10 SJ SQ SK",
        "C3 C5 D4 H4 S4 D6 H6 C7 D7 H7 S7 C8 D8 H8 S8 SA D2",
    ]);
    let mut state = GameState::new([1, 2, 3], fixed_rules(0), 1);
    state.start_with_deck(deck).unwrap();
    state.apply_bid(0, true).unwrap();

    let opening = state.apply_play(0, &cards("S3 H3 D3 C4")).unwrap();
    assert_eq!(opening.pattern.kind, PatternKind::TripletSingle);
    assert_eq!(opening.pattern.primary, 3);

    let before = state.players[1].hand.clone();
    let result = state.apply_play(1, &cards("S5 H5 D5 C6 S6"));
    assert_eq!(result, Err(GameError::IllegalMove));
    assert_eq!(state.players[1].hand, before);
    assert_eq!(state.turn, 1);
    assert_eq!(state.last_player, Some(0));
}

#[test]
fn straight_with_a_two_is_rejected() {
    assert_eq!(classify(&cards("S3 H4 D5 C6 S7")).map(|p| p.kind), Some(PatternKind::Straight));
    assert!(classify(&cards("S3 H4 D5 C6 S2")).is_none());
}

#[test]
fn rocket_beats_king_bomb() {
    let rocket = classify(&cards("BJ RJ")).unwrap();
    assert_eq!(rocket.kind, PatternKind::Rocket);
    let bomb = classify(&cards("CK DK HK SK")).unwrap();
    assert!(beats(&rocket, Some(&bomb)));
}

#[test]
fn airplane_with_single_wings() {
    let airplane = classify(&cards("S7 H7 D7 S8 H8 D8 S9 H9 D9 S2 C3 C4")).unwrap();
    assert_eq!(airplane.kind, PatternKind::Airplane(Wings::Singles));
    assert_eq!(airplane.primary, 7);
    assert_eq!(airplane.length, 12);
}

#[test]
fn passes_rotate_and_clear() {
    let mut state = GameState::new([1, 2, 3], fixed_rules(1), 8);
    state.start().unwrap();
    state.apply_bid(1, false).unwrap();
    state.apply_bid(2, true).unwrap();
    assert_eq!(state.landlord, Some(2));

    let open = state.players[2].hand.cards()[0];
    state.apply_play(2, &[open]).unwrap();
    assert_eq!(state.apply_pass(2), Err(GameError::NotYourTurn));
    state.apply_pass(0).unwrap();
    let cleared = state.apply_pass(1).unwrap();
    assert!(cleared.table_cleared);
    assert_eq!(cleared.next_turn, 2);
    assert!(state.last_pattern.is_none());

    // the landlord may open with any shape again
    let hand = state.players[2].hand.clone();
    let any = GreedyBot::default().choose_play(&hand, None).unwrap();
    assert!(state.apply_play(2, &any).is_ok());
}

#[test]
fn rejections_leave_state_untouched() {
    let mut state = GameState::new([1, 2, 3], fixed_rules(0), 21);
    state.start().unwrap();
    state.apply_bid(0, true).unwrap();
    let snapshot = state.view_for(0).unwrap();
    let foreign = state.players[1].hand.cards()[0];
    assert_eq!(state.apply_play(0, &[foreign]), Err(GameError::CardsNotOwned));
    assert_eq!(state.apply_play(0, &[]), Err(GameError::InvalidPattern));
    assert_eq!(state.apply_pass(2), Err(GameError::NotYourTurn));
    assert_eq!(state.view_for(0).unwrap(), snapshot);
    assert_pack_partitioned(&state);
}

#[test]
fn redeal_keeps_the_pack_whole() {
    let mut state = GameState::new([1, 2, 3], fixed_rules(0), 2);
    state.start().unwrap();
    state.apply_bid(0, false).unwrap();
    state.apply_bid(1, false).unwrap();
    assert_eq!(
        state.apply_bid(2, false),
        Ok(BiddingOutcome::Redeal { first_bidder: 0 })
    );
    assert_pack_partitioned(&state);
}

fn play_out(seed: u64) -> GameState {
    let bot = GreedyBot { call_threshold: 0 };
    let mut state = GameState::new([1, 2, 3], RulesConfig::default(), seed);
    state.start().unwrap();
    let bidder = state.turn;
    state.apply_bid(bidder, bot.choose_bid(&state.players[bidder].hand)).unwrap();
    assert_eq!(state.phase, Phase::Playing);
    assert_pack_partitioned(&state);

    for _step in 0..500 {
        if state.phase == Phase::GameOver {
            return state;
        }
        let seat = state.turn;
        let hand: Hand = state.players[seat].hand.clone();
        match bot.choose_play(&hand, state.last_pattern.as_ref()) {
            Some(selection) => {
                state.apply_play(seat, &selection).unwrap();
            }
            None => {
                state.apply_pass(seat).unwrap();
            }
        }
        assert_pack_partitioned(&state);
    }
    panic!("game with seed {seed} did not finish");
}

#[test]
fn greedy_self_play_reaches_game_over() {
    for seed in 0..10 {
        let state = play_out(seed);
        let winner = state.winner.unwrap();
        assert!(state.players[winner.seat].hand.is_empty());
        assert_eq!(state.turn, winner.seat);
        let expected = if state.landlord == Some(winner.seat) {
            Side::Landlord
        } else {
            Side::Farmers
        };
        assert_eq!(winner.side, expected);
        assert_eq!(
            state.players.iter().filter(|p| p.hand.is_empty()).count(),
            1
        );
    }
}
