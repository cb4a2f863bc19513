use crate::card::{Card, Rank, Suit};
use crate::error::GameError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

pub const DECK_SIZE: usize = 54;
pub const HAND_SIZE: usize = 17;
pub const LANDLORD_PILE_SIZE: usize = 3;

pub fn standard_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL.iter() {
        for rank in Rank::SUITED.iter() {
            deck.push(Card::new(*rank, *suit));
        }
    }
    deck.push(Card::BLACK_JOKER);
    deck.push(Card::RED_JOKER);
    deck
}

pub fn shuffled_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck = standard_deck();
    deck.shuffle(rng);
    deck
}

/// Checks that `deck` is a permutation of the 54-card pack.
pub fn validate_deck(deck: &[Card]) -> Result<(), GameError> {
    if deck.len() != DECK_SIZE {
        return Err(GameError::InvalidDeck);
    }
    let seen: HashSet<Card> = deck.iter().copied().collect();
    if seen.len() != DECK_SIZE || standard_deck().iter().any(|card| !seen.contains(card)) {
        return Err(GameError::InvalidDeck);
    }
    Ok(())
}

/// Deals round-robin in seat order; the last three cards form the landlord
/// pile.
pub fn deal(mut deck: Vec<Card>) -> Result<([Vec<Card>; 3], Vec<Card>), GameError> {
    validate_deck(&deck)?;
    let mut hands = [
        Vec::with_capacity(HAND_SIZE + LANDLORD_PILE_SIZE),
        Vec::with_capacity(HAND_SIZE + LANDLORD_PILE_SIZE),
        Vec::with_capacity(HAND_SIZE + LANDLORD_PILE_SIZE),
    ];
    let dealt = HAND_SIZE * 3;
    for (i, card) in deck.iter().take(dealt).enumerate() {
        hands[i % 3].push(*card);
    }
    let pile = deck.split_off(dealt);
    Ok((hands, pile))
}
