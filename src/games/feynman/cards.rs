//! Deck construction: card counts, line configurations, shuffle and deal sizes.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::engine::config::DeckConfig;
use crate::engine::error::EngineError;

use super::hex::EdgeSet;
use super::types::{ArrowDirection, Card, ParticleType};

/// Line layouts dealt cyclically within each particle type.
pub const LINE_CONFIGS: [&[u8]; 9] = [
    &[0, 3],    // straight
    &[1, 4],    // straight
    &[2, 5],    // straight
    &[0, 2, 4], // three-way
    &[1, 3, 5], // three-way
    &[0, 1, 3], // curved
    &[1, 2, 4], // curved
    &[2, 3, 5], // curved
    &[0, 4, 5], // curved
];

/// How cards reach the players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealMode {
    /// Each player is dealt a full hand up front.
    FullHands,
    /// A few cards are revealed in the centre each round and drafted.
    CenterRounds,
}

/// Cards per player (full hands) or cards revealed per round (center rounds).
pub fn cards_per_player(player_count: usize, mode: DealMode) -> Result<usize, EngineError> {
    let count = match (mode, player_count) {
        (DealMode::FullHands, 2) => 9,
        (DealMode::FullHands, 3) => 6,
        (DealMode::FullHands, 4) => 4,
        (DealMode::CenterRounds, 2) => 3,
        (DealMode::CenterRounds, 3) => 4,
        (DealMode::CenterRounds, 4) => 5,
        _ => return Err(EngineError::UnsupportedPlayerCount(player_count)),
    };
    Ok(count)
}

/// Number of rounds in the center-rounds variant.
pub fn rounds_for(player_count: usize) -> Result<usize, EngineError> {
    match player_count {
        2 => Ok(14),
        3 => Ok(9),
        4 => Ok(8),
        _ => Err(EngineError::UnsupportedPlayerCount(player_count)),
    }
}

/// Build the unshuffled card list: per-type counts, cyclic line layouts,
/// random arrow for charged types.
pub fn build_cards<R: Rng + ?Sized>(config: &DeckConfig, rng: &mut R) -> Vec<Card> {
    let mut cards = Vec::with_capacity(config.total());
    for particle in ParticleType::ALL {
        for i in 0..config.count(particle) {
            let layout = LINE_CONFIGS[i % LINE_CONFIGS.len()];
            let lines = EdgeSet::from_indices(layout).expect("line layouts use edges 0..=5");
            let arrow = particle.is_charged().then(|| {
                if rng.gen_bool(0.5) {
                    ArrowDirection::In
                } else {
                    ArrowDirection::Out
                }
            });
            let card = Card::new(format!("{particle}-{}", i + 1), particle, lines, arrow)
                .expect("arrow is only assigned to charged types");
            cards.push(card);
        }
    }
    cards
}

/// Fisher–Yates: from the last index down to 1, swap with a uniform index in [0, i].
pub fn shuffle_deck<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    deck.shuffle(rng);
}

/// Build and shuffle a deck.
pub fn build_deck<R: Rng + ?Sized>(config: &DeckConfig, rng: &mut R) -> Vec<Card> {
    let mut deck = build_cards(config, rng);
    shuffle_deck(&mut deck, rng);
    tracing::debug!(cards = deck.len(), "built deck");
    deck
}

/// Reproducible deck from a seed.
pub fn build_seeded_deck(config: &DeckConfig, seed: u64) -> Vec<Card> {
    let mut rng = StdRng::seed_from_u64(seed);
    build_deck(config, &mut rng)
}
