//! Board state and placement legality.
//!
//! Placement is split in two: `evaluate_placement` decides legality without
//! touching the board, `place_card` commits without checking legality. Callers
//! check first, then commit.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::engine::error::EngineError;

use super::hex::{Edge, Hex};
use super::types::{Card, PlacedCard};

/// Placed cards in insertion order, at most one per position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<PlacedCard>", into = "Vec<PlacedCard>")]
pub struct Board {
    cards: Vec<PlacedCard>,
    index: HashMap<(i32, i32), usize>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from placed cards, rejecting repeated or out-of-bounds positions.
    pub fn from_placed(cards: Vec<PlacedCard>) -> Result<Self, EngineError> {
        let mut board = Board {
            cards: Vec::with_capacity(cards.len()),
            index: HashMap::with_capacity(cards.len()),
        };
        for placed in cards {
            let pos = placed.position;
            if !pos.in_bounds() {
                return Err(EngineError::OutOfBounds(pos));
            }
            if board.index.contains_key(&pos.key()) {
                return Err(EngineError::DuplicatePosition(pos));
            }
            board.push(placed);
        }
        Ok(board)
    }

    fn push(&mut self, placed: PlacedCard) {
        self.index.insert(placed.position.key(), self.cards.len());
        self.cards.push(placed);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Placed cards in insertion order.
    pub fn cards(&self) -> &[PlacedCard] {
        &self.cards
    }

    #[inline]
    pub fn get(&self, pos: Hex) -> Option<&PlacedCard> {
        self.index.get(&pos.key()).map(|&i| &self.cards[i])
    }

    #[inline]
    pub fn is_occupied(&self, pos: Hex) -> bool {
        self.index.contains_key(&pos.key())
    }

    pub fn has_occupied_neighbor(&self, pos: Hex) -> bool {
        pos.neighbors().iter().any(|&n| self.is_occupied(n))
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cards == other.cards
    }
}

impl Eq for Board {}

impl TryFrom<Vec<PlacedCard>> for Board {
    type Error = EngineError;

    fn try_from(cards: Vec<PlacedCard>) -> Result<Self, Self::Error> {
        Board::from_placed(cards)
    }
}

impl From<Board> for Vec<PlacedCard> {
    fn from(board: Board) -> Self {
        board.cards
    }
}

/// Return a new board with `card` placed at `position`.
///
/// Does not check legality; call `evaluate_placement` first. An occupied
/// position is still rejected so the board never holds two cards in one cell,
/// as is a position outside `HEX_COORD_LIMIT`.
pub fn place_card(board: &Board, card: Card, position: Hex) -> Result<Board, EngineError> {
    if !position.in_bounds() {
        return Err(EngineError::OutOfBounds(position));
    }
    if board.is_occupied(position) {
        return Err(EngineError::Occupied(position));
    }
    let mut next = board.clone();
    next.push(PlacedCard::new(card, position));
    Ok(next)
}

// --- Legality ---

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum PlacementRejection {
    /// The target cell is outside `HEX_COORD_LIMIT`.
    OutOfBounds,
    /// The target cell already holds a card.
    Occupied,
    /// The board is not empty and no neighbor cell is occupied.
    NotAdjacent,
    /// One side of a shared edge has a line and the other does not.
    EdgeMismatch { edge: Edge },
    /// All shared edges are blank on both sides.
    NoConnection,
}

/// Outcome of checking a candidate placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementEvaluation {
    pub is_legal: bool,
    /// Edges where both the card and its neighbor carry a line.
    pub connected_edges: u8,
    pub rejection: Option<PlacementRejection>,
}

impl PlacementEvaluation {
    fn legal(connected_edges: u8) -> Self {
        Self {
            is_legal: true,
            connected_edges,
            rejection: None,
        }
    }

    fn rejected(rejection: PlacementRejection, connected_edges: u8) -> Self {
        Self {
            is_legal: false,
            connected_edges,
            rejection: Some(rejection),
        }
    }
}

/// Check whether `card` may be placed at `position` as currently oriented.
///
/// Rules:
/// 0. Position must be within `HEX_COORD_LIMIT`
/// 1. Position must be empty
/// 2. Position must be adjacent to a placed card (unless the board is empty)
/// 3. Every shared edge must have a line on both sides or on neither
/// 4. At least one shared edge must carry a line (unless the board is empty)
pub fn evaluate_placement(card: &Card, position: Hex, board: &Board) -> PlacementEvaluation {
    let eval = check_placement(card, position, board);
    if let Some(rejection) = eval.rejection {
        tracing::debug!(card = card.id(), %position, ?rejection, "placement rejected");
    }
    eval
}

fn check_placement(card: &Card, position: Hex, board: &Board) -> PlacementEvaluation {
    if !position.in_bounds() {
        return PlacementEvaluation::rejected(PlacementRejection::OutOfBounds, 0);
    }
    if board.is_occupied(position) {
        return PlacementEvaluation::rejected(PlacementRejection::Occupied, 0);
    }
    if board.is_empty() {
        return PlacementEvaluation::legal(0);
    }

    let mut has_neighbor = false;
    let mut connected = 0u8;

    for edge in Edge::ALL {
        let Some(neighbor) = board.get(position.neighbor(edge)) else {
            continue;
        };
        has_neighbor = true;

        let ours = card.has_line(edge);
        let theirs = neighbor.has_line(edge.opposite());
        if ours != theirs {
            return PlacementEvaluation::rejected(
                PlacementRejection::EdgeMismatch { edge },
                connected,
            );
        }
        if ours {
            connected += 1;
        }
    }

    if !has_neighbor {
        return PlacementEvaluation::rejected(PlacementRejection::NotAdjacent, 0);
    }
    if connected == 0 {
        return PlacementEvaluation::rejected(PlacementRejection::NoConnection, 0);
    }
    PlacementEvaluation::legal(connected)
}

pub fn is_legal_placement(card: &Card, position: Hex, board: &Board) -> bool {
    evaluate_placement(card, position, board).is_legal
}

/// Try all six rotations and return the legal one with the most connected
/// edges. Ties go to the smallest rotation angle. `None` if no rotation fits.
pub fn auto_orient_card_for_placement(card: &Card, position: Hex, board: &Board) -> Option<Card> {
    let mut best: Option<(u8, Card)> = None;

    for steps in 0..6u8 {
        let rotated = card.rotated_steps(steps);
        let eval = evaluate_placement(&rotated, position, board);
        if !eval.is_legal {
            continue;
        }
        let better = match &best {
            Some((connected, _)) => eval.connected_edges > *connected,
            None => true,
        };
        if better {
            best = Some((eval.connected_edges, rotated));
        }
    }

    match &best {
        Some((connected, oriented)) => tracing::debug!(
            card = card.id(),
            %position,
            rotation = oriented.rotation(),
            connected,
            "auto-oriented card"
        ),
        None => tracing::debug!(card = card.id(), %position, "no legal rotation"),
    }

    best.map(|(_, card)| card)
}
