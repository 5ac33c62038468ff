//! Placement search over the open frontier of a board.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::Serialize;

use crate::engine::config::ScoringConfig;

use super::board::{auto_orient_card_for_placement, evaluate_placement, place_card, Board};
use super::hex::Hex;
use super::scoring::calculate_score_with;
use super::types::Card;

/// A legal (position, orientation) for one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidatePlacement {
    pub position: Hex,
    /// The card as it would be placed, rotation applied.
    pub card: Card,
    pub connected_edges: u8,
    /// Board score after placing minus the score before.
    pub score_delta: i32,
}

/// Empty cells next to an occupied one, first-seen order. `(0,0)` on an empty board.
pub fn candidate_positions(board: &Board) -> Vec<Hex> {
    if board.is_empty() {
        return vec![Hex::ORIGIN];
    }
    let mut seen: HashSet<Hex> = HashSet::new();
    let mut positions = Vec::new();
    for placed in board.cards() {
        for n in placed.position.neighbors() {
            if !board.is_occupied(n) && seen.insert(n) {
                positions.push(n);
            }
        }
    }
    positions
}

/// Every legal placement of `card`, scored with the standard constants.
pub fn legal_placements(card: &Card, board: &Board) -> Vec<CandidatePlacement> {
    legal_placements_with(card, board, &ScoringConfig::default())
}

/// Rotation steps that give distinct line layouts, smallest first. A straight
/// card has three, a three-way card two.
fn distinct_orientations(card: &Card) -> Vec<u8> {
    let mut seen = Vec::with_capacity(6);
    let mut steps = Vec::with_capacity(6);
    for step in 0..6u8 {
        let lines = card.lines().rotated(step);
        if !seen.contains(&lines) {
            seen.push(lines);
            steps.push(step);
        }
    }
    steps
}

/// Every legal placement of `card` across all positions and distinct
/// orientations. Positions are in `candidate_positions` order, rotations
/// ascending; rotations repeating an earlier line layout are skipped.
pub fn legal_placements_with(
    card: &Card,
    board: &Board,
    config: &ScoringConfig,
) -> Vec<CandidatePlacement> {
    let base = calculate_score_with(board, config).score;
    let orientations = distinct_orientations(card);
    let moves: Vec<(Hex, u8)> = candidate_positions(board)
        .into_iter()
        .flat_map(|pos| orientations.iter().map(move |&steps| (pos, steps)))
        .collect();

    let placements: Vec<CandidatePlacement> = moves
        .into_par_iter()
        .filter_map(|(position, steps)| {
            let oriented = card.rotated_steps(steps);
            let eval = evaluate_placement(&oriented, position, board);
            if !eval.is_legal {
                return None;
            }
            let next = place_card(board, oriented.clone(), position).ok()?;
            let score_delta = calculate_score_with(&next, config).score - base;
            Some(CandidatePlacement {
                position,
                card: oriented,
                connected_edges: eval.connected_edges,
                score_delta,
            })
        })
        .collect();

    tracing::debug!(card = card.id(), legal = placements.len(), "enumerated placements");
    placements
}

/// Position whose auto-oriented card connects the most edges; first wins ties.
pub fn find_best_legal_placement(card: &Card, board: &Board) -> Option<(Card, Hex)> {
    let mut best: Option<(u8, Card, Hex)> = None;

    for position in candidate_positions(board) {
        let Some(oriented) = auto_orient_card_for_placement(card, position, board) else {
            continue;
        };
        let connected = evaluate_placement(&oriented, position, board).connected_edges;
        if best.as_ref().is_none_or(|(c, _, _)| connected > *c) {
            best = Some((connected, oriented, position));
        }
    }

    best.map(|(_, card, position)| (card, position))
}
