//! Closed loop detection.
//!
//! A loop is a ring of six cards around one cell, each connected to the next
//! by a line, whose six inner corners are uniform: all valid vertices, all
//! invalid vertices, or no complete vertex at all.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::board::Board;
use super::hex::{Corner, Edge, Hex};
use super::vertices::{Vertex, VertexStatus};

/// How loops are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopPolicy {
    /// Line-connected six-card rings with uniform inner vertices.
    #[default]
    Ring,
    /// Fully surrounded cards divided by seven. Ignores lines and vertices.
    SurroundedApprox,
}

/// Vertex makeup of the six inner corners of a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RingInterior {
    AllValid,
    AllInvalid,
    NoVertices,
}

/// A qualifying ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramLoop {
    /// Cell enclosed by the ring; may be empty.
    pub center: Hex,
    /// Ring cells in edge order around the center.
    pub ring: [Hex; 6],
    pub interior: RingInterior,
}

/// Occupied cells plus every empty cell next to one, first-seen order.
fn candidate_centers(board: &Board) -> Vec<Hex> {
    let mut seen: HashSet<Hex> = HashSet::new();
    let mut centers = Vec::new();
    for placed in board.cards() {
        let pos = placed.position;
        for cell in std::iter::once(pos).chain(pos.neighbors()) {
            if seen.insert(cell) {
                centers.push(cell);
            }
        }
    }
    centers
}

/// Ring neighbor `i` reaches neighbor `i + 1` through its edge `i + 2`.
fn ring_is_connected(board: &Board, center: Hex) -> bool {
    Edge::ALL.iter().all(|&edge| {
        let here = center.neighbor(edge);
        let toward_next = edge.rotated(2);
        let there = here.neighbor(toward_next);
        match (board.get(here), board.get(there)) {
            (Some(a), Some(b)) => a.has_line(toward_next) && b.has_line(toward_next.opposite()),
            _ => false,
        }
    })
}

fn classify_interior(
    center: Hex,
    status_at: &HashMap<Corner, VertexStatus>,
) -> Option<RingInterior> {
    let mut valid = 0;
    let mut invalid = 0;
    for edge in Edge::ALL {
        match status_at.get(&center.corner(edge)) {
            Some(VertexStatus::Valid) => valid += 1,
            Some(VertexStatus::Invalid) => invalid += 1,
            _ => {}
        }
    }
    match (valid, invalid) {
        (6, 0) => Some(RingInterior::AllValid),
        (0, 6) => Some(RingInterior::AllInvalid),
        (0, 0) => Some(RingInterior::NoVertices),
        _ => None,
    }
}

/// All qualifying rings, given the board's vertices.
pub fn find_loops(board: &Board, vertices: &[Vertex]) -> Vec<DiagramLoop> {
    if board.len() < 6 {
        return Vec::new();
    }
    let status_at: HashMap<Corner, VertexStatus> =
        vertices.iter().map(|v| (v.corner, v.status)).collect();

    candidate_centers(board)
        .into_iter()
        .filter(|&center| center.neighbors().iter().all(|&n| board.is_occupied(n)))
        .filter(|&center| ring_is_connected(board, center))
        .filter_map(|center| {
            let interior = classify_interior(center, &status_at);
            if interior.is_none() {
                tracing::debug!(%center, "ring has mixed inner vertices, no bonus");
            }
            interior.map(|interior| DiagramLoop {
                center,
                ring: center.neighbors(),
                interior,
            })
        })
        .collect()
}

/// Fully surrounded cards, divided by seven and floored.
fn count_surrounded_approx(board: &Board) -> usize {
    let surrounded = board
        .cards()
        .iter()
        .filter(|p| p.position.neighbors().iter().all(|&n| board.is_occupied(n)))
        .count();
    surrounded / 7
}

pub fn count_loops(board: &Board, vertices: &[Vertex], policy: LoopPolicy) -> usize {
    match policy {
        LoopPolicy::Ring => find_loops(board, vertices).len(),
        LoopPolicy::SurroundedApprox => count_surrounded_approx(board),
    }
}
