//! Vertex detection and validation.
//!
//! Every line on a placed card points at one corner of that card: the corner
//! at the clockwise end of the line's edge. Cards whose lines point at the
//! same geometric corner form a vertex there. With exactly three cards the
//! vertex is complete and is matched against the interaction table.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use super::board::Board;
use super::hex::Corner;
use super::types::{EffectiveType, PlacedCard};

use EffectiveType::{Antiquark, Electron, Gluon, Higgs, Photon, Positron, Quark};

/// One allowed three-particle interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VertexRule {
    pub particles: [EffectiveType; 3],
    pub points: i32,
    pub interaction: &'static str,
}

pub static VALID_VERTICES: [VertexRule; 8] = [
    VertexRule { particles: [Quark, Quark, Gluon], points: 2, interaction: "Strong force interaction" },
    VertexRule { particles: [Electron, Electron, Photon], points: 2, interaction: "Electromagnetic interaction" },
    VertexRule { particles: [Quark, Antiquark, Photon], points: 2, interaction: "Quark-photon coupling" },
    VertexRule { particles: [Gluon, Gluon, Gluon], points: 3, interaction: "Triple gluon vertex" },
    VertexRule { particles: [Quark, Antiquark, Gluon], points: 3, interaction: "Quark-gluon interaction" },
    VertexRule { particles: [Quark, Antiquark, Higgs], points: 4, interaction: "Higgs-quark coupling" },
    VertexRule { particles: [Electron, Positron, Higgs], points: 4, interaction: "Higgs-electron coupling" },
    VertexRule { particles: [Higgs, Higgs, Higgs], points: 6, interaction: "Triple Higgs self-coupling" },
];

/// Rule table keyed by sorted particle triple, so lookup is a multiset match.
static RULES_BY_MULTISET: Lazy<HashMap<[EffectiveType; 3], &'static VertexRule>> =
    Lazy::new(|| {
        VALID_VERTICES
            .iter()
            .map(|rule| {
                let mut key = rule.particles;
                key.sort();
                (key, rule)
            })
            .collect()
    });

/// Find the interaction matching three effective types, in any order.
pub fn lookup_rule(mut particles: [EffectiveType; 3]) -> Option<&'static VertexRule> {
    particles.sort();
    RULES_BY_MULTISET.get(&particles).copied()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexStatus {
    /// Fewer than three cards reach the corner.
    Incomplete,
    /// Three cards forming an allowed interaction.
    Valid,
    /// Three cards with no matching interaction.
    Invalid,
    /// More than three cards on one corner: the board is corrupt.
    Overloaded,
}

/// A corner where card lines meet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vertex {
    pub corner: Corner,
    pub cards: Vec<PlacedCard>,
    pub status: VertexStatus,
    /// Table points when valid, -1 when invalid, 0 otherwise.
    pub points: i32,
    pub interaction: Option<&'static str>,
}

impl Vertex {
    pub fn is_complete(&self) -> bool {
        matches!(self.status, VertexStatus::Valid | VertexStatus::Invalid)
    }

    /// `None` until the vertex is complete.
    pub fn is_valid(&self) -> Option<bool> {
        match self.status {
            VertexStatus::Valid => Some(true),
            VertexStatus::Invalid => Some(false),
            VertexStatus::Incomplete | VertexStatus::Overloaded => None,
        }
    }
}

/// Group line ends by corner, in card insertion order then ascending edge.
fn group_by_corner(board: &Board) -> Vec<(Corner, Vec<&PlacedCard>)> {
    let mut groups: Vec<(Corner, Vec<&PlacedCard>)> = Vec::new();
    let mut slot: HashMap<Corner, usize> = HashMap::new();

    for placed in board.cards() {
        for edge in placed.card.lines().iter() {
            let corner = placed.position.corner(edge);
            let idx = *slot.entry(corner).or_insert_with(|| {
                groups.push((corner, Vec::with_capacity(3)));
                groups.len() - 1
            });
            groups[idx].1.push(placed);
        }
    }

    groups
}

fn classify(corner: Corner, cards: &[&PlacedCard]) -> (VertexStatus, i32, Option<&'static str>) {
    match cards {
        [a, b, c] => {
            let types = [a.effective_type(), b.effective_type(), c.effective_type()];
            match lookup_rule(types) {
                Some(rule) => (VertexStatus::Valid, rule.points, Some(rule.interaction)),
                None => (VertexStatus::Invalid, -1, None),
            }
        }
        _ if cards.len() > 3 => {
            tracing::warn!(
                corner = %corner.to_key(),
                cards = cards.len(),
                "more than three cards share a vertex; board is corrupt, vertex not scored"
            );
            (VertexStatus::Overloaded, 0, None)
        }
        _ => (VertexStatus::Incomplete, 0, None),
    }
}

/// Every corner reached by at least one line, classified.
pub fn find_all_vertices(board: &Board) -> Vec<Vertex> {
    group_by_corner(board)
        .into_iter()
        .map(|(corner, cards)| {
            let (status, points, interaction) = classify(corner, &cards);
            Vertex {
                corner,
                cards: cards.into_iter().cloned().collect(),
                status,
                points,
                interaction,
            }
        })
        .collect()
}
