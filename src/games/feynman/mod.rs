//! Feynman diagram card game: hex board, cards, placement rules, vertex and
//! loop detection, scoring.

pub mod board;
pub mod cards;
pub mod hex;
pub mod loops;
pub mod placement;
pub mod scoring;
pub mod types;
pub mod vertices;

pub use board::{
    auto_orient_card_for_placement, evaluate_placement, is_legal_placement, place_card, Board,
    PlacementEvaluation, PlacementRejection,
};
pub use hex::{Corner, Edge, EdgeSet, Hex};
pub use loops::{count_loops, find_loops, DiagramLoop, LoopPolicy};
pub use placement::{candidate_positions, find_best_legal_placement, legal_placements, CandidatePlacement};
pub use scoring::{calculate_score, calculate_score_with, ScoreBreakdown};
pub use types::{ArrowDirection, Card, EffectiveType, ParticleType, PlacedCard};
pub use vertices::{find_all_vertices, Vertex, VertexStatus};
