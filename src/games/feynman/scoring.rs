//! Board scoring: vertex points, invalid vertex penalties and loop bonuses.

use serde::Serialize;

use crate::engine::config::ScoringConfig;

use super::board::Board;
use super::loops::count_loops;
use super::vertices::{find_all_vertices, Vertex, VertexStatus};

/// Score and the counts it was built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub score: i32,
    pub valid_vertices: usize,
    pub invalid_vertices: usize,
    pub loops: usize,
    /// Sum of table points over valid vertices.
    pub vertex_points: i32,
    /// Corners reached by more than three cards. Never scored.
    pub overloaded_vertices: usize,
}

/// Score with the standard constants.
pub fn calculate_score(board: &Board) -> ScoreBreakdown {
    calculate_score_with(board, &ScoringConfig::default())
}

pub fn calculate_score_with(board: &Board, config: &ScoringConfig) -> ScoreBreakdown {
    let vertices = find_all_vertices(board);
    score_vertices(board, &vertices, config)
}

/// Score a board whose vertices are already known.
pub fn score_vertices(board: &Board, vertices: &[Vertex], config: &ScoringConfig) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();

    for vertex in vertices {
        match vertex.status {
            VertexStatus::Valid => {
                breakdown.valid_vertices += 1;
                breakdown.vertex_points += vertex.points;
            }
            VertexStatus::Invalid => breakdown.invalid_vertices += 1,
            VertexStatus::Overloaded => breakdown.overloaded_vertices += 1,
            VertexStatus::Incomplete => {}
        }
    }

    breakdown.loops = count_loops(board, vertices, config.loop_policy);

    let invalid = breakdown.invalid_vertices as i32;
    let loops = breakdown.loops as i32;
    breakdown.score =
        breakdown.vertex_points - invalid * config.invalid_penalty + loops * config.loop_bonus;

    tracing::debug!(
        cards = board.len(),
        score = breakdown.score,
        valid = breakdown.valid_vertices,
        invalid = breakdown.invalid_vertices,
        loops = breakdown.loops,
        "scored board"
    );
    breakdown
}
