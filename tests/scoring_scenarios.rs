//! End-to-end scoring on small hand-built diagrams.
//!
//! Every complete vertex below is a real triangle of cells sharing one corner:
//! (0,0) reaches it through edge 0, (1,-1) through edge 2 and (1,0) through
//! edge 4.

use feynman_game_engine::engine::config::ScoringConfig;
use feynman_game_engine::games::feynman::board::{is_legal_placement, place_card, Board};
use feynman_game_engine::games::feynman::hex::{Edge, EdgeSet, Hex};
use feynman_game_engine::games::feynman::loops::LoopPolicy;
use feynman_game_engine::games::feynman::scoring::{calculate_score, calculate_score_with};
use feynman_game_engine::games::feynman::types::{ArrowDirection, Card, ParticleType, PlacedCard};
use feynman_game_engine::games::feynman::vertices::{find_all_vertices, VertexStatus};

const TRIANGLE: [(Hex, u8); 3] = [
    (Hex::new(0, 0), 0),
    (Hex::new(1, -1), 2),
    (Hex::new(1, 0), 4),
];

fn card(id: &str, particle: ParticleType, arrow: Option<ArrowDirection>, lines: &[u8]) -> Card {
    Card::new(id, particle, EdgeSet::from_indices(lines).unwrap(), arrow).unwrap()
}

/// Lay three cards on the triangle, each with a single line on its shared corner.
fn triangle_board(specs: [(ParticleType, Option<ArrowDirection>); 3]) -> Board {
    let placed = specs
        .iter()
        .zip(TRIANGLE)
        .enumerate()
        .map(|(i, (&(particle, arrow), (pos, edge)))| {
            PlacedCard::new(card(&format!("c{i}"), particle, arrow, &[edge]), pos)
        })
        .collect();
    Board::from_placed(placed).unwrap()
}

#[test]
fn quark_quark_gluon_is_valid() {
    let board = triangle_board([
        (ParticleType::Quark, Some(ArrowDirection::In)),
        (ParticleType::Quark, Some(ArrowDirection::In)),
        (ParticleType::Gluon, None),
    ]);
    let score = calculate_score(&board);
    assert_eq!(score.valid_vertices, 1);
    assert_eq!(score.invalid_vertices, 0);
    assert_eq!(score.score, 2);
}

#[test]
fn electron_photon_gluon_is_invalid() {
    let board = triangle_board([
        (ParticleType::Electron, Some(ArrowDirection::In)),
        (ParticleType::Photon, None),
        (ParticleType::Gluon, None),
    ]);
    let score = calculate_score(&board);
    assert_eq!(score.valid_vertices, 0);
    assert_eq!(score.invalid_vertices, 1);
    assert_eq!(score.score, -1);
}

#[test]
fn lone_card_has_one_incomplete_vertex() {
    let board = Board::from_placed(vec![PlacedCard::new(
        card("solo", ParticleType::Photon, None, &[1]),
        Hex::ORIGIN,
    )])
    .unwrap();
    let vertices = find_all_vertices(&board);
    assert_eq!(vertices.len(), 1);
    assert!(!vertices[0].is_complete());
    assert_eq!(vertices[0].points, 0);
    assert_eq!(calculate_score(&board).score, 0);
}

#[test]
fn occupied_position_is_never_legal() {
    let board = place_card(
        &Board::new(),
        card("a", ParticleType::Gluon, None, &[0, 3]),
        Hex::ORIGIN,
    )
    .unwrap();
    for lines in [&[][..], &[0, 3], &[1, 2, 4]] {
        let candidate = card("b", ParticleType::Gluon, None, lines);
        for steps in 0..6 {
            assert!(!is_legal_placement(&candidate.rotated_steps(steps), Hex::ORIGIN, &board));
        }
    }
}

#[test]
fn quark_antiquark_higgs_scores_four() {
    let board = triangle_board([
        (ParticleType::Quark, Some(ArrowDirection::In)),
        (ParticleType::Quark, Some(ArrowDirection::Out)),
        (ParticleType::Higgs, None),
    ]);
    let vertices = find_all_vertices(&board);
    assert_eq!(vertices[0].status, VertexStatus::Valid);
    assert_eq!(vertices[0].interaction, Some("Higgs-quark coupling"));
    assert_eq!(calculate_score(&board).score, 4);
}

#[test]
fn triangle_can_be_built_legally() {
    // Connected lines between the three cells plus one line each on the shared corner.
    let a = card("a", ParticleType::Gluon, None, &[0, 1]);
    let b = card("b", ParticleType::Gluon, None, &[2, 3]);
    let d = card("d", ParticleType::Gluon, None, &[4, 5]);

    let board = place_card(&Board::new(), a, Hex::new(0, 0)).unwrap();
    assert!(is_legal_placement(&b, Hex::new(1, -1), &board));
    let board = place_card(&board, b, Hex::new(1, -1)).unwrap();
    assert!(is_legal_placement(&d, Hex::new(1, 0), &board));
    let board = place_card(&board, d, Hex::new(1, 0)).unwrap();

    let score = calculate_score(&board);
    assert_eq!(score.valid_vertices, 1);
    assert_eq!(score.vertex_points, 3);
}

#[test]
fn score_is_independent_of_insertion_order() {
    let board = triangle_board([
        (ParticleType::Electron, Some(ArrowDirection::In)),
        (ParticleType::Electron, Some(ArrowDirection::Out)),
        (ParticleType::Higgs, None),
    ]);
    let mut reversed: Vec<PlacedCard> = board.cards().to_vec();
    reversed.reverse();
    let reversed = Board::from_placed(reversed).unwrap();
    assert_eq!(calculate_score(&board), calculate_score(&reversed));
    assert_eq!(calculate_score(&board).score, 4);
}

#[test]
fn every_complete_vertex_has_three_cards() {
    let board = triangle_board([
        (ParticleType::Gluon, None),
        (ParticleType::Gluon, None),
        (ParticleType::Gluon, None),
    ]);
    for vertex in find_all_vertices(&board) {
        if vertex.is_complete() {
            assert_eq!(vertex.cards.len(), 3);
        } else {
            assert!(vertex.cards.len() < 3);
        }
    }
}

#[test]
fn ring_loop_adds_bonus() {
    // Six gluons around an empty centre, each joined to the next.
    let placed = Edge::ALL
        .iter()
        .map(|&e| {
            let lines = EdgeSet::from_edges([e.rotated(2), e.rotated(4)]);
            let g = Card::new(format!("g{}", e.index()), ParticleType::Gluon, lines, None).unwrap();
            PlacedCard::new(g, Hex::ORIGIN.neighbor(e))
        })
        .collect();
    let board = Board::from_placed(placed).unwrap();

    let score = calculate_score(&board);
    assert_eq!(score.loops, 1);
    assert_eq!(score.score, score.vertex_points - score.invalid_vertices as i32 + 2);

    let approx = ScoringConfig {
        loop_policy: LoopPolicy::SurroundedApprox,
        ..ScoringConfig::default()
    };
    assert_eq!(calculate_score_with(&board, &approx).loops, 0);
}

#[test]
fn quark_antiquark_gluon_outscores_quark_quark_gluon() {
    let mixed = triangle_board([
        (ParticleType::Quark, Some(ArrowDirection::In)),
        (ParticleType::Quark, Some(ArrowDirection::Out)),
        (ParticleType::Gluon, None),
    ]);
    let score = calculate_score(&mixed);
    assert_eq!(score.valid_vertices, 1);
    assert_eq!(score.score, 3);

    let vertices = find_all_vertices(&mixed);
    assert_eq!(vertices[0].interaction, Some("Quark-gluon interaction"));
}

#[test]
fn surrounded_approx_counts_one_loop_per_seven_hits() {
    // Radius-2 patch: the centre and its six neighbors are fully surrounded.
    let mut placed = Vec::new();
    for q in -2..=2 {
        for r in -2..=2 {
            let pos = Hex::new(q, r);
            if Hex::ORIGIN.distance(pos) <= 2 {
                let blank = card(&format!("g{q},{r}"), ParticleType::Gluon, None, &[]);
                placed.push(PlacedCard::new(blank, pos));
            }
        }
    }
    let board = Board::from_placed(placed).unwrap();
    assert_eq!(board.len(), 19);

    let approx = ScoringConfig {
        loop_policy: LoopPolicy::SurroundedApprox,
        ..ScoringConfig::default()
    };
    let score = calculate_score_with(&board, &approx);
    assert_eq!(score.loops, 1);
    assert_eq!(score.vertex_points, 0);
    assert_eq!(score.score, 2);

    // Blank cards never form a line-connected ring.
    assert_eq!(calculate_score(&board).loops, 0);
}

#[test]
fn far_away_board_scores_without_overflow() {
    let json = serde_json::json!([
        {"card": {"id": "a", "type": "gluon", "lines": [0]}, "position": {"q": 1_000_000_000, "r": 0}},
        {"card": {"id": "b", "type": "gluon", "lines": [2]}, "position": {"q": 1_000_000_001, "r": -1}},
        {"card": {"id": "c", "type": "gluon", "lines": [4]}, "position": {"q": 1_000_000_001, "r": 0}},
        {"card": {"id": "d", "type": "gluon", "lines": [0]}, "position": {"q": 0, "r": 0}},
    ]);
    let board: Board = serde_json::from_value(json).unwrap();
    let score = calculate_score(&board);
    // The far triangle is one triple-gluon vertex; the origin card stays separate.
    assert_eq!(score.valid_vertices, 1);
    assert_eq!(score.score, 3);
    assert_eq!(find_all_vertices(&board).len(), 2);
}

#[test]
fn board_beyond_coordinate_limit_is_rejected() {
    let json = serde_json::json!([
        {"card": {"id": "a", "type": "gluon", "lines": [0]}, "position": {"q": i32::MAX, "r": 0}},
    ]);
    assert!(serde_json::from_value::<Board>(json).is_err());
}
