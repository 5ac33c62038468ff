//! Feynman engine CLI: score boards, check placements, simulate diagrams.
//!
//! Usage:
//!   feynman-game-engine score --board board.json --vertices
//!   feynman-game-engine check --board board.json --card card.json --q 1 --r -1 --auto-orient
//!   feynman-game-engine simulate --seed 7 --cards 20

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use feynman_game_engine::engine::config::{load_config, load_default_config, EngineConfig};
use feynman_game_engine::games::feynman::board::{
    auto_orient_card_for_placement, evaluate_placement, place_card, Board,
};
use feynman_game_engine::games::feynman::cards::build_seeded_deck;
use feynman_game_engine::games::feynman::hex::Hex;
use feynman_game_engine::games::feynman::placement::find_best_legal_placement;
use feynman_game_engine::games::feynman::scoring::calculate_score_with;
use feynman_game_engine::games::feynman::types::Card;
use feynman_game_engine::games::feynman::vertices::find_all_vertices;

#[derive(Parser)]
#[command(name = "feynman-game-engine", about = "Feynman diagram scoring and placement engine")]
struct Cli {
    /// Path to feynman_engine.toml (default: auto-discover)
    #[arg(long, global = true, env = "FEYNMAN_ENGINE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a board
    Score {
        /// Board JSON, inline or a file path
        #[arg(long)]
        board: String,

        /// Also print every detected vertex
        #[arg(long)]
        vertices: bool,
    },
    /// Check whether a card may be placed at a position
    Check {
        /// Board JSON, inline or a file path
        #[arg(long)]
        board: String,

        /// Card JSON, inline or a file path
        #[arg(long)]
        card: String,

        #[arg(long, allow_hyphen_values = true)]
        q: i32,

        #[arg(long, allow_hyphen_values = true)]
        r: i32,

        /// Try all rotations and report the best one
        #[arg(long)]
        auto_orient: bool,
    },
    /// Build a seeded deck and greedily lay cards into one diagram
    Simulate {
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Number of cards to draw
        #[arg(long, default_value = "20")]
        cards: usize,
    },
}

/// Parse JSON given inline, or read it from a file.
fn read_json<T: DeserializeOwned>(arg: &str) -> Result<T, Box<dyn std::error::Error>> {
    let trimmed = arg.trim_start();
    let text = if trimmed.starts_with('[') || trimmed.starts_with('{') {
        arg.to_string()
    } else {
        std::fs::read_to_string(arg).map_err(|e| format!("failed to read {arg}: {e}"))?
    };
    Ok(serde_json::from_str(&text)?)
}

fn run_score(
    config: &EngineConfig,
    board: &str,
    show_vertices: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let board: Board = read_json(board)?;
    let score = calculate_score_with(&board, &config.scoring);
    tracing::info!(cards = board.len(), score = score.score, "scored board");

    if show_vertices {
        let vertices = find_all_vertices(&board);
        let out = serde_json::json!({ "score": score, "vertices": vertices });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&score)?);
    }
    Ok(())
}

fn run_check(
    board: &str,
    card: &str,
    position: Hex,
    auto_orient: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let board: Board = read_json(board)?;
    let mut card: Card = read_json(card)?;

    if auto_orient {
        match auto_orient_card_for_placement(&card, position, &board) {
            Some(oriented) => card = oriented,
            None => tracing::info!(card = card.id(), %position, "no rotation fits"),
        }
    }

    let eval = evaluate_placement(&card, position, &board);
    tracing::info!(card = card.id(), %position, legal = eval.is_legal, "checked placement");
    let out = serde_json::json!({ "card": card, "position": position, "evaluation": eval });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn run_simulate(
    config: &EngineConfig,
    seed: u64,
    count: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let deck = build_seeded_deck(&config.deck, seed);
    let mut board = Board::new();
    let mut skipped = 0usize;

    for card in deck.into_iter().take(count) {
        match find_best_legal_placement(&card, &board) {
            Some((oriented, position)) => board = place_card(&board, oriented, position)?,
            None => skipped += 1,
        }
    }

    let score = calculate_score_with(&board, &config.scoring);
    tracing::info!(seed, placed = board.len(), skipped, score = score.score, "simulated diagram");
    let out = serde_json::json!({ "board": board, "score": score });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => load_config(path).map_err(|e| format!("Failed to load config: {}", e))?,
        None => load_default_config(),
    };

    match cli.command {
        Command::Score { board, vertices } => run_score(&config, &board, vertices),
        Command::Check { board, card, q, r, auto_orient } => {
            run_check(&board, &card, Hex::new(q, r), auto_orient)
        }
        Command::Simulate { seed, cards } => run_simulate(&config, seed, cards),
    }
}
