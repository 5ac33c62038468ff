//! Error types shared by the engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::games::feynman::hex::Hex;
use crate::games::feynman::types::ParticleType;

/// Validation errors raised at the library boundary.
///
/// Illegal placements are not errors; see `PlacementRejection`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("rotation must be a multiple of 60 degrees, got {0}")]
    InvalidRotation(i32),

    #[error("edge index must be in 0..=5, got {0}")]
    InvalidEdge(i64),

    #[error("{0} cards do not carry an arrow direction")]
    ArrowOnNeutral(ParticleType),

    #[error("position {0} is already occupied")]
    Occupied(Hex),

    #[error("board contains more than one card at {0}")]
    DuplicatePosition(Hex),

    #[error("unsupported player count: {0} (expected 2, 3 or 4)")]
    UnsupportedPlayerCount(usize),

    #[error("invalid position key: {0:?}")]
    InvalidPositionKey(String),

    #[error("position {0} is outside the playable area")]
    OutOfBounds(Hex),
}

/// Errors raised while loading an engine config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
