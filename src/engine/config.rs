//! Engine configuration: scoring constants and deck composition.
//! Loaded from TOML at runtime for the CLI and embedding callers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::error::ConfigError;
use crate::games::feynman::loops::LoopPolicy;
use crate::games::feynman::types::ParticleType;

/// Scoring constants. Every field falls back to the standard rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub loop_policy: LoopPolicy,
    /// Points per qualifying loop.
    pub loop_bonus: i32,
    /// Points lost per complete invalid vertex.
    pub invalid_penalty: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            loop_policy: LoopPolicy::Ring,
            loop_bonus: 2,
            invalid_penalty: 1,
        }
    }
}

/// Number of cards of each printed particle type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub quark: usize,
    pub electron: usize,
    pub gluon: usize,
    pub photon: usize,
    pub higgs: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            quark: 13,
            electron: 8,
            gluon: 12,
            photon: 7,
            higgs: 4,
        }
    }
}

impl DeckConfig {
    pub fn count(&self, particle: ParticleType) -> usize {
        match particle {
            ParticleType::Quark => self.quark,
            ParticleType::Electron => self.electron,
            ParticleType::Gluon => self.gluon,
            ParticleType::Photon => self.photon,
            ParticleType::Higgs => self.higgs,
        }
    }

    pub fn total(&self) -> usize {
        ParticleType::ALL.iter().map(|&p| self.count(p)).sum()
    }
}

/// Top-level TOML file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub deck: DeckConfig,
}

/// Load a config from a TOML file at the given path.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Try well-known paths, returning the built-in defaults if none loads.
pub fn load_default_config() -> EngineConfig {
    let candidates = [
        Path::new("feynman_engine.toml"),
        Path::new("../feynman_engine.toml"),
        Path::new("/etc/feynman/feynman_engine.toml"),
    ];
    load_first_config(&candidates)
}

/// First candidate that exists and parses; unreadable or malformed files are
/// logged and skipped.
fn load_first_config(candidates: &[&Path]) -> EngineConfig {
    for p in candidates {
        if !p.exists() {
            continue;
        }
        match load_config(p) {
            Ok(config) => {
                tracing::info!(
                    path = %p.display(),
                    loop_policy = ?config.scoring.loop_policy,
                    deck_size = config.deck.total(),
                    "loaded engine config"
                );
                return config;
            }
            Err(e) => {
                tracing::warn!(path = %p.display(), error = %e, "skipping engine config");
            }
        }
    }
    tracing::info!(
        loop_policy = ?LoopPolicy::default(),
        "no feynman_engine.toml found, using built-in defaults"
    );
    EngineConfig::default()
}
