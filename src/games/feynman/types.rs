//! Card model: particle types, arrow directions, cards and placed cards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::error::EngineError;

use super::hex::{Edge, EdgeSet, Hex};

/// Printed particle type of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleType {
    Quark,
    Electron,
    Gluon,
    Photon,
    Higgs,
}

impl ParticleType {
    pub const ALL: [ParticleType; 5] = [
        ParticleType::Quark,
        ParticleType::Electron,
        ParticleType::Gluon,
        ParticleType::Photon,
        ParticleType::Higgs,
    ];

    /// Charged particles carry an arrow that selects matter or antimatter.
    pub const fn is_charged(self) -> bool {
        matches!(self, ParticleType::Quark | ParticleType::Electron)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ParticleType::Quark => "quark",
            ParticleType::Electron => "electron",
            ParticleType::Gluon => "gluon",
            ParticleType::Photon => "photon",
            ParticleType::Higgs => "higgs",
        }
    }
}

impl fmt::Display for ParticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrowDirection {
    In,
    Out,
}

/// Matter/antimatter-resolved particle identity used for vertex matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveType {
    Quark,
    Antiquark,
    Electron,
    Positron,
    Photon,
    Gluon,
    Higgs,
}

impl EffectiveType {
    pub const fn as_str(self) -> &'static str {
        match self {
            EffectiveType::Quark => "quark",
            EffectiveType::Antiquark => "antiquark",
            EffectiveType::Electron => "electron",
            EffectiveType::Positron => "positron",
            EffectiveType::Photon => "photon",
            EffectiveType::Gluon => "gluon",
            EffectiveType::Higgs => "higgs",
        }
    }
}

impl fmt::Display for EffectiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Card ---

/// One hexagonal tile.
///
/// Fields are private so every card in circulation has in-range line
/// indices, a rotation in {0, 60, ..., 300} and an arrow only when charged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardRecord", into = "CardRecord")]
pub struct Card {
    id: String,
    particle: ParticleType,
    lines: EdgeSet,
    arrow: Option<ArrowDirection>,
    rotation: u16,
}

impl Card {
    /// Unrotated card.
    pub fn new(
        id: impl Into<String>,
        particle: ParticleType,
        lines: EdgeSet,
        arrow: Option<ArrowDirection>,
    ) -> Result<Self, EngineError> {
        if arrow.is_some() && !particle.is_charged() {
            return Err(EngineError::ArrowOnNeutral(particle));
        }
        Ok(Self {
            id: id.into(),
            particle,
            lines,
            arrow,
            rotation: 0,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn particle(&self) -> ParticleType {
        self.particle
    }

    pub fn lines(&self) -> EdgeSet {
        self.lines
    }

    pub fn arrow(&self) -> Option<ArrowDirection> {
        self.arrow
    }

    /// Accumulated rotation in degrees, always in [0, 360) and a multiple of 60.
    pub fn rotation(&self) -> u16 {
        self.rotation
    }

    #[inline]
    pub fn has_line(&self, edge: Edge) -> bool {
        self.lines.contains(edge)
    }

    /// Return a copy rotated clockwise by `degrees`.
    pub fn rotate(&self, degrees: i32) -> Result<Card, EngineError> {
        if degrees % 60 != 0 {
            return Err(EngineError::InvalidRotation(degrees));
        }
        let steps = (degrees / 60).rem_euclid(6) as u8;
        Ok(self.rotated_steps(steps))
    }

    /// Rotate clockwise by `steps` sixths of a turn.
    pub fn rotated_steps(&self, steps: u8) -> Card {
        let steps = steps % 6;
        Card {
            lines: self.lines.rotated(steps),
            rotation: (self.rotation + u16::from(steps) * 60) % 360,
            ..self.clone()
        }
    }

    /// Resolve matter/antimatter from the arrow direction.
    pub fn effective_type(&self) -> EffectiveType {
        let out = self.arrow == Some(ArrowDirection::Out);
        match self.particle {
            ParticleType::Quark if out => EffectiveType::Antiquark,
            ParticleType::Quark => EffectiveType::Quark,
            ParticleType::Electron if out => EffectiveType::Positron,
            ParticleType::Electron => EffectiveType::Electron,
            ParticleType::Gluon => EffectiveType::Gluon,
            ParticleType::Photon => EffectiveType::Photon,
            ParticleType::Higgs => EffectiveType::Higgs,
        }
    }
}

// --- Card serde ---

#[derive(Serialize, Deserialize)]
struct CardRecord {
    id: String,
    #[serde(rename = "type")]
    particle: ParticleType,
    lines: EdgeSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arrow_direction: Option<ArrowDirection>,
    #[serde(default)]
    rotation: i32,
}

impl TryFrom<CardRecord> for Card {
    type Error = EngineError;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        if record.rotation % 60 != 0 {
            return Err(EngineError::InvalidRotation(record.rotation));
        }
        let mut card = Card::new(
            record.id,
            record.particle,
            record.lines,
            record.arrow_direction,
        )?;
        card.rotation = record.rotation.rem_euclid(360) as u16;
        Ok(card)
    }
}

impl From<Card> for CardRecord {
    fn from(card: Card) -> Self {
        CardRecord {
            id: card.id,
            particle: card.particle,
            lines: card.lines,
            arrow_direction: card.arrow,
            rotation: i32::from(card.rotation),
        }
    }
}

// --- PlacedCard ---

/// A card bound to a board position. Fixed once placed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedCard {
    pub card: Card,
    pub position: Hex,
}

impl PlacedCard {
    pub fn new(card: Card, position: Hex) -> Self {
        Self { card, position }
    }

    #[inline]
    pub fn has_line(&self, edge: Edge) -> bool {
        self.card.has_line(edge)
    }

    pub fn effective_type(&self) -> EffectiveType {
        self.card.effective_type()
    }
}
