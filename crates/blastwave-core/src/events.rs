//! Events emitted by the simulation for visual and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::EffectKind;

/// RGBA colour, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    /// Pale yellow used for power discharges.
    pub const POWER: Color = Color::rgb(1.0, 0.84, 0.55);
    pub const FLAME: Color = Color::rgb(1.0, 0.55, 0.2);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// Feedback for the effect/sound playback frontend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EffectEvent {
    /// Play a one-shot effect at a point.
    Effect {
        kind: EffectKind,
        x: f32,
        y: f32,
        color: Option<Color>,
    },
    /// Shake the camera around a point.
    Shake {
        intensity: f32,
        duration: f32,
        x: f32,
        y: f32,
    },
    /// A lightning discharge along a polyline.
    Lightning { points: Vec<(f32, f32)>, color: Color },
}

impl EffectEvent {
    /// Plain effect with no tint.
    pub fn at(kind: EffectKind, x: f32, y: f32) -> Self {
        EffectEvent::Effect {
            kind,
            x,
            y,
            color: None,
        }
    }

    /// The effect kind, when this is a plain effect.
    pub fn kind(&self) -> Option<EffectKind> {
        match self {
            EffectEvent::Effect { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
