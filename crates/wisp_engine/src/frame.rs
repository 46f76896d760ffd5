//! The per-tick output contract toward the render layer.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use wisp_core::{Color, MoodKind};
use wisp_visuals::{Decoration, Particle};

/// Everything a renderer needs to paint one frame of the companion.
///
/// The render layer holds no engine internals: body geometry, palette
/// colors, particles and decorations all arrive pre-computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    pub position: DVec2,
    pub radius: f64,
    pub pulse_phase: f64,
    pub color_phase: f64,
    pub mood: MoodKind,
    /// Body color with the mood-transition blend already applied.
    pub color: Color,
    pub energy: f64,
    /// Progress of the color-only mood blend, 1.0 once settled.
    pub mood_transition_progress: f64,
    pub particles: Vec<Particle>,
    pub decorations: Vec<Decoration>,
    /// Engine time of the tick that produced this frame, seconds.
    pub timestamp: f64,
}

impl Default for RenderFrame {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            radius: 0.0,
            pulse_phase: 0.0,
            color_phase: 0.0,
            mood: MoodKind::Calm,
            color: Color::rgb(0, 0, 0),
            energy: 0.0,
            mood_transition_progress: 1.0,
            particles: Vec::new(),
            decorations: Vec::new(),
            timestamp: 0.0,
        }
    }
}
