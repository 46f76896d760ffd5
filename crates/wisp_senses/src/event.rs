//! Raw sensor events handed to fusion by the platform collaborator.
//!
//! Events arrive off the tick boundary at their own cadence (pointer ~10 ms,
//! screen diff ~100 ms, window focus ~500 ms) and are queued into the engine
//! inbox; fusion itself never blocks or captures anything.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One raw observation from the platform layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SensorEvent {
    /// Pointer moved to a new position.
    PointerMove { position: DVec2, time: f64 },
    /// A button press; treated as a visual-change stimulus.
    Click { time: f64 },
    /// Finished downscaled grayscale capture of the screen. The capture
    /// collaborator owns scaling and timing; fusion only diffs frames.
    ScreenFrame {
        luma: Vec<u8>,
        width: usize,
        height: usize,
        time: f64,
    },
    /// Focused-window metadata refresh.
    WindowFocus {
        title: String,
        center: Option<DVec2>,
        focused: bool,
        time: f64,
    },
}

impl SensorEvent {
    pub fn time(&self) -> f64 {
        match self {
            SensorEvent::PointerMove { time, .. }
            | SensorEvent::Click { time }
            | SensorEvent::ScreenFrame { time, .. }
            | SensorEvent::WindowFocus { time, .. } => *time,
        }
    }
}
