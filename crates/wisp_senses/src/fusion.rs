//! Fuses raw pointer/screen/window events into decayed activity scalars and
//! zone occupancy.
//!
//! `sample` ingests events in arrival order; `snapshot` applies time-based
//! decay and emits the per-tick [`SensorySnapshot`]. All time is the caller's
//! explicit engine clock, so fusion is fully deterministic under test.

use crate::event::SensorEvent;
use glam::DVec2;
use wisp_core::{PointerSample, SensoryConfig, SensorySnapshot, WindowInfo, ZoneSet};

/// How long a click keeps boosting visual change before it fades out.
const CLICK_LEVEL: f64 = 0.7;
const CLICK_HALF_LIFE: f64 = 0.5;
const CLICK_FLOOR: f64 = 0.01;

/// Focused-window change acts like a screen-wide visual event.
const WINDOW_CHANGE_LEVEL: f64 = 0.6;

#[derive(Debug)]
pub struct SensorFusion {
    config: SensoryConfig,
    zones: ZoneSet,

    // Pointer channel
    pointer: Option<PointerSample>,
    mouse_activity: f64,
    last_pointer_time: Option<f64>,

    // Visual channel
    visual_change: f64,
    last_frame: Option<Frame>,
    click_time: Option<f64>,

    // Window channel
    window: Option<WindowInfo>,

    last_decay: Option<f64>,
}

#[derive(Debug)]
struct Frame {
    luma: Vec<u8>,
    width: usize,
    height: usize,
}

impl SensorFusion {
    pub fn new(config: SensoryConfig, screen: DVec2) -> Self {
        Self {
            zones: ZoneSet::layout(screen),
            config,
            pointer: None,
            mouse_activity: 0.0,
            last_pointer_time: None,
            visual_change: 0.0,
            last_frame: None,
            click_time: None,
            window: None,
            last_decay: None,
        }
    }

    pub fn zones(&self) -> &ZoneSet {
        &self.zones
    }

    pub fn zones_mut(&mut self) -> &mut ZoneSet {
        &mut self.zones
    }

    /// Ingest one raw event. Never blocks, never fails: malformed frames are
    /// skipped with a warning.
    pub fn sample(&mut self, event: SensorEvent) {
        match event {
            SensorEvent::PointerMove { position, time } => {
                self.on_pointer_move(position, time)
            }
            SensorEvent::Click { time } => {
                self.visual_change = self.visual_change.max(CLICK_LEVEL);
                self.click_time = Some(time);
            }
            SensorEvent::ScreenFrame {
                luma,
                width,
                height,
                time: _,
            } => self.on_screen_frame(luma, width, height),
            SensorEvent::WindowFocus {
                title,
                center,
                focused,
                time: _,
            } => self.on_window_focus(title, center, focused),
        }
    }

    fn on_pointer_move(&mut self, position: DVec2, time: f64) {
        let velocity = match self.pointer {
            Some(prev) => position - prev.position,
            None => DVec2::ZERO,
        };
        let speed = velocity.length();
        self.mouse_activity =
            (speed / self.config.mouse_sensitivity_divisor).clamp(0.0, 1.0);
        self.pointer = Some(PointerSample { position, velocity });
        self.last_pointer_time = Some(time);
        self.zones
            .follow_pointer(position, self.config.active_zone_size);
    }

    fn on_screen_frame(&mut self, luma: Vec<u8>, width: usize, height: usize) {
        if luma.len() != width * height || luma.is_empty() {
            tracing::warn!(
                "screen frame size mismatch ({}x{} vs {} bytes), skipping",
                width,
                height,
                luma.len()
            );
            return;
        }
        let frame = Frame {
            luma,
            width,
            height,
        };
        if let Some(prev) = &self.last_frame {
            if prev.width == frame.width && prev.height == frame.height {
                let threshold = self.config.luma_threshold;
                let changed = prev
                    .luma
                    .iter()
                    .zip(&frame.luma)
                    .filter(|(a, b)| a.abs_diff(**b) > threshold)
                    .count();
                let fraction = changed as f64 / frame.luma.len() as f64;
                self.visual_change =
                    (fraction * self.config.visual_change_gain).clamp(0.0, 1.0);
            }
        }
        self.last_frame = Some(frame);
    }

    fn on_window_focus(&mut self, title: String, center: Option<DVec2>, focused: bool) {
        let changed = self
            .window
            .as_ref()
            .map(|w| w.title != title)
            .unwrap_or(true);
        if changed {
            self.visual_change = self.visual_change.max(WINDOW_CHANGE_LEVEL);
            tracing::debug!("active window changed to: {}", title);
        }
        if let Some(center) = center {
            self.zones.focus_productivity_on(center);
        }
        self.window = Some(WindowInfo { title, focused });
    }

    /// Apply time-based decay and emit this tick's snapshot.
    pub fn snapshot(&mut self, now: f64) -> SensorySnapshot {
        self.decay(now);
        SensorySnapshot {
            pointer: self.pointer,
            mouse_activity: self.mouse_activity,
            visual_change: self.effective_visual_change(now),
            zone: self
                .pointer
                .and_then(|p| self.zones.classify(p.position)),
            window: self.window.clone(),
            timestamp: now,
        }
    }

    fn decay(&mut self, now: f64) {
        let dt = match self.last_decay {
            Some(last) if now > last => now - last,
            Some(_) => return,
            None => {
                self.last_decay = Some(now);
                return;
            }
        };
        self.last_decay = Some(now);

        // Visual change fades continuously, so old spikes die out even
        // without further captures.
        self.visual_change =
            (self.visual_change - self.config.visual_decay_rate * dt).max(0.0);

        // Mouse activity holds briefly, then decays linearly to 0.
        let pointer_idle = self
            .last_pointer_time
            .map(|t| now - t > self.config.mouse_decay_after)
            .unwrap_or(false);
        if pointer_idle {
            self.mouse_activity =
                (self.mouse_activity - self.config.mouse_decay_rate * dt).max(0.0);
        }
    }

    /// Click boost rides on top of the continuous level: it starts at 0.7 and
    /// halves every 500 ms (single-shot decay, not continuous).
    fn effective_visual_change(&mut self, now: f64) -> f64 {
        let click_level = match self.click_time {
            Some(t) if now >= t => {
                let halvings = ((now - t) / CLICK_HALF_LIFE).floor();
                CLICK_LEVEL * 0.5_f64.powf(halvings)
            }
            _ => 0.0,
        };
        if click_level < CLICK_FLOOR {
            self.click_time = None;
        }
        self.visual_change.max(click_level).clamp(0.0, 1.0)
    }
}
