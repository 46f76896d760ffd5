//! Per-mood target selection.
//!
//! One policy per mood, dispatched over the full enum so a new mood cannot
//! ship without a movement policy. Policies read the current position and the
//! drift field; the physics integrator does the actual chasing.

use glam::DVec2;
use rand::Rng;
use wisp_core::{KinematicState, MoodKind, MotionConfig, SensorySnapshot, ZoneId, ZoneSet};

use crate::noise::DriftField;

const CALM_JITTER: f64 = 3.0;
const SLEEPY_JITTER: f64 = 1.0;
const EXCITED_JITTER: f64 = 20.0;
const CURIOUS_JITTER: f64 = 3.0;
const CURIOUS_PULL: f64 = 0.05;
const ANNOYED_JITTER: f64 = 15.0;

/// Picks the tick's target position from mood, stimulus and the drift field.
#[derive(Debug)]
pub struct MotionPlanner {
    drift: DriftField,
    config: MotionConfig,
    canvas: DVec2,
}

impl MotionPlanner {
    pub fn new<R: Rng>(config: MotionConfig, canvas: DVec2, rng: &mut R) -> Self {
        Self {
            drift: DriftField::new(config.noise_step, rng),
            config,
            canvas,
        }
    }

    pub fn set_canvas(&mut self, canvas: DVec2) {
        tracing::debug!("planner canvas resized to {}x{}", canvas.x, canvas.y);
        self.canvas = canvas;
    }

    /// Choose the target for this tick.
    ///
    /// `now` is engine time in seconds; the reflective orbit angle derives
    /// from it so the policy stays a pure function of its inputs.
    pub fn plan_target<R: Rng>(
        &mut self,
        mood: MoodKind,
        snapshot: &SensorySnapshot,
        body: &KinematicState,
        zones: &ZoneSet,
        now: f64,
        rng: &mut R,
    ) -> DVec2 {
        let noise = self.drift.advance();
        let pos = body.position;

        let target = match mood {
            MoodKind::Calm => pos + noise * CALM_JITTER,
            MoodKind::Sleepy => pos + noise * SLEEPY_JITTER,
            MoodKind::Excited => pos + noise * EXCITED_JITTER,
            MoodKind::Curious => {
                let mut target = pos + noise * CURIOUS_JITTER;
                if let Some(pointer) = &snapshot.pointer {
                    target += (pointer.position - pos) * CURIOUS_PULL;
                }
                target
            }
            MoodKind::Alert => {
                if snapshot.zone == Some(ZoneId::Notification) {
                    zones.get(ZoneId::Notification).center()
                } else {
                    body.target
                }
            }
            MoodKind::Annoyed => {
                // Deliberately not the drift field: annoyance looks twitchy.
                let jx = rng.gen_range(-ANNOYED_JITTER..=ANNOYED_JITTER);
                let jy = rng.gen_range(-ANNOYED_JITTER..=ANNOYED_JITTER);
                pos + DVec2::new(jx, jy)
            }
            MoodKind::Sad => DVec2::new(
                pos.x + noise.x * CALM_JITTER,
                (pos.y + self.config.sink_rate).min(self.canvas.y - body.radius),
            ),
            MoodKind::Reflective => {
                let orbit_radius = self.config.orbit_fraction * self.canvas.x.min(self.canvas.y);
                let angle = now * self.config.orbit_speed;
                self.canvas * 0.5 + DVec2::new(angle.cos(), angle.sin()) * orbit_radius
            }
        };

        clamp_to_canvas(target, body.radius, self.canvas)
    }
}

/// Keep the target fully on-canvas: `[radius, dimension - radius]` per axis.
fn clamp_to_canvas(target: DVec2, radius: f64, canvas: DVec2) -> DVec2 {
    DVec2::new(
        target.x.clamp(radius, canvas.x - radius),
        target.y.clamp(radius, canvas.y - radius),
    )
}
