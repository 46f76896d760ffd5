//! Mutable engine state: affect, activity history and body kinematics.
//!
//! Every numeric field is clamped at the point of mutation; NaN/Inf inputs
//! are replaced with a homeostatic fallback instead of propagating.

use crate::mood::MoodKind;
use crate::snapshot::SensorySnapshot;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Guard against NaN and Infinity in state values.
#[inline]
pub fn sanitize_f64(v: f64, fallback: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        tracing::warn!("NaN/Inf detected in state, resetting to fallback {}", fallback);
        fallback
    }
}

/// The companion's internal affective state. Exclusively owned and mutated by
/// the affect engine; everyone else sees read-only views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffectState {
    pub mood: MoodKind,
    /// Animation intensity, always in [0, 1].
    pub energy: f64,
    /// Exploration drive, always in [0, 1].
    pub curiosity: f64,
    /// Engine time (seconds) of the last registered activity.
    pub last_activity: f64,
}

impl Default for AffectState {
    fn default() -> Self {
        Self {
            mood: MoodKind::Calm,
            energy: 0.5,
            curiosity: 0.7,
            last_activity: 0.0,
        }
    }
}

impl AffectState {
    /// Clamp all scalars into their documented ranges.
    pub fn normalize(&mut self) {
        self.energy = sanitize_f64(self.energy, 0.5).clamp(0.0, 1.0);
        self.curiosity = sanitize_f64(self.curiosity, 0.7).clamp(0.0, 1.0);
        self.last_activity = sanitize_f64(self.last_activity, 0.0);
    }
}

/// Immutable snapshot of one tick's stimulus and the state it produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub timestamp: f64,
    pub snapshot: SensorySnapshot,
    pub resulting_mood: MoodKind,
    pub resulting_energy: f64,
}

/// FIFO ring of the most recent activity records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityHistory {
    records: VecDeque<ActivityRecord>,
    capacity: usize,
}

pub const HISTORY_CAPACITY: usize = 100;

impl Default for ActivityHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl ActivityHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a record, evicting the oldest when full.
    pub fn push(&mut self, record: ActivityRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.records.iter()
    }

    pub fn newest(&self) -> Option<&ActivityRecord> {
        self.records.back()
    }

    /// Replace the contents, keeping only the newest `capacity` records.
    pub fn replace(&mut self, records: Vec<ActivityRecord>) {
        let skip = records.len().saturating_sub(self.capacity);
        self.records = records.into_iter().skip(skip).collect();
    }
}

/// Position, motion and pulse state of the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicState {
    pub position: DVec2,
    pub target: DVec2,
    pub velocity: DVec2,
    /// Current (pulsing) radius, derived from `base_radius` and energy.
    pub radius: f64,
    pub base_radius: f64,
    pub pulse_phase: f64,
    pub color_phase: f64,
}

impl KinematicState {
    /// Body at rest, centered on the canvas.
    pub fn centered(canvas: DVec2, base_radius: f64) -> Self {
        let center = canvas * 0.5;
        Self {
            position: center,
            target: center,
            velocity: DVec2::ZERO,
            radius: base_radius,
            base_radius,
            pulse_phase: 0.0,
            color_phase: 0.0,
        }
    }

    /// Advance pulse/color phases and recompute the pulsing radius.
    pub fn advance_pulse(&mut self, pulse_speed: f64, energy: f64) {
        self.pulse_phase += pulse_speed;
        self.color_phase += pulse_speed * 0.5;
        let pulse_amount = self.pulse_phase.sin() * 0.2 + 0.8;
        self.radius = self.base_radius * (0.8 + pulse_amount * energy * 0.5);
    }

    /// Teleport the body: also zeroes velocity and re-pins the target.
    pub fn set_position(&mut self, position: DVec2) {
        self.position = position;
        self.target = position;
        self.velocity = DVec2::ZERO;
    }

    /// Re-center if a canvas resize left the body outside the new bounds.
    pub fn clamp_to_canvas(&mut self, canvas: DVec2) {
        if self.position.x > canvas.x || self.position.y > canvas.y {
            self.set_position(canvas * 0.5);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ts: f64) -> ActivityRecord {
        ActivityRecord {
            timestamp: ts,
            snapshot: SensorySnapshot::default(),
            resulting_mood: MoodKind::Calm,
            resulting_energy: 0.5,
        }
    }

    #[test]
    fn test_affect_normalize_clamps() {
        let mut affect = AffectState {
            energy: 1.7,
            curiosity: -0.3,
            ..Default::default()
        };
        affect.normalize();
        assert_eq!(affect.energy, 1.0);
        assert_eq!(affect.curiosity, 0.0);
    }

    #[test]
    fn test_affect_normalize_sanitizes_nan() {
        let mut affect = AffectState {
            energy: f64::NAN,
            curiosity: f64::INFINITY,
            last_activity: f64::NEG_INFINITY,
            ..Default::default()
        };
        affect.normalize();
        assert!(affect.energy.is_finite());
        assert!((0.0..=1.0).contains(&affect.energy));
        assert!((0.0..=1.0).contains(&affect.curiosity));
        assert!(affect.last_activity.is_finite());
    }

    #[test]
    fn test_history_evicts_oldest_first() {
        let mut history = ActivityHistory::default();
        for i in 0..150 {
            history.push(record(i as f64));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        // Survivors are exactly the last 100 by timestamp.
        let timestamps: Vec<f64> = history.iter().map(|r| r.timestamp).collect();
        let expected: Vec<f64> = (50..150).map(|i| i as f64).collect();
        assert_eq!(timestamps, expected);
    }

    #[test]
    fn test_history_replace_truncates_to_newest() {
        let mut history = ActivityHistory::default();
        history.replace((0..120).map(|i| record(i as f64)).collect());
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.iter().next().unwrap().timestamp, 20.0);
        assert_eq!(history.newest().unwrap().timestamp, 119.0);
    }

    #[test]
    fn test_kinematics_centered() {
        let kin = KinematicState::centered(DVec2::new(800.0, 600.0), 30.0);
        assert_eq!(kin.position, DVec2::new(400.0, 300.0));
        assert_eq!(kin.velocity, DVec2::ZERO);
        assert_eq!(kin.radius, 30.0);
    }

    #[test]
    fn test_set_position_zeroes_velocity_and_target() {
        let mut kin = KinematicState::centered(DVec2::new(800.0, 600.0), 30.0);
        kin.velocity = DVec2::new(5.0, -3.0);
        kin.set_position(DVec2::new(100.0, 100.0));
        assert_eq!(kin.position, DVec2::new(100.0, 100.0));
        assert_eq!(kin.target, kin.position);
        assert_eq!(kin.velocity, DVec2::ZERO);
    }

    #[test]
    fn test_pulse_radius_stays_near_base() {
        let mut kin = KinematicState::centered(DVec2::new(800.0, 600.0), 30.0);
        for _ in 0..1000 {
            kin.advance_pulse(0.05, 1.0);
            // pulse_amount ∈ [0.6, 1.0] → radius ∈ [base*1.1, base*1.3]
            assert!(kin.radius >= 30.0 * 0.8);
            assert!(kin.radius <= 30.0 * 1.3 + 1e-9);
        }
    }

    #[test]
    fn test_clamp_to_canvas_recenters_when_outside() {
        let mut kin = KinematicState::centered(DVec2::new(1920.0, 1080.0), 30.0);
        kin.position = DVec2::new(1900.0, 500.0);
        kin.clamp_to_canvas(DVec2::new(800.0, 600.0));
        assert_eq!(kin.position, DVec2::new(400.0, 300.0));
    }
}
