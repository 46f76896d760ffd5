//! The affect engine: mood state machine plus energy/curiosity dynamics.
//!
//! Rules run once per tick in a fixed priority order; later rules may
//! override earlier ones within the same tick. Mood transitions are
//! instantaneous at the state level; the color-only blend tracked here is a
//! render concern and never feeds back into decision rules.

use rand::Rng;
use wisp_core::{
    ActivityHistory, ActivityRecord, AffectState, BrainConfig, Color, MoodKind, SensorySnapshot,
    ZoneId,
};

/// Inactivity decay kicks in after this much quiet, seconds.
const INACTIVITY_AFTER: f64 = 10.0;
/// Energy lost per second of inactivity.
const INACTIVITY_DRAIN: f64 = 0.001;
/// Inactivity never drains below this floor.
const INACTIVITY_FLOOR: f64 = 0.1;
/// Below this energy an inactive companion falls asleep.
const SLEEPY_THRESHOLD: f64 = 0.3;

const HIGH_ACTIVITY: f64 = 0.7;
const FRANTIC_ACTIVITY: f64 = 0.9;
const EXCITED_CHANCE: f64 = 0.3;
const ZONE_MOOD_CHANCE: f64 = 0.2;
const NOTIFICATION_VISUAL: f64 = 0.5;
const DRIFT_CHANCE: f64 = 0.005;

/// Color blend progress gained per tick (~20 ticks to complete).
const BLEND_STEP: f64 = 0.05;

/// Read-only per-tick projection of the current mood, never stored.
#[derive(Debug, Clone)]
pub struct MoodView {
    pub mood: MoodKind,
    pub energy: f64,
    /// `base_pulse_speed × energy × global multiplier`.
    pub pulse_speed: f64,
    /// `base_move_speed × energy × global multiplier`.
    pub move_speed: f64,
    pub palette: &'static [Color],
}

#[derive(Debug, Clone, Copy)]
struct MoodBlend {
    from: MoodKind,
    progress: f64,
}

/// Owns the affect state and drives it from sensory snapshots.
#[derive(Debug)]
pub struct AffectEngine {
    affect: AffectState,
    history: ActivityHistory,
    blend: MoodBlend,
    pulse_multiplier: f64,
    move_multiplier: f64,
}

impl AffectEngine {
    pub fn new(config: &BrainConfig, now: f64) -> Self {
        let mood = MoodKind::parse_lenient(&config.initial_mood);
        let mut affect = AffectState {
            mood,
            energy: config.initial_energy,
            curiosity: config.initial_curiosity,
            last_activity: now,
        };
        affect.normalize();
        tracing::info!(
            "affect engine initialized with mood: {}, energy: {:.2}",
            affect.mood,
            affect.energy
        );
        Self {
            affect,
            history: ActivityHistory::default(),
            blend: MoodBlend {
                from: mood,
                progress: 1.0,
            },
            pulse_multiplier: config.pulse_multiplier,
            move_multiplier: config.move_multiplier,
        }
    }

    /// Read view of the current affect state.
    pub fn current(&self) -> &AffectState {
        &self.affect
    }

    pub fn history(&self) -> &ActivityHistory {
        &self.history
    }

    pub(crate) fn history_mut(&mut self) -> &mut ActivityHistory {
        &mut self.history
    }

    pub(crate) fn affect_mut(&mut self) -> &mut AffectState {
        &mut self.affect
    }

    /// Mood the color blend is coming from.
    pub fn blend_from(&self) -> MoodKind {
        self.blend.from
    }

    /// Color-blend progress in [0, 1]; 1.0 means the blend is settled.
    pub fn transition_progress(&self) -> f64 {
        self.blend.progress
    }

    /// Evaluate the state machine against one sensory snapshot.
    pub fn update<R: Rng>(&mut self, snapshot: &SensorySnapshot, now: f64, rng: &mut R) {
        self.blend.progress = (self.blend.progress + BLEND_STEP).min(1.0);

        // Rule 1: inactivity decay toward sleep.
        let inactive = now - self.affect.last_activity;
        if inactive > INACTIVITY_AFTER {
            self.affect.energy =
                (self.affect.energy - INACTIVITY_DRAIN * inactive).max(INACTIVITY_FLOOR);
            if self.affect.energy < SLEEPY_THRESHOLD && self.affect.mood != MoodKind::Sleepy {
                self.transition_to(MoodKind::Sleepy, "inactivity");
            }
        }

        // Rule 2: high pointer activity.
        if snapshot.mouse_activity > HIGH_ACTIVITY {
            self.affect.energy = (self.affect.energy + 0.05).min(1.0);
            self.affect.last_activity = now;

            if snapshot.mouse_activity > FRANTIC_ACTIVITY {
                if rng.gen::<f64>() < EXCITED_CHANCE {
                    self.transition_to(MoodKind::Excited, "frantic pointer");
                }
            } else if snapshot.zone == Some(ZoneId::Productivity) {
                if rng.gen::<f64>() < ZONE_MOOD_CHANCE {
                    self.transition_to(MoodKind::Calm, "productivity zone");
                }
            } else if snapshot.zone == Some(ZoneId::Active) {
                if rng.gen::<f64>() < ZONE_MOOD_CHANCE {
                    self.transition_to(MoodKind::Curious, "active zone");
                }
            }
        }

        // Rule 3: notification stimulus overrides.
        if snapshot.zone == Some(ZoneId::Notification)
            && snapshot.visual_change > NOTIFICATION_VISUAL
        {
            self.transition_to(MoodKind::Alert, "notification stimulus");
            self.affect.energy = (self.affect.energy + 0.2).min(1.0);
            self.affect.last_activity = now;
        }

        // Rule 4: stochastic drift across the full mood set.
        if rng.gen::<f64>() < DRIFT_CHANCE {
            let mood = MoodKind::ALL[rng.gen_range(0..MoodKind::ALL.len())];
            self.transition_to(mood, "stochastic drift");
        }

        self.affect.normalize();

        // Rule 5: record the tick.
        self.history.push(ActivityRecord {
            timestamp: now,
            snapshot: snapshot.clone(),
            resulting_mood: self.affect.mood,
            resulting_energy: self.affect.energy,
        });
    }

    fn transition_to(&mut self, mood: MoodKind, reason: &str) {
        if mood == self.affect.mood {
            return;
        }
        tracing::debug!(
            "mood changed from {} to {} ({})",
            self.affect.mood,
            mood,
            reason
        );
        self.blend = MoodBlend {
            from: self.affect.mood,
            progress: 0.0,
        };
        self.affect.mood = mood;
    }

    /// Manual override: jump straight to a mood (blend still animates).
    pub fn force_mood(&mut self, mood: MoodKind) {
        self.transition_to(mood, "manual override");
    }

    /// Manual override: adjust energy, clamped to [0, 1].
    pub fn nudge_energy(&mut self, delta: f64) {
        self.affect.energy = (self.affect.energy + delta).clamp(0.0, 1.0);
        tracing::debug!("energy nudged to {:.2}", self.affect.energy);
    }

    /// Per-tick projection of mood-dependent animation parameters.
    pub fn mood_view(&self) -> MoodView {
        let profile = self.affect.mood.profile();
        MoodView {
            mood: self.affect.mood,
            energy: self.affect.energy,
            pulse_speed: profile.pulse_speed * self.affect.energy * self.pulse_multiplier,
            move_speed: profile.move_speed * self.affect.energy * self.move_multiplier,
            palette: profile.palette,
        }
    }
}
