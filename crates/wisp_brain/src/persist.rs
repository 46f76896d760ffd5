//! Affect state export/import.
//!
//! The on-disk schema is deliberately loose: every field is optional so a
//! snapshot written by an older build (or edited by hand) still loads.
//! Missing fields keep the engine's current values, an unrecognized mood
//! string falls back to calm, and an oversized history is truncated to the
//! newest entries. Only malformed JSON is reported as an error.
//!
//! `last_activity` crosses process restarts, so it is exported as a unix
//! timestamp and mapped back onto the engine clock on import. History record
//! timestamps stay on the engine clock of the run that produced them.

use serde::{Deserialize, Serialize};
use wisp_core::{sanitize_f64, ActivityRecord, MoodKind, HISTORY_CAPACITY};

use crate::engine::AffectEngine;

/// Current wall clock as fractional unix seconds, for anchoring exports.
pub fn unix_now() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("malformed affect snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Serialized affect snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrainState {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub curiosity: Option<f64>,
    /// Unix timestamp (seconds) of the last observed user activity.
    #[serde(default)]
    pub last_activity: Option<f64>,
    #[serde(default)]
    pub activity_history: Option<Vec<ActivityRecord>>,
}

impl AffectEngine {
    /// Snapshot the affect state for persistence.
    ///
    /// `engine_now` is the current engine clock, `unix_now` the matching
    /// wall-clock unix timestamp; the pair anchors `last_activity` across
    /// restarts.
    pub fn export(&self, engine_now: f64, unix_now: f64) -> BrainState {
        let affect = self.current();
        BrainState {
            mood: Some(affect.mood.as_str().to_owned()),
            energy: Some(affect.energy),
            curiosity: Some(affect.curiosity),
            last_activity: Some(unix_now - (engine_now - affect.last_activity)),
            activity_history: Some(self.history().iter().cloned().collect()),
        }
    }

    pub fn export_json(&self, engine_now: f64, unix_now: f64) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.export(engine_now, unix_now))
    }

    /// Restore a previously exported snapshot.
    ///
    /// Tolerant by design: any field missing from `state` keeps the current
    /// value, and out-of-range numbers are clamped. Never panics.
    pub fn import(&mut self, state: BrainState, engine_now: f64, unix_now: f64) {
        if let Some(mood) = state.mood {
            self.force_mood(MoodKind::parse_lenient(&mood));
        }
        {
            let affect = self.affect_mut();
            if let Some(energy) = state.energy {
                affect.energy = sanitize_f64(energy, affect.energy);
            }
            if let Some(curiosity) = state.curiosity {
                affect.curiosity = sanitize_f64(curiosity, affect.curiosity);
            }
            if let Some(last_unix) = state.last_activity {
                // Map the stored wall-clock instant back onto the engine clock.
                affect.last_activity = engine_now - (unix_now - last_unix);
            }
            affect.normalize();
        }
        if let Some(mut records) = state.activity_history {
            if records.len() > HISTORY_CAPACITY {
                let skip = records.len() - HISTORY_CAPACITY;
                records.drain(..skip);
            }
            self.history_mut().replace(records);
        }
        tracing::info!(
            "imported affect snapshot: mood {}, energy {:.2}",
            self.current().mood,
            self.current().energy
        );
    }

    pub fn import_json(
        &mut self,
        json: &str,
        engine_now: f64,
        unix_now: f64,
    ) -> Result<(), ImportError> {
        let state: BrainState = serde_json::from_str(json)?;
        self.import(state, engine_now, unix_now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wisp_core::BrainConfig;

    fn engine() -> AffectEngine {
        AffectEngine::new(&BrainConfig::default(), 0.0)
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut source = engine();
        source.force_mood(MoodKind::Reflective);
        source.nudge_energy(0.3);
        let json = source.export_json(100.0, 1_700_000_100.0).unwrap();

        let mut target = engine();
        target.import_json(&json, 5.0, 1_700_000_105.0).unwrap();
        assert_eq!(target.current().mood, MoodKind::Reflective);
        assert!((target.current().energy - 0.8).abs() < 1e-9);
        // Source activity was at its engine time 0, i.e. unix T. The target
        // imports at engine 5 / unix T+105, so that instant maps to -100.
        assert!((target.current().last_activity + 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_import_missing_fields_keeps_current_values() {
        let mut brain = engine();
        brain.nudge_energy(0.25); // 0.75
        brain.import_json(r#"{"mood": "sad"}"#, 0.0, 0.0).unwrap();
        assert_eq!(brain.current().mood, MoodKind::Sad);
        assert!((brain.current().energy - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_import_unknown_mood_falls_back_to_calm() {
        let mut brain = engine();
        brain.force_mood(MoodKind::Excited);
        brain
            .import_json(r#"{"mood": "jubilant"}"#, 0.0, 0.0)
            .unwrap();
        assert_eq!(brain.current().mood, MoodKind::Calm);
    }

    #[test]
    fn test_import_clamps_out_of_range_energy() {
        let mut brain = engine();
        brain
            .import_json(r#"{"energy": 42.0, "curiosity": -3.0}"#, 0.0, 0.0)
            .unwrap();
        assert_eq!(brain.current().energy, 1.0);
        assert_eq!(brain.current().curiosity, 0.0);
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        let mut brain = engine();
        assert!(brain.import_json("{not json", 0.0, 0.0).is_err());
        // State untouched after the failure.
        assert_eq!(brain.current().mood, MoodKind::Calm);
    }

    #[test]
    fn test_import_truncates_oversized_history() {
        let mut brain = engine();
        let records: Vec<ActivityRecord> = (0..150)
            .map(|i| ActivityRecord {
                timestamp: i as f64,
                snapshot: Default::default(),
                resulting_mood: MoodKind::Calm,
                resulting_energy: 0.5,
            })
            .collect();
        brain.import(
            BrainState {
                activity_history: Some(records),
                ..Default::default()
            },
            0.0,
            0.0,
        );
        assert_eq!(brain.history().len(), 100);
        // Newest entries survive.
        assert_eq!(brain.history().newest().unwrap().timestamp, 149.0);
    }

    #[test]
    fn test_import_empty_object_is_a_noop() {
        let mut brain = engine();
        let before = brain.current().clone();
        brain.import_json("{}", 0.0, 0.0).unwrap();
        assert_eq!(brain.current().mood, before.mood);
        assert_eq!(brain.current().energy, before.energy);
        assert_eq!(brain.current().curiosity, before.curiosity);
    }
}
