//! # Wisp Brain
//!
//! The cognitive layer of the companion engine. [`AffectEngine`] owns the
//! affect state (mood, energy, curiosity) and evaluates a fixed-priority rule
//! set against each sensory snapshot: inactivity drains energy toward sleep,
//! pointer activity energizes and nudges mood by zone, notification stimuli
//! force alertness, and a small stochastic drift keeps long sessions from
//! freezing in one mood.
//!
//! All randomness flows through a caller-supplied [`rand::Rng`], so a seeded
//! generator makes whole sessions reproducible. [`MoodView`] projects the
//! state into animation parameters each tick; nothing derived is stored.

mod engine;
mod persist;

pub use engine::{AffectEngine, MoodView};
pub use persist::{unix_now, BrainState, ImportError};
