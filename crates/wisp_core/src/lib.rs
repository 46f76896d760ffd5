//! # Wisp Core
//!
//! Shared data model for the Wisp companion engine: the mood enumeration and
//! its static profiles, clamped affect state, bounded activity history, zone
//! rectangles, per-tick sensory snapshots, colors and configuration.
//!
//! Everything here is plain data with invariants enforced at mutation time;
//! the behavioral crates (`wisp_senses`, `wisp_brain`, `wisp_motion`,
//! `wisp_visuals`) build on these types and `wisp_engine` wires them into the
//! tick loop.

pub mod color;
pub mod config;
pub mod mood;
pub mod snapshot;
pub mod state;
pub mod zone;

pub use color::{palette_at_phase, Color};
pub use config::{
    BrainConfig, EngineConfig, MotionConfig, PhysicsConfig, SensoryConfig, VisualConfig, WispConfig,
};
pub use mood::{MoodKind, MoodProfile, ParticleTemplate, UnknownMood};
pub use snapshot::{PointerSample, SensorySnapshot, WindowInfo};
pub use state::{
    sanitize_f64, ActivityHistory, ActivityRecord, AffectState, KinematicState, HISTORY_CAPACITY,
};
pub use zone::{Zone, ZoneId, ZoneSet};
