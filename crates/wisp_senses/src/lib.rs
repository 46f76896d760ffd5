//! # Wisp Senses
//!
//! Sensor fusion for the companion engine. Raw platform events (pointer
//! moves, clicks, downscaled screen frames, window-focus changes) are fused
//! into two decayed activity scalars and a zone classification, emitted once
//! per tick as a [`wisp_core::SensorySnapshot`].
//!
//! Fusion is a plain synchronous state machine over an explicit clock: the
//! async runtime drains its inbox into [`SensorFusion::sample`] and calls
//! [`SensorFusion::snapshot`] on the tick thread, so no locking happens here.

mod event;
mod fusion;
mod gesture;

pub use event::SensorEvent;
pub use fusion::SensorFusion;
pub use gesture::{GestureDetector, GestureKind};
