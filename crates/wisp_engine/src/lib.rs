//! # Wisp Engine
//!
//! Wires the whole companion together. The synchronous [`Engine`] runs one
//! deterministic pipeline per tick: drain sensor events, fuse them into a
//! snapshot, update affect, plan and integrate motion, advance particles,
//! and emit a [`RenderFrame`]. The async [`Companion`] owns an engine on a
//! tokio tick task, accepts events through an mpsc inbox and broadcasts
//! frames on a watch channel.

mod engine;
mod frame;
mod runtime;

pub use engine::Engine;
pub use frame::RenderFrame;
pub use runtime::{Companion, TickConfig};
