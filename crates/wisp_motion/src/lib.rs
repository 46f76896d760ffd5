//! # Wisp Motion
//!
//! Movement of the companion body: [`MotionPlanner`] picks a per-mood target
//! each tick (wander, pointer pursuit, zone homing, sinking, orbiting) driven
//! by a seeded band-limited noise field, and [`PhysicsIntegrator`] chases the
//! target with a frame-rate-independent spring/friction step and inelastic
//! boundary bounces.

mod noise;
mod physics;
mod planner;

pub use noise::{DriftField, NoiseChannel};
pub use physics::PhysicsIntegrator;
pub use planner::MotionPlanner;
