//! # Wisp Visuals
//!
//! Render-facing state derived from affect: the bounded [`ParticleSystem`]
//! (mood-templated spawns, lifetime eviction) and stateless per-mood
//! [`Decoration`] geometry. Nothing here draws; the render collaborator
//! consumes plain data.

mod decor;
mod particles;

pub use decor::{decorations, Decoration};
pub use particles::{Particle, ParticleSystem};
