//! The mood-driven particle set.
//!
//! Spawning is a single Bernoulli draw per tick with probability
//! `template.count × dt × energy`. That is deliberately not a Poisson
//! process: at most one particle appears per tick, which is the visible
//! density the companion has always had. Do not "fix" it.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use wisp_core::{Color, KinematicState, MoodKind};

const VELOCITY_JITTER: f64 = 0.3;
const SIZE_JITTER: f64 = 0.3;
const LIFESPAN_JITTER: f64 = 0.2;

/// One live particle, plain data for the render layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub size: f64,
    /// Remaining life, seconds.
    pub life: f64,
    /// Life it was born with; lets renderers fade by `life / lifespan`.
    pub lifespan: f64,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    max_particles: usize,
}

impl ParticleSystem {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles.min(64)),
            max_particles,
        }
    }

    /// Advance all particles and maybe spawn one for the current mood.
    pub fn tick<R: Rng>(
        &mut self,
        dt: f64,
        mood: MoodKind,
        energy: f64,
        body: &KinematicState,
        rng: &mut R,
    ) {
        self.particles.retain_mut(|p| {
            p.position += p.velocity * dt;
            p.life -= dt;
            p.life > 0.0
        });

        let Some(template) = mood.profile().particles else {
            return;
        };
        if self.particles.len() >= self.max_particles {
            tracing::trace!("particle cap reached, skipping spawn");
            return;
        }
        let probability = (template.count * dt * energy).clamp(0.0, 1.0);
        if rng.gen::<f64>() >= probability {
            return;
        }

        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let rim = DVec2::new(angle.cos(), angle.sin());
        let speed = template.speed * jitter(rng, VELOCITY_JITTER);
        let color = template.palette[rng.gen_range(0..template.palette.len())];
        let lifespan = template.lifespan * jitter(rng, LIFESPAN_JITTER);
        self.particles.push(Particle {
            position: body.position + rim * body.radius,
            velocity: rim * speed,
            size: template.size * jitter(rng, SIZE_JITTER),
            life: lifespan,
            lifespan,
            color,
        });
    }

    /// Read-only snapshot for rendering.
    pub fn live_particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    #[cfg(test)]
    fn push_for_tests(&mut self, particle: Particle) {
        self.particles.push(particle);
    }
}

fn jitter<R: Rng>(rng: &mut R, fraction: f64) -> f64 {
    rng.gen_range(1.0 - fraction..=1.0 + fraction)
}
