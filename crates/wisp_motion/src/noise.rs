//! Band-limited value noise for organic drift.
//!
//! A [`NoiseChannel`] interpolates a seeded lattice of random values with
//! three octaves, giving smooth non-repeating motion in roughly [-1, 1]. Two
//! independently seeded channels form a [`DriftField`] whose offset advances
//! a small step per tick.

use glam::DVec2;
use rand::Rng;

const LATTICE_SIZE: usize = 256;
const LATTICE_MASK: usize = LATTICE_SIZE - 1;
const OCTAVES: u32 = 3;

/// One seeded scalar noise generator.
#[derive(Debug, Clone)]
pub struct NoiseChannel {
    lattice: [f64; LATTICE_SIZE],
}

impl NoiseChannel {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut lattice = [0.0; LATTICE_SIZE];
        for slot in lattice.iter_mut() {
            *slot = rng.gen_range(-1.0..=1.0);
        }
        Self { lattice }
    }

    /// One octave: smoothstep interpolation between lattice neighbors.
    fn octave(&self, t: f64) -> f64 {
        let cell = t.floor();
        let frac = t - cell;
        let i = (cell as i64).rem_euclid(LATTICE_SIZE as i64) as usize;
        let a = self.lattice[i];
        let b = self.lattice[(i + 1) & LATTICE_MASK];
        let s = frac * frac * (3.0 - 2.0 * frac);
        a + (b - a) * s
    }

    /// Sample the channel at `t`. Output stays within [-1, 1].
    pub fn sample(&self, t: f64) -> f64 {
        let mut sum = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut norm = 0.0;
        for _ in 0..OCTAVES {
            sum += self.octave(t * frequency) * amplitude;
            norm += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        sum / norm
    }
}

/// Two decorrelated noise channels advanced together, one per axis.
#[derive(Debug, Clone)]
pub struct DriftField {
    x: NoiseChannel,
    y: NoiseChannel,
    offset: f64,
    step: f64,
}

impl DriftField {
    pub fn new<R: Rng>(step: f64, rng: &mut R) -> Self {
        Self {
            x: NoiseChannel::new(rng),
            y: NoiseChannel::new(rng),
            offset: rng.gen_range(0.0..(LATTICE_SIZE as f64)),
            step,
        }
    }

    /// Advance the offset one tick and sample both axes.
    pub fn advance(&mut self) -> DVec2 {
        self.offset += self.step;
        DVec2::new(self.x.sample(self.offset), self.y.sample(self.offset))
    }
}
