//! Mood decorations: pure functions of `(position, radius, time, mood)`.
//!
//! These are render hints, not entities. Nothing here holds state between
//! ticks; the same inputs always produce the same geometry, which keeps the
//! engine deterministic and the render layer trivially cacheable.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use wisp_core::MoodKind;

const SPARK_COUNT: usize = 5;
const SPARK_ORBIT: f64 = 1.5;
const RING_BASE: f64 = 1.2;
const RING_SWING: f64 = 0.2;
const ORBITER_COUNT: usize = 3;
const ORBITER_ORBIT: f64 = 1.3;
const TEARDROP_COUNT: usize = 3;
const TEARDROP_FALL: f64 = 60.0;
const BUBBLE_COUNT: usize = 4;
const BUBBLE_RISE: f64 = 80.0;
const TICK_COUNT: usize = 8;

/// One render-ready decoration primitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Decoration {
    /// Sparkle point trailing an excited body.
    Spark { position: DVec2, size: f64 },
    /// Pulsing ring centered on the body; `radius` is absolute.
    Ring { radius: f64, alpha: f64 },
    /// Tethered satellite circling a curious body.
    Orbiter { position: DVec2, size: f64 },
    /// Falling drop below a sad body; `alpha` fades as it falls.
    Teardrop { position: DVec2, size: f64, alpha: f64 },
    /// Rising bubble above a reflective body; `alpha` fades as it climbs.
    Bubble { position: DVec2, size: f64, alpha: f64 },
    /// Radial tick segment around an annoyed body.
    TickMark { from: DVec2, to: DVec2 },
}

/// Compute this tick's decorations. `now` is engine time in seconds.
pub fn decorations(mood: MoodKind, position: DVec2, radius: f64, now: f64) -> Vec<Decoration> {
    match mood {
        MoodKind::Excited => sparks(position, radius, now),
        MoodKind::Alert => rings(radius, now),
        MoodKind::Curious => orbiters(position, radius, now),
        MoodKind::Sad => teardrops(position, radius, now),
        MoodKind::Reflective => bubbles(position, radius, now),
        MoodKind::Annoyed => tick_marks(position, radius, now),
        MoodKind::Calm | MoodKind::Sleepy => Vec::new(),
    }
}

fn sparks(position: DVec2, radius: f64, now: f64) -> Vec<Decoration> {
    (0..SPARK_COUNT)
        .map(|i| {
            let angle = now * 3.0 + i as f64 * TAU / SPARK_COUNT as f64;
            Decoration::Spark {
                position: position + DVec2::new(angle.cos(), angle.sin()) * radius * SPARK_ORBIT,
                size: 2.0 + ((now * 10.0 + i as f64).sin() + 1.0),
            }
        })
        .collect()
}

fn rings(radius: f64, now: f64) -> Vec<Decoration> {
    // Two rings breathing in antiphase.
    [0.0, std::f64::consts::PI]
        .into_iter()
        .map(|phase| {
            let swing = (now * 5.0 + phase).sin();
            Decoration::Ring {
                radius: radius * (RING_BASE + RING_SWING * swing),
                alpha: 0.5 + 0.3 * swing,
            }
        })
        .collect()
}

fn orbiters(position: DVec2, radius: f64, now: f64) -> Vec<Decoration> {
    (0..ORBITER_COUNT)
        .map(|i| {
            let angle = now * 2.0 + i as f64 * TAU / ORBITER_COUNT as f64;
            Decoration::Orbiter {
                position: position + DVec2::new(angle.cos(), angle.sin()) * radius * ORBITER_ORBIT,
                size: 3.0,
            }
        })
        .collect()
}

fn teardrops(position: DVec2, radius: f64, now: f64) -> Vec<Decoration> {
    (0..TEARDROP_COUNT)
        .map(|i| {
            let phase = (now * 20.0 + i as f64 * TEARDROP_FALL / TEARDROP_COUNT as f64)
                .rem_euclid(TEARDROP_FALL);
            let sway = ((now + i as f64 * 2.1).sin()) * radius * 0.3;
            Decoration::Teardrop {
                position: position + DVec2::new(sway, radius + phase),
                size: 2.5,
                alpha: 1.0 - phase / TEARDROP_FALL,
            }
        })
        .collect()
}

fn bubbles(position: DVec2, radius: f64, now: f64) -> Vec<Decoration> {
    (0..BUBBLE_COUNT)
        .map(|i| {
            let phase =
                (now * 15.0 + i as f64 * BUBBLE_RISE / BUBBLE_COUNT as f64).rem_euclid(BUBBLE_RISE);
            let sway = ((now * 1.3 + i as f64).cos()) * radius * 0.4;
            Decoration::Bubble {
                position: position + DVec2::new(sway, -(radius + phase)),
                size: 1.5 + i as f64 * 0.5,
                alpha: 1.0 - phase / BUBBLE_RISE,
            }
        })
        .collect()
}

fn tick_marks(position: DVec2, radius: f64, now: f64) -> Vec<Decoration> {
    // The whole dial twitches together rather than rotating smoothly.
    let twitch = (now * 8.0).sin() * 0.1;
    (0..TICK_COUNT)
        .map(|i| {
            let angle = i as f64 * TAU / TICK_COUNT as f64 + twitch;
            let dir = DVec2::new(angle.cos(), angle.sin());
            Decoration::TickMark {
                from: position + dir * radius * 1.1,
                to: position + dir * radius * 1.3,
            }
        })
        .collect()
}
