//! Mood model: the closed set of affective states and their static properties.
//!
//! Every mood carries a fixed profile (animation speeds, palette, optional
//! particle template). Movement policies, particle spawning and decorations
//! all dispatch on `MoodKind`, so the compiler checks exhaustiveness whenever
//! a mood is added.

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed enumeration of companion moods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoodKind {
    Calm,
    Curious,
    Excited,
    Alert,
    Annoyed,
    Sad,
    Sleepy,
    Reflective,
}

impl MoodKind {
    /// All moods, in declaration order. Used for uniform random drift.
    pub const ALL: [MoodKind; 8] = [
        MoodKind::Calm,
        MoodKind::Curious,
        MoodKind::Excited,
        MoodKind::Alert,
        MoodKind::Annoyed,
        MoodKind::Sad,
        MoodKind::Sleepy,
        MoodKind::Reflective,
    ];

    /// Static profile for this mood.
    pub fn profile(self) -> &'static MoodProfile {
        &PROFILES[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoodKind::Calm => "calm",
            MoodKind::Curious => "curious",
            MoodKind::Excited => "excited",
            MoodKind::Alert => "alert",
            MoodKind::Annoyed => "annoyed",
            MoodKind::Sad => "sad",
            MoodKind::Sleepy => "sleepy",
            MoodKind::Reflective => "reflective",
        }
    }
}

impl Default for MoodKind {
    fn default() -> Self {
        MoodKind::Calm
    }
}

impl fmt::Display for MoodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodKind {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calm" => Ok(MoodKind::Calm),
            "curious" => Ok(MoodKind::Curious),
            "excited" => Ok(MoodKind::Excited),
            "alert" => Ok(MoodKind::Alert),
            "annoyed" => Ok(MoodKind::Annoyed),
            "sad" => Ok(MoodKind::Sad),
            "sleepy" => Ok(MoodKind::Sleepy),
            "reflective" => Ok(MoodKind::Reflective),
            other => Err(UnknownMood(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown mood: {0}")]
pub struct UnknownMood(pub String);

impl MoodKind {
    /// Parse leniently: unknown strings fall back to `calm`.
    pub fn parse_lenient(s: &str) -> MoodKind {
        s.parse().unwrap_or_else(|e: UnknownMood| {
            tracing::warn!("{}, falling back to calm", e);
            MoodKind::Calm
        })
    }
}

/// Static per-mood properties.
#[derive(Debug, Clone)]
pub struct MoodProfile {
    /// Base pulse speed (radians advanced per reference frame), before the
    /// energy and global multipliers are applied.
    pub pulse_speed: f64,
    /// Base movement speed multiplier.
    pub move_speed: f64,
    /// Ordered gradient palette, at least 3 entries.
    pub palette: &'static [Color],
    /// Particle template; moods without one never spawn particles.
    pub particles: Option<ParticleTemplate>,
}

/// Spawn parameters for a mood's particle effect.
#[derive(Debug, Clone, Copy)]
pub struct ParticleTemplate {
    /// Expected spawn rate factor: the per-tick spawn probability is
    /// `count * dt * energy`, drawn once (at most one spawn per tick).
    pub count: f64,
    /// Outward speed at the rim, units/second.
    pub speed: f64,
    /// Base particle size.
    pub size: f64,
    /// Base lifespan in seconds.
    pub lifespan: f64,
    /// Colors drawn uniformly per spawn.
    pub palette: &'static [Color],
}

const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

const EXCITED_PALETTE: [Color; 3] = [
    Color::rgb(0xFF, 0xEA, 0x00),
    Color::rgb(0xFF, 0x57, 0x22),
    Color::rgb(0xFF, 0x98, 0x00),
];
const CURIOUS_PALETTE: [Color; 3] = [
    Color::rgb(0x03, 0xA9, 0xF4),
    Color::rgb(0x4C, 0xAF, 0x50),
    Color::rgb(0x00, 0xBC, 0xD4),
];
const CALM_PALETTE: [Color; 3] = [
    Color::rgb(0x3F, 0x51, 0xB5),
    Color::rgb(0x9C, 0x27, 0xB0),
    Color::rgb(0x00, 0xBC, 0xD4),
];
const SLEEPY_PALETTE: [Color; 3] = [
    Color::rgb(0x5C, 0x6B, 0xC0),
    Color::rgb(0x79, 0x86, 0xCB),
    Color::rgb(0x9F, 0xA8, 0xDA),
];
const ALERT_PALETTE: [Color; 3] = [
    Color::rgb(0xF4, 0x43, 0x36),
    WHITE,
    Color::rgb(0xF4, 0x43, 0x36),
];
const ANNOYED_PALETTE: [Color; 3] = [
    Color::rgb(0xF4, 0x43, 0x36),
    Color::rgb(0xFF, 0xEB, 0x3B),
    Color::rgb(0xF4, 0x43, 0x36),
];
const SAD_PALETTE: [Color; 3] = [
    Color::rgb(0x1A, 0x23, 0x7E),
    Color::rgb(0x30, 0x3F, 0x9F),
    Color::rgb(0x39, 0x49, 0xAB),
];
const REFLECTIVE_PALETTE: [Color; 3] = [
    Color::rgb(0x9E, 0x9E, 0x9E),
    Color::rgb(0xBD, 0xBD, 0xBD),
    Color::rgb(0xE0, 0xE0, 0xE0),
];

const SPARK_PALETTE: [Color; 2] = [WHITE, Color::rgb(0xFF, 0xEA, 0x00)];
const DROP_PALETTE: [Color; 2] = [Color::rgb(0x30, 0x3F, 0x9F), Color::rgb(0x64, 0x78, 0xC8)];
const BUBBLE_PALETTE: [Color; 2] = [Color::rgb(0xE0, 0xE0, 0xE0), WHITE];

/// Indexed by `MoodKind as usize` (declaration order).
static PROFILES: [MoodProfile; 8] = [
    // Calm: gentle drift, no particles.
    MoodProfile {
        pulse_speed: 0.008,
        move_speed: 0.7,
        palette: &CALM_PALETTE,
        particles: None,
    },
    // Curious: orbit-ish, sparse blue motes.
    MoodProfile {
        pulse_speed: 0.015,
        move_speed: 1.8,
        palette: &CURIOUS_PALETTE,
        particles: Some(ParticleTemplate {
            count: 1.5,
            speed: 20.0,
            size: 2.5,
            lifespan: 1.5,
            palette: &CURIOUS_PALETTE,
        }),
    },
    // Excited: fast pulse, bright sparks.
    MoodProfile {
        pulse_speed: 0.03,
        move_speed: 2.5,
        palette: &EXCITED_PALETTE,
        particles: Some(ParticleTemplate {
            count: 4.0,
            speed: 45.0,
            size: 3.0,
            lifespan: 0.8,
            palette: &SPARK_PALETTE,
        }),
    },
    // Alert: sharp pulse, red flecks.
    MoodProfile {
        pulse_speed: 0.05,
        move_speed: 3.0,
        palette: &ALERT_PALETTE,
        particles: Some(ParticleTemplate {
            count: 3.0,
            speed: 35.0,
            size: 2.0,
            lifespan: 0.6,
            palette: &ALERT_PALETTE,
        }),
    },
    // Annoyed: jittery, hot flecks.
    MoodProfile {
        pulse_speed: 0.04,
        move_speed: 2.0,
        palette: &ANNOYED_PALETTE,
        particles: Some(ParticleTemplate {
            count: 2.5,
            speed: 30.0,
            size: 2.0,
            lifespan: 0.5,
            palette: &ANNOYED_PALETTE,
        }),
    },
    // Sad: slow, falling drops.
    MoodProfile {
        pulse_speed: 0.005,
        move_speed: 0.5,
        palette: &SAD_PALETTE,
        particles: Some(ParticleTemplate {
            count: 1.0,
            speed: 12.0,
            size: 2.5,
            lifespan: 2.0,
            palette: &DROP_PALETTE,
        }),
    },
    // Sleepy: barely moving, no particles.
    MoodProfile {
        pulse_speed: 0.004,
        move_speed: 0.3,
        palette: &SLEEPY_PALETTE,
        particles: None,
    },
    // Reflective: slow orbit, rising bubbles.
    MoodProfile {
        pulse_speed: 0.01,
        move_speed: 1.0,
        palette: &REFLECTIVE_PALETTE,
        particles: Some(ParticleTemplate {
            count: 0.8,
            speed: 10.0,
            size: 3.5,
            lifespan: 2.5,
            palette: &BUBBLE_PALETTE,
        }),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_indexed_by_discriminant() {
        // The table must line up with the enum declaration order.
        assert_eq!(MoodKind::Calm.profile().move_speed, 0.7);
        assert_eq!(MoodKind::Excited.profile().move_speed, 2.5);
        assert_eq!(MoodKind::Alert.profile().pulse_speed, 0.05);
        assert_eq!(MoodKind::Reflective.profile().pulse_speed, 0.01);
    }

    #[test]
    fn test_all_palettes_have_at_least_three_colors() {
        for mood in MoodKind::ALL {
            assert!(
                mood.profile().palette.len() >= 3,
                "{mood} palette too short"
            );
        }
    }

    #[test]
    fn test_templates_have_nonempty_palettes() {
        for mood in MoodKind::ALL {
            if let Some(tpl) = mood.profile().particles {
                assert!(tpl.count > 0.0);
                assert!(tpl.speed > 0.0);
                assert!(tpl.lifespan > 0.0);
                assert!(!tpl.palette.is_empty(), "{mood} template has no colors");
            }
        }
    }

    #[test]
    fn test_calm_and_sleepy_emit_no_particles() {
        assert!(MoodKind::Calm.profile().particles.is_none());
        assert!(MoodKind::Sleepy.profile().particles.is_none());
    }

    #[test]
    fn test_roundtrip_str() {
        for mood in MoodKind::ALL {
            assert_eq!(mood.as_str().parse::<MoodKind>().unwrap(), mood);
        }
    }

    #[test]
    fn test_parse_lenient_unknown_falls_back_to_calm() {
        assert_eq!(MoodKind::parse_lenient("ecstatic"), MoodKind::Calm);
        assert_eq!(MoodKind::parse_lenient(""), MoodKind::Calm);
        assert_eq!(MoodKind::parse_lenient("alert"), MoodKind::Alert);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&MoodKind::Reflective).unwrap();
        assert_eq!(json, "\"reflective\"");
        let back: MoodKind = serde_json::from_str("\"sleepy\"").unwrap();
        assert_eq!(back, MoodKind::Sleepy);
    }
}
