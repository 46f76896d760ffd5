use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WispConfig {
    pub brain: BrainConfig,
    pub motion: MotionConfig,
    pub physics: PhysicsConfig,
    pub sensory: SensoryConfig,
    pub visual: VisualConfig,
    pub engine: EngineConfig,
}

impl WispConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// fields. After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: WispConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env
    /// overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("WISP_SEED") {
            if let Ok(n) = v.parse() {
                self.engine.seed = Some(n);
            }
        }
        if let Ok(v) = std::env::var("WISP_FPS") {
            if let Ok(n) = v.parse() {
                self.engine.fps = n;
            }
        }
        if let Ok(v) = std::env::var("WISP_INITIAL_MOOD") {
            self.brain.initial_mood = v;
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrainConfig {
    /// Parsed leniently; unknown strings fall back to calm.
    pub initial_mood: String,
    pub initial_energy: f64,
    pub initial_curiosity: f64,
    /// Global multiplier on per-mood pulse speed.
    pub pulse_multiplier: f64,
    /// Global multiplier on per-mood move speed.
    pub move_multiplier: f64,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            initial_mood: "calm".to_string(),
            initial_energy: 0.5,
            initial_curiosity: 0.7,
            pulse_multiplier: 1.0,
            move_multiplier: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Noise-field offset advance per tick.
    pub noise_step: f64,
    /// Reflective-orbit radius as a fraction of the smaller canvas dimension.
    pub orbit_fraction: f64,
    /// Reflective-orbit angular speed, radians/second.
    pub orbit_speed: f64,
    /// Sad-mood downward drift per tick, in canvas units.
    pub sink_rate: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            noise_step: 0.01,
            orbit_fraction: 0.3,
            orbit_speed: 0.5,
            sink_rate: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Spring constant toward the target, per reference frame.
    pub accel: f64,
    /// Velocity retained per reference frame, in (0, 1).
    pub friction: f64,
    /// Velocity fraction kept (and inverted) on boundary collision.
    pub bounce: f64,
    /// Frame rate the constants above are calibrated against.
    pub reference_fps: f64,
    /// Hard cap on delta_time to survive stalls, seconds.
    pub max_dt: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            accel: 0.01,
            friction: 0.95,
            bounce: 0.7,
            reference_fps: 60.0,
            max_dt: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SensoryConfig {
    /// Pointer speed divisor: speed/divisor, clamped, is the activity scalar.
    pub mouse_sensitivity_divisor: f64,
    /// Gain applied to the changed-pixel fraction.
    pub visual_change_gain: f64,
    /// Per-pixel luminance delta (0-255) counted as change.
    pub luma_threshold: u8,
    /// Side length of the pointer-following active zone.
    pub active_zone_size: f64,
    /// Mouse activity decays after this much pointer silence, seconds.
    pub mouse_decay_after: f64,
    /// Linear mouse-activity decay rate, per second.
    pub mouse_decay_rate: f64,
    /// Continuous visual-change decay rate, per second.
    pub visual_decay_rate: f64,
}

impl Default for SensoryConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity_divisor: 30.0,
            visual_change_gain: 10.0,
            luma_threshold: 25,
            active_zone_size: 100.0,
            mouse_decay_after: 0.5,
            mouse_decay_rate: 0.5,
            visual_decay_rate: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    pub base_radius: f64,
    /// Hard cap on the live particle set.
    pub max_particles: usize,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            base_radius: 30.0,
            max_particles: 256,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tick rate for the companion runtime.
    pub fps: u32,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            seed: None,
            canvas_width: 1920.0,
            canvas_height: 1080.0,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = WispConfig::default();
        assert_eq!(cfg.physics.friction, 0.95);
        assert_eq!(cfg.physics.bounce, 0.7);
        assert_eq!(cfg.sensory.mouse_sensitivity_divisor, 30.0);
        assert_eq!(cfg.visual.base_radius, 30.0);
        assert_eq!(cfg.engine.fps, 60);
        assert!(cfg.engine.seed.is_none());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[brain]
initial_mood = "curious"
initial_energy = 0.8
"#;
        let cfg: WispConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.brain.initial_mood, "curious");
        assert_eq!(cfg.brain.initial_energy, 0.8);
        // Defaults for unspecified fields
        assert_eq!(cfg.brain.initial_curiosity, 0.7);
        assert_eq!(cfg.physics.friction, 0.95);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[brain]
initial_mood = "sleepy"
pulse_multiplier = 2.0

[physics]
accel = 0.02
friction = 0.9
bounce = 0.5
max_dt = 0.05

[sensory]
mouse_sensitivity_divisor = 15.0
luma_threshold = 40

[visual]
base_radius = 45.0
max_particles = 64

[engine]
fps = 30
seed = 1234
canvas_width = 2560.0
canvas_height = 1440.0
"#;
        let cfg: WispConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.brain.pulse_multiplier, 2.0);
        assert_eq!(cfg.physics.accel, 0.02);
        assert_eq!(cfg.physics.max_dt, 0.05);
        assert_eq!(cfg.sensory.luma_threshold, 40);
        assert_eq!(cfg.visual.max_particles, 64);
        assert_eq!(cfg.engine.seed, Some(1234));
        assert_eq!(cfg.engine.canvas_width, 2560.0);
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        std::env::set_var("WISP_SEED", "42");
        std::env::set_var("WISP_INITIAL_MOOD", "excited");

        let mut cfg = WispConfig::default();
        cfg.apply_env_overrides();
        assert_eq!(cfg.engine.seed, Some(42));
        assert_eq!(cfg.brain.initial_mood, "excited");

        std::env::remove_var("WISP_SEED");
        std::env::remove_var("WISP_INITIAL_MOOD");

        let cfg = WispConfig::load_or_default("/nonexistent/path.toml");
        assert_eq!(cfg.engine.fps, 60);
    }
}
