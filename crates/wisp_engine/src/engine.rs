//! The synchronous engine core: one call per tick, all state owned here.
//!
//! The async runtime wraps this, but everything behavioral is testable
//! without tokio: feed events, call [`Engine::tick`] with an explicit clock,
//! inspect the returned [`RenderFrame`].

use glam::DVec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wisp_brain::{AffectEngine, BrainState, ImportError};
use wisp_core::{palette_at_phase, KinematicState, MoodKind, WispConfig};
use wisp_motion::{MotionPlanner, PhysicsIntegrator};
use wisp_senses::{GestureDetector, GestureKind, SensorEvent, SensorFusion};
use wisp_visuals::{decorations, ParticleSystem};

use crate::frame::RenderFrame;

pub struct Engine {
    fusion: SensorFusion,
    gestures: GestureDetector,
    brain: AffectEngine,
    planner: MotionPlanner,
    physics: PhysicsIntegrator,
    particles: ParticleSystem,
    body: KinematicState,
    rng: StdRng,
    canvas: DVec2,
    last_tick: Option<f64>,
}

impl Engine {
    pub fn new(config: &WispConfig) -> Self {
        let canvas = DVec2::new(config.engine.canvas_width, config.engine.canvas_height);
        let seed = config.engine.seed.unwrap_or_else(rand::random);
        tracing::info!("engine rng seed: {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);

        Self {
            fusion: SensorFusion::new(config.sensory.clone(), canvas),
            gestures: GestureDetector::new(),
            brain: AffectEngine::new(&config.brain, 0.0),
            planner: MotionPlanner::new(config.motion.clone(), canvas, &mut rng),
            physics: PhysicsIntegrator::new(config.physics.clone(), canvas),
            particles: ParticleSystem::new(config.visual.max_particles),
            body: KinematicState::centered(canvas, config.visual.base_radius),
            rng,
            canvas,
            last_tick: None,
        }
    }

    /// Ingest one raw sensor event. Cheap, non-blocking, callable between
    /// ticks in any order.
    pub fn ingest(&mut self, event: SensorEvent) {
        self.fusion.sample(event);
    }

    /// Run one full tick at engine time `now` (seconds) and produce the frame.
    pub fn tick(&mut self, now: f64) -> RenderFrame {
        let dt = match self.last_tick {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_tick = Some(now);

        let snapshot = self.fusion.snapshot(now);
        if self.gestures.detect(&snapshot) != GestureKind::None {
            tracing::debug!("gesture recognized, no handler wired yet");
        }
        self.brain.update(&snapshot, now, &mut self.rng);
        let view = self.brain.mood_view();

        self.body.advance_pulse(view.pulse_speed, view.energy);
        let target = self.planner.plan_target(
            view.mood,
            &snapshot,
            &self.body,
            self.fusion.zones(),
            now,
            &mut self.rng,
        );
        self.body.target = target;
        self.physics
            .integrate_scaled(&mut self.body, dt, view.move_speed);
        self.particles
            .tick(dt, view.mood, view.energy, &self.body, &mut self.rng);

        self.render_frame(now)
    }

    fn render_frame(&self, now: f64) -> RenderFrame {
        let view = self.brain.mood_view();
        let current = palette_at_phase(view.palette, self.body.color_phase);
        let progress = self.brain.transition_progress();
        let color = if progress < 1.0 {
            let previous = palette_at_phase(
                self.brain.blend_from().profile().palette,
                self.body.color_phase,
            );
            previous.lerp(current, progress)
        } else {
            current
        };

        RenderFrame {
            position: self.body.position,
            radius: self.body.radius,
            pulse_phase: self.body.pulse_phase,
            color_phase: self.body.color_phase,
            mood: view.mood,
            color,
            energy: view.energy,
            mood_transition_progress: progress,
            particles: self.particles.live_particles().to_vec(),
            decorations: decorations(view.mood, self.body.position, self.body.radius, now),
            timestamp: now,
        }
    }

    // ========================================================================
    // Manual overrides
    // ========================================================================

    pub fn force_mood(&mut self, mood: MoodKind) {
        self.brain.force_mood(mood);
    }

    pub fn nudge_energy(&mut self, delta: f64) {
        self.brain.nudge_energy(delta);
    }

    /// Teleport the body; velocity and target are zeroed with it.
    pub fn set_position(&mut self, position: DVec2) {
        self.body.set_position(position);
    }

    /// Adopt a new canvas size, recentering the body if it fell outside.
    pub fn resize_canvas(&mut self, canvas: DVec2) {
        self.canvas = canvas;
        self.planner.set_canvas(canvas);
        self.physics.set_canvas(canvas);
        self.body.clamp_to_canvas(canvas);
    }

    // ========================================================================
    // State access and persistence
    // ========================================================================

    pub fn brain(&self) -> &AffectEngine {
        &self.brain
    }

    pub fn body(&self) -> &KinematicState {
        &self.body
    }

    pub fn canvas(&self) -> DVec2 {
        self.canvas
    }

    pub fn export_state(&self, unix_now: f64) -> BrainState {
        self.brain.export(self.last_tick.unwrap_or(0.0), unix_now)
    }

    pub fn export_state_json(&self, unix_now: f64) -> Result<String, serde_json::Error> {
        self.brain
            .export_json(self.last_tick.unwrap_or(0.0), unix_now)
    }

    pub fn import_state_json(&mut self, json: &str, unix_now: f64) -> Result<(), ImportError> {
        self.brain
            .import_json(json, self.last_tick.unwrap_or(0.0), unix_now)
    }
}
