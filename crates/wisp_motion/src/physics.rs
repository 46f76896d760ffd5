//! Spring/friction integration of the body toward its target.
//!
//! Semi-implicit Euler with all rates normalized to a reference frame rate,
//! so a 30 Hz headless run traces the same path as a 144 Hz desktop session.

use glam::DVec2;
use wisp_core::{KinematicState, PhysicsConfig};

#[derive(Debug, Clone)]
pub struct PhysicsIntegrator {
    config: PhysicsConfig,
    canvas: DVec2,
}

impl PhysicsIntegrator {
    pub fn new(config: PhysicsConfig, canvas: DVec2) -> Self {
        Self { config, canvas }
    }

    pub fn set_canvas(&mut self, canvas: DVec2) {
        self.canvas = canvas;
    }

    /// Advance position and velocity by `dt` seconds.
    ///
    /// `dt` is capped at `max_dt` so a stall (minimized window, suspended
    /// laptop) cannot blow up the integration when ticks resume.
    pub fn integrate(&self, body: &mut KinematicState, dt: f64) {
        self.integrate_scaled(body, dt, 1.0);
    }

    /// As [`integrate`](Self::integrate), with the mood's move speed scaling
    /// the spring pull toward the target.
    pub fn integrate_scaled(&self, body: &mut KinematicState, dt: f64, move_speed: f64) {
        let dt = dt.clamp(0.0, self.config.max_dt);
        let frames = dt * self.config.reference_fps;

        let accel = (body.target - body.position) * self.config.accel * move_speed * frames;
        body.velocity = (body.velocity + accel) * self.config.friction.powf(frames);
        body.position += body.velocity * frames;

        let (px, vx) = bounce_1d(
            body.position.x,
            body.velocity.x,
            body.radius,
            self.canvas.x,
            self.config.bounce,
        );
        let (py, vy) = bounce_1d(
            body.position.y,
            body.velocity.y,
            body.radius,
            self.canvas.y,
            self.config.bounce,
        );
        body.position = DVec2::new(px, py);
        body.velocity = DVec2::new(vx, vy);
    }
}

/// Inelastic boundary bounce on one axis: clamp into `[radius, dim - radius]`
/// and invert the velocity component scaled by the bounce factor.
fn bounce_1d(pos: f64, vel: f64, radius: f64, dim: f64, bounce: f64) -> (f64, f64) {
    if pos < radius {
        (radius, -vel * bounce)
    } else if pos > dim - radius {
        (dim - radius, -vel * bounce)
    } else {
        (pos, vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: DVec2 = DVec2::new(1920.0, 1080.0);

    fn body() -> KinematicState {
        KinematicState::centered(CANVAS, 30.0)
    }

    #[test]
    fn test_body_accelerates_toward_target() {
        let physics = PhysicsIntegrator::new(PhysicsConfig::default(), CANVAS);
        let mut body = body();
        body.target = DVec2::new(1400.0, 540.0);
        let start = body.position;
        for _ in 0..120 {
            physics.integrate(&mut body, 1.0 / 60.0);
        }
        assert!(body.position.x > start.x);
        assert!((body.position.y - start.y).abs() < 1e-6);
    }

    #[test]
    fn test_body_settles_on_target() {
        let physics = PhysicsIntegrator::new(PhysicsConfig::default(), CANVAS);
        let mut body = body();
        body.target = DVec2::new(700.0, 300.0);
        for _ in 0..5_000 {
            physics.integrate(&mut body, 1.0 / 60.0);
        }
        assert!(body.position.distance(body.target) < 1.0);
        assert!(body.velocity.length() < 0.1);
    }

    #[test]
    fn test_bounce_is_inelastic() {
        // Friction 1.0 and the target on the start position isolate the
        // collision response.
        let config = PhysicsConfig {
            friction: 1.0,
            ..Default::default()
        };
        let physics = PhysicsIntegrator::new(config, CANVAS);
        let mut body = body();
        let radius = body.radius;
        body.set_position(DVec2::new(radius - 5.0, 540.0));
        body.target = body.position;
        body.velocity = DVec2::new(-2.0, 0.0);

        physics.integrate(&mut body, 1.0 / 60.0);
        assert_eq!(body.position.x, radius);
        assert!((body.velocity.x - 1.4).abs() < 1e-9, "vx = -0.7 × -2.0");
    }

    #[test]
    fn test_bounce_on_far_edge() {
        let config = PhysicsConfig {
            friction: 1.0,
            ..Default::default()
        };
        let physics = PhysicsIntegrator::new(config, CANVAS);
        let mut body = body();
        let radius = body.radius;
        body.set_position(DVec2::new(960.0, CANVAS.y - radius + 3.0));
        body.target = body.position;
        body.velocity = DVec2::new(0.0, 5.0);

        physics.integrate(&mut body, 1.0 / 60.0);
        assert_eq!(body.position.y, CANVAS.y - radius);
        assert!((body.velocity.y + 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_dt_is_capped() {
        let physics = PhysicsIntegrator::new(PhysicsConfig::default(), CANVAS);
        let mut capped = body();
        let mut stalled = body();
        capped.target = DVec2::new(1800.0, 1000.0);
        stalled.target = capped.target;

        physics.integrate(&mut capped, 0.1);
        physics.integrate(&mut stalled, 30.0);
        assert_eq!(capped.position, stalled.position);
        assert_eq!(capped.velocity, stalled.velocity);
    }

    #[test]
    fn test_zero_dt_is_a_noop() {
        let physics = PhysicsIntegrator::new(PhysicsConfig::default(), CANVAS);
        let mut body = body();
        body.target = DVec2::new(100.0, 100.0);
        let before = body.position;
        physics.integrate(&mut body, 0.0);
        assert_eq!(body.position, before);
    }

    #[test]
    fn test_move_speed_scales_the_pull() {
        let physics = PhysicsIntegrator::new(PhysicsConfig::default(), CANVAS);
        let mut brisk = body();
        let mut lazy = body();
        brisk.target = DVec2::new(1500.0, 540.0);
        lazy.target = brisk.target;
        for _ in 0..60 {
            physics.integrate_scaled(&mut brisk, 1.0 / 60.0, 2.5);
            physics.integrate_scaled(&mut lazy, 1.0 / 60.0, 0.3);
        }
        assert!(brisk.position.distance(brisk.target) < lazy.position.distance(lazy.target));
    }

    #[test]
    fn test_rate_independence_of_direction() {
        // Same wall time at 30 Hz vs 60 Hz lands in the same neighborhood.
        let physics = PhysicsIntegrator::new(PhysicsConfig::default(), CANVAS);
        let mut fast = body();
        let mut slow = body();
        fast.target = DVec2::new(1500.0, 200.0);
        slow.target = fast.target;

        for _ in 0..240 {
            physics.integrate(&mut fast, 1.0 / 60.0);
        }
        for _ in 0..120 {
            physics.integrate(&mut slow, 1.0 / 30.0);
        }
        assert!(fast.position.distance(slow.position) < 40.0);
    }
}
