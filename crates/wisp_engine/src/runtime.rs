//! The async companion runtime.
//!
//! Sensor callbacks enqueue events into an mpsc inbox from any task; a single
//! spawned tick task owns all mutation, draining the inbox and running the
//! engine at a fixed cadence. Render layers subscribe to a watch channel and
//! always see the latest [`RenderFrame`] without blocking the tick.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch, RwLock};

use glam::DVec2;
use wisp_brain::ImportError;
use wisp_core::{AffectState, MoodKind, WispConfig};
use wisp_senses::SensorEvent;

use crate::engine::Engine;
use crate::frame::RenderFrame;

/// Cadence of the tick task.
#[derive(Debug, Clone)]
pub struct TickConfig {
    pub interval: Duration,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self::from_fps(60)
    }
}

impl TickConfig {
    pub fn from_fps(fps: u32) -> Self {
        let fps = fps.max(1);
        Self {
            interval: Duration::from_secs_f64(1.0 / fps as f64),
        }
    }

    /// High-refresh displays.
    pub fn fast() -> Self {
        Self::from_fps(120)
    }

    /// Resource-constrained environments.
    pub fn slow() -> Self {
        Self::from_fps(10)
    }

    /// Very fast cadence for tests.
    pub fn testing() -> Self {
        Self {
            interval: Duration::from_millis(1),
        }
    }
}

/// Handle to a running companion: enqueue events, subscribe to frames, poke
/// the overrides. Cloning the sensor sender is cheap; the tick task runs for
/// the life of the handle.
pub struct Companion {
    engine: Arc<RwLock<Engine>>,
    sensor_tx: mpsc::Sender<SensorEvent>,
    frame_rx: watch::Receiver<RenderFrame>,
    started: Instant,
}

impl Companion {
    /// Spawn a companion with the default tick cadence.
    pub fn new(config: &WispConfig) -> Self {
        Self::with_tick(config, TickConfig::from_fps(config.engine.fps))
    }

    pub fn with_tick(config: &WispConfig, tick_config: TickConfig) -> Self {
        let (sensor_tx, sensor_rx) = mpsc::channel(256);
        let (frame_tx, frame_rx) = watch::channel(RenderFrame::default());
        let engine = Arc::new(RwLock::new(Engine::new(config)));

        let companion = Self {
            engine,
            sensor_tx,
            frame_rx,
            started: Instant::now(),
        };
        companion.spawn_tick(sensor_rx, frame_tx, tick_config);
        companion
    }

    fn spawn_tick(
        &self,
        mut sensor_rx: mpsc::Receiver<SensorEvent>,
        frame_tx: watch::Sender<RenderFrame>,
        tick_config: TickConfig,
    ) {
        let engine = Arc::clone(&self.engine);
        let started = self.started;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick_config.interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let now = started.elapsed().as_secs_f64();
                        let frame = {
                            let mut engine = engine.write().await;
                            engine.tick(now)
                        };
                        if frame_tx.send(frame).is_err() {
                            tracing::debug!("all frame subscribers dropped, stopping tick task");
                            break;
                        }
                    }

                    event = sensor_rx.recv() => {
                        match event {
                            Some(event) => engine.write().await.ingest(event),
                            None => {
                                tracing::debug!("sensor inbox closed, stopping tick task");
                                break;
                            }
                        }
                    }
                }
            }
        });
    }

    /// Enqueue a raw sensor event. Fails only if the tick task is gone.
    pub async fn send_event(&self, event: SensorEvent) -> anyhow::Result<()> {
        self.sensor_tx
            .send(event)
            .await
            .map_err(|e| anyhow::anyhow!("sensor inbox closed: {}", e))
    }

    /// A cloneable sender for platform capture callbacks.
    pub fn event_sender(&self) -> mpsc::Sender<SensorEvent> {
        self.sensor_tx.clone()
    }

    /// Latest rendered frame.
    pub fn current_frame(&self) -> RenderFrame {
        self.frame_rx.borrow().clone()
    }

    /// Subscribe to frame updates.
    pub fn subscribe(&self) -> watch::Receiver<RenderFrame> {
        self.frame_rx.clone()
    }

    pub async fn affect(&self) -> AffectState {
        self.engine.read().await.brain().current().clone()
    }

    // ========================================================================
    // Manual overrides
    // ========================================================================

    pub async fn force_mood(&self, mood: MoodKind) {
        self.engine.write().await.force_mood(mood);
    }

    pub async fn nudge_energy(&self, delta: f64) {
        self.engine.write().await.nudge_energy(delta);
    }

    pub async fn set_position(&self, position: DVec2) {
        self.engine.write().await.set_position(position);
    }

    pub async fn resize_canvas(&self, canvas: DVec2) {
        self.engine.write().await.resize_canvas(canvas);
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub async fn export_state_json(&self, unix_now: f64) -> anyhow::Result<String> {
        Ok(self.engine.read().await.export_state_json(unix_now)?)
    }

    pub async fn import_state_json(&self, json: &str, unix_now: f64) -> Result<(), ImportError> {
        self.engine.write().await.import_state_json(json, unix_now)
    }
}
