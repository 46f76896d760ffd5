//! Headless driver for the companion engine.
//!
//! `simulate` runs the synchronous engine over a scripted event file at a
//! fixed virtual frame rate and prints frames as JSON lines, fully
//! reproducible from the seed. `run` spawns the async runtime against the
//! wall clock, replaying an optional script in real time.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use wisp_brain::unix_now;
use wisp_core::WispConfig;
use wisp_engine::{Companion, Engine, TickConfig};
use wisp_senses::SensorEvent;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "wisp.toml")]
    config: PathBuf,

    /// Restore affect state from a JSON snapshot before starting
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write the affect state to a JSON snapshot on exit
    #[arg(long)]
    save: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deterministic offline simulation on a virtual clock
    Simulate {
        /// JSON-lines file of sensor events, ordered by time
        #[arg(long)]
        script: Option<PathBuf>,

        /// Number of ticks to run
        #[arg(long, default_value_t = 600)]
        ticks: u32,

        /// Override the configured RNG seed
        #[arg(long, env = "WISP_SEED")]
        seed: Option<u64>,

        /// Print every Nth frame as a JSON line (0 = silent)
        #[arg(long, default_value_t = 60)]
        every: u32,
    },

    /// Live run on the wall clock with the async runtime
    Run {
        /// JSON-lines file of sensor events to replay in real time
        #[arg(long)]
        script: Option<PathBuf>,

        /// How long to run, seconds
        #[arg(long, default_value_t = 30.0)]
        duration: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let config = WispConfig::load_or_default(&args.config);

    match args.command {
        Command::Simulate {
            ref script,
            ticks,
            seed,
            every,
        } => {
            let mut config = config;
            if seed.is_some() {
                config.engine.seed = seed;
            }
            let script = script.as_deref().map(load_script).transpose()?;
            simulate(&config, &args, script.unwrap_or_default(), ticks, every)
        }
        Command::Run {
            ref script,
            duration,
        } => {
            let script = script.as_deref().map(load_script).transpose()?;
            run_live(&config, &args, script.unwrap_or_default(), duration)
        }
    }
}

/// Parse a JSON-lines event script. Blank lines are skipped.
fn load_script(path: &std::path::Path) -> Result<Vec<SensorEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script: {}", path.display()))?;
    let mut events = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let event: SensorEvent = serde_json::from_str(line)
            .with_context(|| format!("bad event on line {}", lineno + 1))?;
        events.push(event);
    }
    events.sort_by(|a, b| a.time().total_cmp(&b.time()));
    info!("loaded {} scripted events", events.len());
    Ok(events)
}

fn simulate(
    config: &WispConfig,
    args: &Args,
    script: Vec<SensorEvent>,
    ticks: u32,
    every: u32,
) -> Result<()> {
    let mut engine = Engine::new(config);
    restore(&mut engine, args)?;

    let dt = 1.0 / config.engine.fps.max(1) as f64;
    let mut pending = script.into_iter().peekable();

    for i in 0..ticks {
        let now = i as f64 * dt;
        while pending.peek().is_some_and(|e| e.time() <= now) {
            if let Some(event) = pending.next() {
                engine.ingest(event);
            }
        }
        let frame = engine.tick(now);
        if every > 0 && i % every == 0 {
            println!("{}", serde_json::to_string(&frame)?);
        }
    }

    let affect = engine.brain().current();
    info!(
        "simulation finished: mood {}, energy {:.2}, {} history records",
        affect.mood,
        affect.energy,
        engine.brain().history().len()
    );
    persist(&engine, args)
}

fn run_live(
    config: &WispConfig,
    args: &Args,
    script: Vec<SensorEvent>,
    duration: f64,
) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let companion = Companion::with_tick(config, TickConfig::from_fps(config.engine.fps));
        if let Some(path) = &args.load {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read snapshot: {}", path.display()))?;
            companion
                .import_state_json(&json, unix_now())
                .await
                .context("snapshot import failed")?;
        }

        // Feed the script at its own pace while the tick task runs.
        let sender = companion.event_sender();
        let feeder = tokio::spawn(async move {
            let started = tokio::time::Instant::now();
            for event in script {
                let at = tokio::time::Duration::from_secs_f64(event.time().max(0.0));
                tokio::time::sleep_until(started + at).await;
                if sender.send(event).await.is_err() {
                    break;
                }
            }
        });

        let deadline = tokio::time::Instant::now()
            + tokio::time::Duration::from_secs_f64(duration.max(0.0));
        let mut status = tokio::time::interval(tokio::time::Duration::from_secs(1));
        loop {
            tokio::select! {
                _ = status.tick() => {
                    let frame = companion.current_frame();
                    info!(
                        "t={:.1}s mood={} energy={:.2} pos=({:.0},{:.0}) particles={}",
                        frame.timestamp,
                        frame.mood,
                        frame.energy,
                        frame.position.x,
                        frame.position.y,
                        frame.particles.len()
                    );
                }
                _ = tokio::time::sleep_until(deadline) => break,
            }
        }
        feeder.abort();

        if let Some(path) = &args.save {
            let json = companion.export_state_json(unix_now()).await?;
            std::fs::write(path, json)
                .with_context(|| format!("failed to write snapshot: {}", path.display()))?;
            info!("saved affect state to {}", path.display());
        }
        Ok(())
    })
}

fn restore(engine: &mut Engine, args: &Args) -> Result<()> {
    if let Some(path) = &args.load {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot: {}", path.display()))?;
        engine
            .import_state_json(&json, unix_now())
            .context("snapshot import failed")?;
    }
    Ok(())
}

fn persist(engine: &Engine, args: &Args) -> Result<()> {
    if let Some(path) = &args.save {
        let json = engine.export_state_json(unix_now())?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write snapshot: {}", path.display()))?;
        info!("saved affect state to {}", path.display());
    }
    Ok(())
}
