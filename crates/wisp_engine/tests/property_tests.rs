//! End-to-end properties of the tick pipeline.

use glam::DVec2;
use proptest::prelude::*;
use wisp_core::WispConfig;
use wisp_engine::Engine;
use wisp_senses::SensorEvent;

fn seeded_config(seed: u64) -> WispConfig {
    let mut config = WispConfig::default();
    config.engine.seed = Some(seed);
    config
}

#[derive(Debug, Clone)]
enum Step {
    Pointer(f64, f64),
    Click,
    Quiet,
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0.0f64..1920.0, 0.0f64..1080.0).prop_map(|(x, y)| Step::Pointer(x, y)),
        Just(Step::Click),
        Just(Step::Quiet),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Whatever the stimulus script, every frame keeps the body on canvas
    /// with normalized scalars and bounded particles.
    #[test]
    fn frames_always_well_formed(seed in any::<u64>(), steps in prop::collection::vec(arb_step(), 1..200)) {
        let mut engine = Engine::new(&seeded_config(seed));
        for (i, step) in steps.iter().enumerate() {
            let now = i as f64 / 60.0;
            match step {
                Step::Pointer(x, y) => engine.ingest(SensorEvent::PointerMove {
                    position: DVec2::new(*x, *y),
                    time: now,
                }),
                Step::Click => engine.ingest(SensorEvent::Click { time: now }),
                Step::Quiet => {}
            }
            let frame = engine.tick(now);
            prop_assert!(frame.position.x >= frame.radius && frame.position.x <= 1920.0 - frame.radius);
            prop_assert!(frame.position.y >= frame.radius && frame.position.y <= 1080.0 - frame.radius);
            prop_assert!((0.0..=1.0).contains(&frame.energy));
            prop_assert!((0.0..=1.0).contains(&frame.mood_transition_progress));
            prop_assert!(frame.radius > 0.0 && frame.radius.is_finite());
            prop_assert!(frame.particles.len() <= 256);
        }
    }

    /// The full engine is reproducible from its seed.
    #[test]
    fn engine_deterministic_given_seed(seed in any::<u64>(), steps in prop::collection::vec(arb_step(), 1..100)) {
        let run = || {
            let mut engine = Engine::new(&seeded_config(seed));
            let mut out = Vec::new();
            for (i, step) in steps.iter().enumerate() {
                let now = i as f64 / 60.0;
                if let Step::Pointer(x, y) = step {
                    engine.ingest(SensorEvent::PointerMove {
                        position: DVec2::new(*x, *y),
                        time: now,
                    });
                }
                let frame = engine.tick(now);
                out.push((frame.mood, frame.position, frame.energy, frame.particles.len()));
            }
            out
        };
        prop_assert_eq!(run(), run());
    }
}
