use tracing_subscriber::EnvFilter;

use blessyou_core::intent::{Intent, IntentSource, Intents};
use blessyou_core::scene_trait::{LevelScene, SceneConfig};
use blessyou_platformer::SneezeLevel;
use blessyou_platformer::config::LevelConfig;

const DEFAULT_RUN_SECS: f32 = 10.0;

/// Canned input: walk right, hop, rest, walk back, rest.
struct ScriptedInput {
    time: f32,
}

impl IntentSource for ScriptedInput {
    fn is_active(&self, intent: Intent) -> bool {
        let t = self.time;
        match intent {
            Intent::Right => t < 3.2,
            Intent::Up => (3.0..3.2).contains(&t),
            Intent::Left => (5.0..8.0).contains(&t),
            Intent::Down | Intent::Jump => false,
        }
    }
}

fn run_secs() -> f32 {
    std::env::args()
        .nth(1)
        .and_then(|a| a.strip_prefix("--secs=").map(String::from))
        .or_else(|| std::env::var("BLESSYOU_RUN_SECS").ok())
        .and_then(|s| s.parse::<f32>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_RUN_SECS)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let secs = run_secs();
    let mut level = SneezeLevel::with_config(LevelConfig::load());
    level.init(&SceneConfig::default());

    let meta = level.metadata();
    let dt = 1.0 / level.tick_rate().max(1.0);
    let ticks = (secs / dt).ceil() as u64;
    tracing::info!(
        "{} starting: {secs}s at {} Hz, {} hearts",
        meta.name,
        level.tick_rate(),
        meta.hearts
    );

    let mut input = ScriptedInput { time: 0.0 };
    for _ in 0..ticks {
        let intents = Intents::poll(&input);
        for event in level.update(dt, &intents) {
            tracing::debug!(?event, time = input.time, "Scene event");
        }
        input.time += dt;
        if level.is_level_failed() {
            tracing::info!(time = input.time, "Level failed, stopping");
            break;
        }
    }

    let state = level.state();
    let body = &state.player.body;
    tracing::info!(
        x = body.x,
        y = body.y,
        hearts = state.hearts.len(),
        sneezes = state.sneeze.sneezes(),
        animation = state.player.animation.key(),
        "Run finished"
    );
}
