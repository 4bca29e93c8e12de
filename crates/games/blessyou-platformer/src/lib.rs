pub mod config;
pub mod damage;
pub mod hazards;
pub mod level;
pub mod physics;
pub mod player;
pub mod sneeze;
pub mod tilemap;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use blessyou_core::intent::Intents;
use blessyou_core::level_scene_boilerplate;
use blessyou_core::scene_trait::{LevelScene, SceneConfig, SceneEvent, SceneMetadata};

use config::LevelConfig;
use damage::{DamagePolicy, HeartPool, apply_hazard_hit};
use hazards::{Hazard, extract_hazards};
use level::{BACKGROUND_LAYER, GROUND_LAYER, SPIKE_LAYER, build_level};
use physics::{StepWorld, WorldBounds, step_body};
use player::{JUMP_SOUND, PlayerState};
use sneeze::{SNEEZE_SOUND, SneezeScheduler};
use tilemap::{TileLayer, Tilemap};

/// Layers the player stands on and bumps into.
const SOLID_LAYERS: [&str; 2] = [BACKGROUND_LAYER, GROUND_LAYER];

/// Serializable scene state for the renderer and HUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelState {
    pub player: PlayerState,
    pub hearts: HeartPool,
    pub sneeze: SneezeScheduler,
    /// Seconds simulated since init.
    pub level_timer: f32,
    pub ticks: u64,
    pub level_failed: bool,
}

impl LevelState {
    fn new(config: &LevelConfig) -> Self {
        Self {
            player: PlayerState::new(config.spawn_x, config.spawn_y, &config.physics),
            hearts: HeartPool::new(config.hearts),
            sneeze: SneezeScheduler::new(&config.sneeze),
            level_timer: 0.0,
            ticks: 0,
            level_failed: false,
        }
    }
}

/// The sneeze-jump rooftop level.
pub struct SneezeLevel {
    config: LevelConfig,
    /// Level data as authored, before hazard extraction.
    source: Tilemap,
    /// Level data in play: hazard tiles removed.
    map: Tilemap,
    hazards: Vec<Hazard>,
    damage: DamagePolicy,
    state: LevelState,
}

impl SneezeLevel {
    pub fn new() -> Self {
        Self::with_config(LevelConfig::default())
    }

    pub fn with_config(config: LevelConfig) -> Self {
        let source = build_level().expect("built-in level data must be well formed");
        Self::with_map(config, source)
    }

    /// Build the scene around caller-supplied level data. A map without a
    /// spike layer simply has no hazards.
    pub fn with_map(config: LevelConfig, source: Tilemap) -> Self {
        let mut level = Self {
            damage: DamagePolicy::from_config(&config.damage),
            state: LevelState::new(&config),
            map: source.clone(),
            hazards: Vec::new(),
            source,
            config,
        };
        level.load_map();
        level
    }

    /// Reset the in-play map from the source and extract its hazards.
    fn load_map(&mut self) {
        self.map = self.source.clone();
        self.hazards = match self.map.layer_mut(SPIKE_LAYER) {
            Ok(layer) => extract_hazards(layer, 0),
            Err(e) => {
                tracing::warn!("{e}, level has no hazards");
                Vec::new()
            },
        };
        let (width, height) = self
            .map
            .layer(GROUND_LAYER)
            .map(|l| (l.width, l.height))
            .unwrap_or_default();
        tracing::info!(
            hazards = self.hazards.len(),
            width,
            height,
            "Level loaded"
        );
    }

    pub fn state(&self) -> &LevelState {
        &self.state
    }

    pub fn map(&self) -> &Tilemap {
        &self.map
    }

    pub fn hazards(&self) -> &[Hazard] {
        &self.hazards
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }
}

impl Default for SneezeLevel {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelScene for SneezeLevel {
    fn metadata(&self) -> SceneMetadata {
        SceneMetadata {
            name: "Bless You".to_string(),
            description: "Cross the rooftops while a cold keeps making you sneeze-jump!"
                .to_string(),
            hearts: self.config.hearts,
        }
    }

    fn tick_rate(&self) -> f32 {
        self.config.tick_rate_hz
    }

    fn init(&mut self, config: &SceneConfig) {
        if let Some(hearts) = config.custom_u64("hearts") {
            self.config.hearts = u32::try_from(hearts).unwrap_or(u32::MAX);
        }
        if let Some(interval) = config.custom_u64("sneeze_interval_ms") {
            self.config.sneeze.interval_ms = interval;
        }

        self.damage = DamagePolicy::from_config(&self.config.damage);
        self.load_map();
        self.state = LevelState::new(&self.config);
    }

    fn update(&mut self, dt: f32, intents: &Intents) -> Vec<SceneEvent> {
        if !dt.is_finite() || dt <= 0.0 {
            return Vec::new();
        }
        let Ok(elapsed) = Duration::try_from_secs_f32(dt) else {
            return Vec::new();
        };

        self.state.level_timer += dt;
        self.state.ticks += 1;
        let mut events = Vec::new();

        // Physics pass
        let solids: Vec<&TileLayer> = self
            .map
            .layers
            .iter()
            .filter(|l| SOLID_LAYERS.contains(&l.name.as_str()))
            .collect();
        let bounds = if self.config.physics.collide_world_bounds {
            self.map.layer(GROUND_LAYER).ok().map(WorldBounds::of_layer)
        } else {
            None
        };
        let world = StepWorld {
            solids: &solids,
            hazards: &self.hazards,
            bounds,
        };

        let substeps = self.config.physics.substeps.max(1);
        let sub_dt = dt / substeps as f32;
        let mut contacts: Vec<u32> = Vec::new();
        for _ in 0..substeps {
            let step = step_body(
                &mut self.state.player.body,
                &world,
                &self.config.physics,
                sub_dt,
            );
            for id in step.hazards {
                if !contacts.contains(&id) {
                    contacts.push(id);
                }
            }
        }

        // State machine
        let decision = self.state.player.tick(intents, &self.config.physics);
        if decision.jumped {
            events.push(SceneEvent::PlaySound {
                key: JUMP_SOUND.to_string(),
            });
        }

        // Collision callbacks
        for hazard_id in contacts {
            tracing::info!(hazard_id, "Hazard hit");
            events.push(SceneEvent::HazardHit { hazard_id });
            let outcome = apply_hazard_hit(
                &mut self.state.player,
                &mut self.state.hearts,
                &self.damage,
            );
            if outcome.depleted() {
                events.push(SceneEvent::ResourceDepleted {
                    lost: outcome.hearts_lost,
                });
            }
            if self.state.hearts.is_empty() && !self.state.level_failed {
                tracing::info!(hazard_id, "Level failed");
                self.state.level_failed = true;
            }
        }

        // Timers. Firings that land on the same tick share one cue.
        if self.state.sneeze.advance(elapsed, &mut self.state.player) > 0 {
            events.push(SceneEvent::PlaySound {
                key: SNEEZE_SOUND.to_string(),
            });
        }

        events
    }

    level_scene_boilerplate!(state_type: LevelState);
}
