use serde::{Deserialize, Serialize};

/// Gravity acceleration (units/s^2, +y is down).
pub const GRAVITY: f32 = 300.0;
/// Horizontal walk speed.
pub const MOVE_SPEED: f32 = 100.0;
/// Vertical velocity granted by a jump (negative is up).
pub const JUMP_VELOCITY: f32 = -200.0;
/// Vertical velocity applied by a sneeze. Stronger than a jump.
pub const SNEEZE_IMPULSE: f32 = -225.0;
/// Milliseconds between sneezes.
pub const SNEEZE_INTERVAL_MS: u64 = 2000;
/// Player bounce coefficient after touching a hazard.
pub const HIT_BOUNCE: f32 = 0.7;
/// Player tint after touching a hazard.
pub const HIT_TINT: u32 = 0xff0000;
/// Player body width.
pub const PLAYER_WIDTH: f32 = 32.0;
/// Player body height.
pub const PLAYER_HEIGHT: f32 = 32.0;
/// Physics substeps per tick.
pub const SUBSTEPS: u32 = 4;
/// Life units at the start of an attempt.
pub const HEARTS: u32 = 3;

/// Configurable physics parameters, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub substeps: u32,
    /// Stop the player at the map edges instead of letting them fall out.
    pub collide_world_bounds: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: MOVE_SPEED,
            jump_velocity: JUMP_VELOCITY,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            substeps: SUBSTEPS,
            collide_world_bounds: false,
        }
    }
}

/// The recurring involuntary jump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SneezeConfig {
    pub interval_ms: u64,
    pub impulse: f32,
}

impl Default for SneezeConfig {
    fn default() -> Self {
        Self {
            interval_ms: SNEEZE_INTERVAL_MS,
            impulse: SNEEZE_IMPULSE,
        }
    }
}

/// Feedback applied when the player touches a hazard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageConfig {
    pub bounce: f32,
    /// `0xRRGGBB`.
    pub tint: u32,
}

impl Default for DamageConfig {
    fn default() -> Self {
        Self {
            bounce: HIT_BOUNCE,
            tint: HIT_TINT,
        }
    }
}

/// Top-level level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub hearts: u32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub tick_rate_hz: f32,
    pub physics: PhysicsConfig,
    pub sneeze: SneezeConfig,
    pub damage: DamageConfig,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            hearts: HEARTS,
            spawn_x: 150.0,
            spawn_y: 100.0,
            tick_rate_hz: 60.0,
            physics: PhysicsConfig::default(),
            sneeze: SneezeConfig::default(),
            damage: DamageConfig::default(),
        }
    }
}

impl LevelConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("BLESSYOU_LEVEL_CONFIG")
            .unwrap_or_else(|_| "config/level.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    LevelConfig::default()
                },
            },
            Err(_) => LevelConfig::default(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
