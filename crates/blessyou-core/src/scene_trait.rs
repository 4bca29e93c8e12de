use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::intent::Intents;

/// Core trait that every Bless You level scene implements.
///
/// The host owns the main loop, asset loading, and presentation;
/// the scene only advances its own simulation and reports what the
/// collaborators should do about it.
pub trait LevelScene {
    /// Scene metadata for the level select screen.
    fn metadata(&self) -> SceneMetadata;

    /// Called once before the first tick. Rebuilds all scene state.
    fn init(&mut self, config: &SceneConfig);

    /// Called once per simulation tick with the already-resolved intents.
    /// Returns the requests the host should forward to its collaborators.
    fn update(&mut self, dt: f32, intents: &Intents) -> Vec<SceneEvent>;

    /// Serialize the mutable scene state for the renderer/HUD side.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the mutable scene state with a previously serialized snapshot.
    fn apply_state(&mut self, state: &[u8]);

    /// Simulation tick rate in Hz.
    fn tick_rate(&self) -> f32 {
        60.0
    }

    /// Whether the player has lost every life unit this attempt.
    fn is_level_failed(&self) -> bool;
}

/// Scene metadata for the level select screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub name: String,
    pub description: String,
    pub hearts: u32,
}

/// Per-scene overrides supplied by the host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    pub custom: HashMap<String, serde_json::Value>,
}

impl SceneConfig {
    /// Read an unsigned override, ignoring values of the wrong type.
    pub fn custom_u64(&self, key: &str) -> Option<u64> {
        self.custom.get(key).and_then(|v| v.as_u64())
    }
}

/// Fire-and-forget requests emitted by a scene during update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// Trigger a one-shot sound effect by asset key.
    PlaySound { key: String },
    /// The player's collision volume touched the hazard with this id.
    HazardHit { hazard_id: u32 },
    /// The resource pool just reached zero; `lost` units were removed.
    ResourceDepleted { lost: u32 },
}

/// Generates the `LevelScene` methods that are identical across scenes:
/// `serialize_state`, `apply_state`, `is_level_failed`.
///
/// Requires the implementing struct to have a `state: $StateType` field,
/// and `$StateType` to have a `level_failed: bool` field.
#[macro_export]
macro_rules! level_scene_boilerplate {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("scene state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) {
            if let Ok(s) = rmp_serde::from_slice::<$StateType>(state) {
                self.state = s;
            }
        }

        fn is_level_failed(&self) -> bool {
            self.state.level_failed
        }
    };
}
