pub mod color;
pub mod intent;
pub mod scene_trait;
pub mod timer;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::HashMap;

    use crate::intent::Intents;
    use crate::scene_trait::{LevelScene, SceneConfig, SceneEvent};

    /// Create an empty SceneConfig (no overrides).
    pub fn default_config() -> SceneConfig {
        SceneConfig {
            custom: HashMap::new(),
        }
    }

    /// Create a SceneConfig with a single numeric override.
    pub fn config_with(key: &str, value: u64) -> SceneConfig {
        let mut config = default_config();
        config
            .custom
            .insert(key.to_string(), serde_json::Value::from(value));
        config
    }

    /// Run N scene ticks with the same intents, returning all accumulated events.
    pub fn run_scene_ticks(
        scene: &mut dyn LevelScene,
        n: usize,
        dt: f32,
        intents: &Intents,
    ) -> Vec<SceneEvent> {
        let mut all_events = Vec::new();
        for _ in 0..n {
            all_events.extend(scene.update(dt, intents));
        }
        all_events
    }

    // ================================================================
    // Scene Trait Contract Tests
    // ================================================================
    // These functions form a generic test suite that every LevelScene
    // implementation must pass. Scene crates call them from their own
    // #[cfg(test)] modules with a concrete scene instance.

    /// After init(), serialize_state() must return non-empty bytes.
    pub fn contract_init_creates_state(scene: &mut dyn LevelScene) {
        scene.init(&default_config());
        let state = scene.serialize_state();
        assert!(
            !state.is_empty(),
            "serialize_state() must return non-empty bytes after init"
        );
    }

    /// update() with dt>0 must advance the scene state.
    pub fn contract_update_advances_time(scene: &mut dyn LevelScene) {
        let before = scene.serialize_state();
        scene.update(0.25, &Intents::default());
        let after = scene.serialize_state();
        assert_ne!(before, after, "update(dt>0) must advance scene state");
    }

    /// serialize_state → apply_state roundtrip must be stable.
    pub fn contract_state_roundtrip_preserves(scene: &mut dyn LevelScene) {
        let state_a = scene.serialize_state();
        scene.apply_state(&state_a);
        let state_b = scene.serialize_state();
        assert_eq!(
            state_a, state_b,
            "State must be unchanged by serialize→apply→serialize"
        );
    }

    /// Garbage snapshots must be ignored rather than corrupting state.
    pub fn contract_bad_state_ignored(scene: &mut dyn LevelScene) {
        let before = scene.serialize_state();
        scene.apply_state(&[0xc1, 0xff, 0x00]);
        assert_eq!(
            before,
            scene.serialize_state(),
            "Undecodable snapshot must leave state untouched"
        );
    }

    /// Two scenes fed identical intents must produce identical state.
    pub fn contract_deterministic(
        a: &mut dyn LevelScene,
        b: &mut dyn LevelScene,
        script: &[Intents],
        dt: f32,
    ) {
        a.init(&default_config());
        b.init(&default_config());
        for intents in script {
            let ea = a.update(dt, intents);
            let eb = b.update(dt, intents);
            assert_eq!(ea, eb, "Same intents must produce the same events");
        }
        assert_eq!(
            a.serialize_state(),
            b.serialize_state(),
            "Same intents must produce the same state"
        );
    }
}
