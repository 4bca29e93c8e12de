//! Whole-level smoke tests: drive the built-in level through the public
//! scene interface the way a host would.

use blessyou_core::intent::Intents;
use blessyou_core::scene_trait::{LevelScene, SceneEvent};
use blessyou_core::test_helpers::{default_config, run_scene_ticks};
use blessyou_platformer::SneezeLevel;
use blessyou_platformer::hazards::Rotation;
use blessyou_platformer::player::AnimationState;
use blessyou_platformer::sneeze::SNEEZE_SOUND;

const DT: f32 = 1.0 / 60.0;

fn started_level() -> SneezeLevel {
    let mut level = SneezeLevel::new();
    level.init(&default_config());
    level
}

fn count_sneezes(events: &[SceneEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, SceneEvent::PlaySound { key } if key == SNEEZE_SOUND))
        .count()
}

#[test]
fn idle_player_sneezes_every_two_seconds() {
    let mut level = started_level();

    // Just over ten seconds.
    let events = run_scene_ticks(&mut level, 601, DT, &Intents::default());

    assert_eq!(count_sneezes(&events), 5);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, SceneEvent::HazardHit { .. })),
        "spawn area must be safe"
    );
    assert_eq!(level.state().hearts.len(), 3);
    assert!(!level.is_level_failed());
    // Always spawns near x = 150 and never walked.
    assert_eq!(level.state().player.body.x, 150.0);
}

#[test]
fn walking_into_wall_spikes_fails_the_level() {
    let mut level = started_level();

    let events = run_scene_ticks(&mut level, 360, DT, &Intents::left());

    let hits: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            SceneEvent::HazardHit { hazard_id } => Some(*hazard_id),
            _ => None,
        })
        .collect();
    assert!(!hits.is_empty(), "wall spikes should be reached");
    for id in &hits {
        let hazard = level
            .hazards()
            .iter()
            .find(|h| h.id == *id)
            .expect("hit ids refer to extracted hazards");
        assert_eq!(hazard.rotation, Rotation::Quarter);
    }

    let depleted: Vec<&SceneEvent> = events
        .iter()
        .filter(|e| matches!(e, SceneEvent::ResourceDepleted { .. }))
        .collect();
    assert_eq!(depleted, vec![&SceneEvent::ResourceDepleted { lost: 3 }]);
    assert!(level.is_level_failed());
    assert!(level.state().hearts.is_empty());
    assert_eq!(level.state().player.body.bounce, 0.7);
}

#[test]
fn restored_snapshot_continues_identically() {
    let mut original = started_level();
    run_scene_ticks(&mut original, 150, DT, &Intents::right());

    let mut restored = started_level();
    restored.apply_state(&original.serialize_state());

    for _ in 0..200 {
        let a = original.update(DT, &Intents::left());
        let b = restored.update(DT, &Intents::left());
        assert_eq!(a, b);
    }
    assert_eq!(original.serialize_state(), restored.serialize_state());
}

#[test]
fn sneeze_pose_shows_after_the_tick_it_fires() {
    let mut level = started_level();

    let mut seen = false;
    for _ in 0..300 {
        let events = level.update(DT, &Intents::right());
        if count_sneezes(&events) > 0 {
            assert_eq!(level.state().player.animation, AnimationState::SneezeJump);
            assert_eq!(level.state().player.body.vy, -225.0);
            seen = true;
        }
    }
    assert!(seen);
}
