use serde::{Deserialize, Serialize};

use blessyou_core::color::Tint;
use blessyou_core::intent::Intents;

use crate::config::PhysicsConfig;
use crate::physics::Body;

/// Sound cue played when a jump is granted.
pub const JUMP_SOUND: &str = "jump";

/// Every visual state the player sprite can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationState {
    Idle,
    MoveLeft,
    MoveRight,
    JumpLeft,
    JumpRight,
    SneezeJump,
    Hurt,
}

/// Animation asset key for each state.
const ANIMATION_KEYS: &[(AnimationState, &str)] = &[
    (AnimationState::Idle, "turn"),
    (AnimationState::MoveLeft, "left"),
    (AnimationState::MoveRight, "right"),
    (AnimationState::JumpLeft, "jumpLeft"),
    (AnimationState::JumpRight, "jumpRight"),
    (AnimationState::SneezeJump, "sneezeJump"),
    (AnimationState::Hurt, "hurt"),
];

impl AnimationState {
    pub const ALL: [AnimationState; 7] = [
        AnimationState::Idle,
        AnimationState::MoveLeft,
        AnimationState::MoveRight,
        AnimationState::JumpLeft,
        AnimationState::JumpRight,
        AnimationState::SneezeJump,
        AnimationState::Hurt,
    ];

    /// Key the renderer plays for this state.
    pub fn key(self) -> &'static str {
        ANIMATION_KEYS
            .iter()
            .find(|(state, _)| *state == self)
            .map(|(_, key)| *key)
            .unwrap_or("turn")
    }
}

/// Outcome of one state-machine evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDecision {
    pub vx: f32,
    pub vy: f32,
    pub animation: AnimationState,
    /// A jump was granted this tick.
    pub jumped: bool,
}

/// Evaluate the per-tick movement rules. Pure: the same inputs always
/// produce the same decision.
///
/// 1. Left, else right, else stop, requesting the matching walk/idle state.
/// 2. Airborne: the request becomes a jump pose facing the sign of the new
///    horizontal velocity (zero faces right). Velocity is unchanged.
/// 3. Up while grounded sets the jump velocity.
pub fn decide(intents: &Intents, on_ground: bool, vy: f32, config: &PhysicsConfig) -> TickDecision {
    let (vx, mut animation) = if intents.left {
        (-config.move_speed, AnimationState::MoveLeft)
    } else if intents.right {
        (config.move_speed, AnimationState::MoveRight)
    } else {
        (0.0, AnimationState::Idle)
    };

    if !on_ground {
        animation = if vx >= 0.0 {
            AnimationState::JumpRight
        } else {
            AnimationState::JumpLeft
        };
    }

    let jumped = intents.wants_jump() && on_ground;
    let vy = if jumped { config.jump_velocity } else { vy };

    TickDecision {
        vx,
        vy,
        animation,
        jumped,
    }
}

/// The player: physics body plus visual state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub body: Body,
    pub animation: AnimationState,
    pub tint: Tint,
}

impl PlayerState {
    pub fn new(spawn_x: f32, spawn_y: f32, config: &PhysicsConfig) -> Self {
        Self {
            body: Body::new(spawn_x, spawn_y, config.player_width, config.player_height),
            animation: AnimationState::Idle,
            tint: Tint::NONE,
        }
    }

    pub fn on_ground(&self) -> bool {
        self.body.on_ground()
    }

    /// Run the state machine for this tick and apply its decision.
    pub fn tick(&mut self, intents: &Intents, config: &PhysicsConfig) -> TickDecision {
        let decision = decide(intents, self.on_ground(), self.body.vy, config);
        self.apply(&decision);
        decision
    }

    pub fn apply(&mut self, decision: &TickDecision) {
        self.body.vx = decision.vx;
        self.body.vy = decision.vy;
        self.animation = decision.animation;
        if decision.jumped {
            // Consumed until the physics pass reports ground again.
            self.body.blocked_down = Some(false);
        }
    }

    /// Request an animation directly (sneeze, hurt).
    pub fn play(&mut self, animation: AnimationState) {
        self.animation = animation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded_player() -> PlayerState {
        let mut player = PlayerState::new(150.0, 100.0, &PhysicsConfig::default());
        player.body.blocked_down = Some(true);
        player
    }

    #[test]
    fn right_on_ground_walks_right() {
        let mut player = grounded_player();
        let d = player.tick(&Intents::right(), &PhysicsConfig::default());
        assert_eq!(d.vx, 100.0);
        assert_eq!(d.animation, AnimationState::MoveRight);
        assert_eq!(player.body.vx, 100.0);
        assert_eq!(player.animation, AnimationState::MoveRight);
    }

    #[test]
    fn left_beats_right() {
        let intents = Intents {
            left: true,
            right: true,
            ..Default::default()
        };
        let d = decide(&intents, true, 0.0, &PhysicsConfig::default());
        assert_eq!(d.vx, -100.0);
        assert_eq!(d.animation, AnimationState::MoveLeft);
    }

    #[test]
    fn no_intent_idles() {
        let d = decide(&Intents::default(), true, 0.0, &PhysicsConfig::default());
        assert_eq!(d.vx, 0.0);
        assert_eq!(d.animation, AnimationState::Idle);
        assert!(!d.jumped);
    }

    #[test]
    fn airborne_right_overrides_to_jump_right() {
        let d = decide(&Intents::right(), false, 50.0, &PhysicsConfig::default());
        assert_eq!(d.vx, 100.0, "horizontal velocity survives the override");
        assert_eq!(d.animation, AnimationState::JumpRight);
        assert_eq!(d.vy, 50.0);
    }

    #[test]
    fn airborne_left_faces_left() {
        let d = decide(&Intents::left(), false, 0.0, &PhysicsConfig::default());
        assert_eq!(d.animation, AnimationState::JumpLeft);
    }

    #[test]
    fn airborne_idle_faces_right() {
        let d = decide(&Intents::default(), false, 0.0, &PhysicsConfig::default());
        assert_eq!(d.animation, AnimationState::JumpRight);
    }

    #[test]
    fn jump_needs_ground() {
        let up = Intents {
            up: true,
            ..Default::default()
        };
        let grounded = decide(&up, true, 0.0, &PhysicsConfig::default());
        assert!(grounded.jumped);
        assert_eq!(grounded.vy, -200.0);

        let airborne = decide(&up, false, 30.0, &PhysicsConfig::default());
        assert!(!airborne.jumped);
        assert_eq!(airborne.vy, 30.0);
    }

    #[test]
    fn jump_consumes_ground_contact() {
        let mut player = grounded_player();
        let up = Intents {
            up: true,
            ..Default::default()
        };
        let config = PhysicsConfig::default();

        assert!(player.tick(&up, &config).jumped);
        player.body.vy = -150.0;

        // Re-evaluating before physics runs must not grant a second jump.
        let again = player.tick(&up, &config);
        assert!(!again.jumped);
        assert_eq!(player.body.vy, -150.0);
    }

    #[test]
    fn missing_ground_signal_is_airborne() {
        let mut player = PlayerState::new(0.0, 0.0, &PhysicsConfig::default());
        let up = Intents {
            up: true,
            ..Default::default()
        };
        let d = player.tick(&up, &PhysicsConfig::default());
        assert!(!d.jumped);
        assert_eq!(d.animation, AnimationState::JumpRight);
    }

    #[test]
    fn every_state_has_a_distinct_key() {
        let mut keys: Vec<&str> = AnimationState::ALL.iter().map(|s| s.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), AnimationState::ALL.len());
        assert_eq!(AnimationState::Idle.key(), "turn");
        assert_eq!(AnimationState::SneezeJump.key(), "sneezeJump");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn any_intents() -> impl Strategy<Value = Intents> {
            (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
                |(left, right, up, down, jump)| Intents {
                    left,
                    right,
                    up,
                    down,
                    jump,
                },
            )
        }

        proptest! {
            #[test]
            fn decision_is_deterministic(
                intents in any_intents(),
                on_ground in any::<bool>(),
                vy in -500.0f32..500.0
            ) {
                let config = PhysicsConfig::default();
                let a = decide(&intents, on_ground, vy, &config);
                let b = decide(&intents, on_ground, vy, &config);
                prop_assert_eq!(a, b);
            }

            #[test]
            fn airborne_never_walks_or_idles(
                intents in any_intents(),
                vy in -500.0f32..500.0
            ) {
                let d = decide(&intents, false, vy, &PhysicsConfig::default());
                prop_assert!(matches!(
                    d.animation,
                    AnimationState::JumpLeft | AnimationState::JumpRight
                ));
                prop_assert!(!d.jumped);
            }
        }
    }
}
