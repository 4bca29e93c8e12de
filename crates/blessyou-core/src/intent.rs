use serde::{Deserialize, Serialize};

/// A single resolved input intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Left,
    Right,
    Up,
    Down,
    Jump,
}

/// Anything that can answer "is this intent active right now".
///
/// Implemented by the host's input layer after it has merged key bindings
/// (arrows, WASD, gamepad) into intents.
pub trait IntentSource {
    fn is_active(&self, intent: Intent) -> bool;
}

/// Snapshot of every intent for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intents {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
}

impl Intents {
    /// Poll a source once for every intent.
    pub fn poll(source: &impl IntentSource) -> Self {
        Self {
            left: source.is_active(Intent::Left),
            right: source.is_active(Intent::Right),
            up: source.is_active(Intent::Up),
            down: source.is_active(Intent::Down),
            jump: source.is_active(Intent::Jump),
        }
    }

    pub fn right() -> Self {
        Self {
            right: true,
            ..Default::default()
        }
    }

    pub fn left() -> Self {
        Self {
            left: true,
            ..Default::default()
        }
    }

    /// Up and the dedicated jump binding both request a jump.
    pub fn wants_jump(&self) -> bool {
        self.up || self.jump
    }
}

impl IntentSource for Intents {
    fn is_active(&self, intent: Intent) -> bool {
        match intent {
            Intent::Left => self.left,
            Intent::Right => self.right,
            Intent::Up => self.up,
            Intent::Down => self.down,
            Intent::Jump => self.jump,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OnlyUp;

    impl IntentSource for OnlyUp {
        fn is_active(&self, intent: Intent) -> bool {
            intent == Intent::Up
        }
    }

    #[test]
    fn poll_reads_every_intent() {
        let intents = Intents::poll(&OnlyUp);
        assert!(intents.up);
        assert!(!intents.left && !intents.right && !intents.down && !intents.jump);
        assert!(intents.wants_jump());
    }

    #[test]
    fn intents_are_their_own_source() {
        let intents = Intents {
            left: true,
            jump: true,
            ..Default::default()
        };
        assert_eq!(Intents::poll(&intents), intents);
    }

    #[test]
    fn down_alone_does_not_jump() {
        let intents = Intents {
            down: true,
            ..Default::default()
        };
        assert!(!intents.wants_jump());
    }
}
