use std::time::Duration;

use serde::{Deserialize, Serialize};

use blessyou_core::timer::RepeatingTimer;

use crate::config::SneezeConfig;
use crate::player::{AnimationState, PlayerState};

/// Sound cue played on every sneeze.
pub const SNEEZE_SOUND: &str = "sneeze";

/// Fires the involuntary sneeze jump on a fixed interval, forever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SneezeScheduler {
    timer: RepeatingTimer,
    impulse: f32,
}

impl SneezeScheduler {
    pub fn new(config: &SneezeConfig) -> Self {
        Self {
            timer: RepeatingTimer::new(config.interval_ms),
            impulse: config.impulse,
        }
    }

    pub fn sneezes(&self) -> u64 {
        self.timer.fired()
    }

    pub fn until_next(&self) -> Duration {
        self.timer.remaining()
    }

    /// Advance the clock and sneeze if any firing fell due. Returns the
    /// number of firings. A sneeze overwrites vertical velocity, so several
    /// firings in one step land the same as one.
    pub fn advance(&mut self, dt: Duration, player: &mut PlayerState) -> u32 {
        let due = self.timer.advance(dt);
        if due > 0 {
            sneeze(player, self.impulse);
        }
        due
    }
}

/// Apply one sneeze. Not gated by ground contact, motion, or cooldowns.
pub fn sneeze(player: &mut PlayerState, impulse: f32) {
    tracing::debug!(on_ground = player.on_ground(), "Sneeze");
    player.body.vy = impulse;
    player.play(AnimationState::SneezeJump);
}
