use serde::{Deserialize, Serialize};

use blessyou_core::color::Tint;

use crate::config::DamageConfig;
use crate::player::{AnimationState, PlayerState};

/// One life unit, identified by its HUD slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heart {
    pub slot: u32,
}

/// Ordered pool of life units. Never grows during an attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartPool {
    hearts: Vec<Heart>,
}

impl HeartPool {
    pub fn new(count: u32) -> Self {
        Self {
            hearts: (0..count).map(|slot| Heart { slot }).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.hearts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hearts.is_empty()
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    /// Remove every remaining heart, returning how many were removed.
    pub fn deplete(&mut self) -> u32 {
        let lost = self.hearts.len() as u32;
        self.hearts.clear();
        lost
    }
}

/// Response applied for one hazard contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamagePolicy {
    pub bounce: f32,
    pub tint: Tint,
}

impl DamagePolicy {
    pub fn from_config(config: &DamageConfig) -> Self {
        Self {
            bounce: config.bounce,
            tint: Tint::from_hex(config.tint),
        }
    }
}

/// What a single hazard contact did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    pub hearts_lost: u32,
}

impl HitOutcome {
    /// This hit emptied a pool that still had hearts.
    pub fn depleted(&self) -> bool {
        self.hearts_lost > 0
    }
}

/// Handle one player/hazard contact: knockback bounce, damaged tint, hurt
/// pose, and loss of every remaining heart. The tint never reverts on its
/// own. Hitting with an already empty pool changes nothing further.
pub fn apply_hazard_hit(
    player: &mut PlayerState,
    hearts: &mut HeartPool,
    policy: &DamagePolicy,
) -> HitOutcome {
    player.body.bounce = policy.bounce;
    player.tint = policy.tint;
    player.play(AnimationState::Hurt);

    let hearts_lost = hearts.deplete();
    if hearts_lost > 0 {
        tracing::info!(hearts_lost, "Hearts depleted by hazard");
    }
    HitOutcome { hearts_lost }
}
