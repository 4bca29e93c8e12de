use serde::{Deserialize, Serialize};

use crate::config::PhysicsConfig;
use crate::hazards::Hazard;
use crate::tilemap::TileLayer;

/// Axis-aligned box in world space (+y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn from_center(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x - width / 2.0,
            top: y - height / 2.0,
            right: x + width / 2.0,
            bottom: y + height / 2.0,
        }
    }

    /// Strict overlap; boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.bottom > other.top
            && self.top < other.bottom
    }
}

/// A dynamic arcade body. Position is the body's center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    /// Fraction of velocity kept (and reversed) when hitting something.
    pub bounce: f32,
    /// Whether the last step ended resting on something below.
    /// `None` until the body has been stepped at least once.
    pub blocked_down: Option<bool>,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width,
            height,
            bounce: 0.0,
            blocked_down: None,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.x, self.y, self.width, self.height)
    }

    /// Ground contact as consumed by gameplay. A missing reading counts as
    /// airborne so a stale signal can never grant a jump.
    pub fn on_ground(&self) -> bool {
        self.blocked_down.unwrap_or(false)
    }

    /// Push the body out of `other` along the axis of least penetration.
    /// Returns true when the body ended up resting on top of `other`.
    fn separate_from(&mut self, other: &Aabb) -> bool {
        let me = self.aabb();
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;

        let overlap_left = me.right - other.left;
        let overlap_right = other.right - me.left;
        let overlap_top = me.bottom - other.top;
        let overlap_bottom = other.bottom - me.top;

        let min_overlap = overlap_left
            .min(overlap_right)
            .min(overlap_top)
            .min(overlap_bottom);

        if min_overlap == overlap_top {
            // Landed on it
            self.y = other.top - half_h;
            if self.vy > 0.0 {
                self.vy = -self.vy * self.bounce;
            }
            true
        } else if min_overlap == overlap_bottom {
            // Hit head on it
            self.y = other.bottom + half_h;
            if self.vy < 0.0 {
                self.vy = -self.vy * self.bounce;
            }
            false
        } else if min_overlap == overlap_left {
            self.x = other.left - half_w;
            if self.vx > 0.0 {
                self.vx = -self.vx * self.bounce;
            }
            false
        } else {
            self.x = other.right + half_w;
            if self.vx < 0.0 {
                self.vx = -self.vx * self.bounce;
            }
            false
        }
    }
}

/// Result of one physics step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepContacts {
    pub blocked_down: bool,
    /// Ids of hazards the body collided with, in hazard order.
    pub hazards: Vec<u32>,
}

/// World rectangle the body may be clamped to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl WorldBounds {
    /// Bounds covering a layer.
    pub fn of_layer(layer: &TileLayer) -> Self {
        let (w, h) = layer.world_size();
        Self {
            left: layer.offset_x,
            top: layer.offset_y,
            right: layer.offset_x + w,
            bottom: layer.offset_y + h,
        }
    }
}

/// What a body collides with during a step.
pub struct StepWorld<'a> {
    /// Layers whose colliding tiles block the body.
    pub solids: &'a [&'a TileLayer],
    pub hazards: &'a [Hazard],
    pub bounds: Option<WorldBounds>,
}

/// Integrate one substep: gravity, motion, then collision against tiles,
/// world bounds, and hazards. Hazards block like static bodies and are
/// reported in the returned contacts.
pub fn step_body(
    body: &mut Body,
    world: &StepWorld<'_>,
    config: &PhysicsConfig,
    dt: f32,
) -> StepContacts {
    let mut contacts = StepContacts::default();

    body.vy += config.gravity * dt;
    body.x += body.vx * dt;
    body.y += body.vy * dt;

    for layer in world.solids {
        if resolve_tiles(body, layer) {
            contacts.blocked_down = true;
        }
    }

    if let Some(bounds) = world.bounds
        && clamp_to_bounds(body, &bounds)
    {
        contacts.blocked_down = true;
    }

    for hazard in world.hazards {
        let area = hazard.aabb();
        if !body.aabb().intersects(&area) {
            continue;
        }
        if body.separate_from(&area) {
            contacts.blocked_down = true;
        }
        contacts.hazards.push(hazard.id);
    }

    body.blocked_down = Some(contacts.blocked_down);
    contacts
}

/// Resolve overlaps with every colliding tile under the body.
/// Returns true if any tile ended up directly below it.
pub(crate) fn resolve_tiles(body: &mut Body, layer: &TileLayer) -> bool {
    let mut landed = false;
    let area = body.aabb();

    let (min_tx, min_ty) = layer.world_to_tile(area.left, area.top);
    let (max_tx, max_ty) = layer.world_to_tile(area.right, area.bottom);

    for ty in min_ty..=max_ty {
        for tx in min_tx..=max_tx {
            if !layer.is_solid(tx, ty) {
                continue;
            }

            let left = layer.offset_x + tx as f32 * layer.tile_width;
            let top = layer.offset_y + ty as f32 * layer.tile_height;
            let tile = Aabb {
                left,
                top,
                right: left + layer.tile_width,
                bottom: top + layer.tile_height,
            };

            // Earlier tiles may already have pushed the body clear.
            if !body.aabb().intersects(&tile) {
                continue;
            }

            if body.separate_from(&tile) {
                landed = true;
            }
        }
    }

    landed
}

fn clamp_to_bounds(body: &mut Body, bounds: &WorldBounds) -> bool {
    let half_w = body.width / 2.0;
    let half_h = body.height / 2.0;
    let mut landed = false;

    if body.x - half_w < bounds.left {
        body.x = bounds.left + half_w;
        if body.vx < 0.0 {
            body.vx = -body.vx * body.bounce;
        }
    } else if body.x + half_w > bounds.right {
        body.x = bounds.right - half_w;
        if body.vx > 0.0 {
            body.vx = -body.vx * body.bounce;
        }
    }

    if body.y - half_h < bounds.top {
        body.y = bounds.top + half_h;
        if body.vy < 0.0 {
            body.vy = -body.vy * body.bounce;
        }
    } else if body.y + half_h >= bounds.bottom {
        body.y = bounds.bottom - half_h;
        if body.vy > 0.0 {
            body.vy = -body.vy * body.bounce;
        }
        landed = true;
    }

    landed
}
