//! Axis-aligned box collider and the AABB math shared by the collision systems.
//!
//! A [`BoxCollider`] is pure data: a size and a local offset from the entity's
//! [`MapPosition`](super::mapposition::MapPosition) anchor to the top-left
//! corner of the box. World-space bounds are derived on demand as an [`Aabb`].
//!
//! [`Aabb::contact`] is the narrow phase used by the detector: it reports the
//! overlap midpoint, the minimum-penetration axis as a signed unit normal and
//! the penetration depth along that axis.

use bevy_ecs::prelude::Component;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size and no offset.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
        }
    }

    /// Create a BoxCollider, rejecting sizes that are not finite and strictly positive.
    pub fn try_new(width: f32, height: f32) -> Result<Self, String> {
        let collider = Self::new(width, height);
        if collider.is_valid() {
            Ok(collider)
        } else {
            Err(format!(
                "Invalid collider size {}x{}: both sides must be finite and positive",
                width, height
            ))
        }
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// True when both sides are finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.size.is_finite() && self.size.x > 0.0 && self.size.y > 0.0
    }

    /// World-space bounds of the collider for a given entity position.
    pub fn aabb(&self, position: Vec2) -> Aabb {
        Aabb::from_min_size(position + self.offset, self.size)
    }

    /// World-space center of the collider.
    pub fn center(&self, position: Vec2) -> Vec2 {
        position + self.offset + self.size * 0.5
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        self.aabb(position).intersects(&other.aabb(other_position))
    }

    /// Point containment in world space. Edges count as inside.
    pub fn contains_point(&self, position: Vec2, point: Vec2) -> bool {
        let aabb = self.aabb(position);
        point.x >= aabb.min.x && point.x <= aabb.max.x && point.y >= aabb.min.y && point.y <= aabb.max.y
    }
}

/// World-space axis-aligned rectangle. `min` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

/// Narrow-phase result for one overlapping pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Center of the overlap rectangle.
    pub point: Vec2,
    /// Unit vector along the minimum-penetration axis, from the first box toward the second.
    pub normal: Vec2,
    /// Overlap along the chosen axis.
    pub depth: f32,
}

impl Aabb {
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            max: min + size,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap test: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Contact data for an overlapping pair, `None` if the boxes do not intersect.
    ///
    /// The separating axis is the one with the smaller overlap; ties go to the
    /// vertical axis. The normal's sign follows the vector from this box's
    /// center to `other`'s center along that axis.
    pub fn contact(&self, other: &Aabb) -> Option<Contact> {
        if !self.intersects(other) {
            return None;
        }

        let overlap_min = self.min.max(other.min);
        let overlap_max = self.max.min(other.max);
        let overlap = overlap_max - overlap_min;
        let point = (overlap_min + overlap_max) * 0.5;
        let delta = other.center() - self.center();

        let (normal, depth) = if overlap.x < overlap.y {
            let sign = if delta.x < 0.0 { -1.0 } else { 1.0 };
            (Vec2::new(sign, 0.0), overlap.x)
        } else {
            let sign = if delta.y < 0.0 { -1.0 } else { 1.0 };
            (Vec2::new(0.0, sign), overlap.y)
        };

        Some(Contact {
            point,
            normal,
            depth,
        })
    }
}
