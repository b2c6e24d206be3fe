//! Mass, static flag and restitution consumed by the collision response.
//!
//! Entities without a [`PhysicsBody`] are treated exactly like
//! `PhysicsBody::default()`: dynamic, mass 1, restitution 0.

use bevy_ecs::prelude::Component;
use log::warn;

const DEFAULT_MASS: f32 = 1.0;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct PhysicsBody {
    /// Mass in arbitrary units. Always positive.
    pub mass: f32,
    /// Static bodies are never moved by the collision response.
    pub is_static: bool,
    /// Bounciness: 0 = fully inelastic, 1 = fully elastic.
    pub restitution: f32,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            is_static: false,
            restitution: 0.0,
        }
    }
}

impl PhysicsBody {
    /// A body that the resolver never moves.
    pub fn fixed() -> Self {
        Self {
            is_static: true,
            ..Self::default()
        }
    }

    /// Set the mass. Non-positive or non-finite values keep the default mass.
    pub fn with_mass(mut self, mass: f32) -> Self {
        if mass.is_finite() && mass > 0.0 {
            self.mass = mass;
        } else {
            warn!(
                "PhysicsBody::with_mass({}) ignored, using default mass {}",
                mass, DEFAULT_MASS
            );
            self.mass = DEFAULT_MASS;
        }
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }
}
