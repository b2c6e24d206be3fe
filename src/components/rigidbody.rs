//! Kinematic body: velocity plus named acceleration forces.
//!
//! The tile blocker and the collision response write `velocity`; the
//! movement system integrates it into [`MapPosition`](super::mapposition::MapPosition).
//! A `frozen` body keeps its velocity but is not integrated.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use rustc_hash::FxHashMap;

/// A named acceleration that can be switched on and off (gravity, thrust...).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccelerationForce {
    /// Acceleration in world units per second squared.
    pub value: Vec2,
    /// Disabled forces stay registered but add nothing to
    /// [`RigidBody::total_acceleration`].
    pub enabled: bool,
}

impl AccelerationForce {
    /// Create an enabled force.
    pub fn new(value: Vec2) -> Self {
        Self {
            value,
            enabled: true,
        }
    }
}

/// Velocity carrier for moving entities.
///
/// # Fields
/// - `velocity` - current velocity in world units per second
/// - `forces` - named accelerations, each toggled independently
/// - `frozen` - when true, the movement system skips this entity
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_velocity(Vec2::new(120.0, 0.0));
/// rb.add_force("gravity", Vec2::new(0.0, 980.0));
///
/// // Standing on a platform
/// rb.set_force_enabled("gravity", false);
/// ```
#[derive(Component, Clone, Debug, Default)]
pub struct RigidBody {
    /// Current velocity in world units per second. Zeroed per axis by the
    /// tile blocker, rewritten by the impulse response.
    pub velocity: Vec2,
    /// Named accelerations, summed by [`RigidBody::total_acceleration`].
    pub forces: FxHashMap<String, AccelerationForce>,
    /// When true, the movement system leaves the entity alone.
    pub frozen: bool,
}

impl RigidBody {
    /// Body at rest with no forces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Body moving at `velocity` with no forces.
    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::default()
        }
    }

    /// Add or replace a named force (enabled).
    pub fn add_force(&mut self, name: &str, value: Vec2) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Remove a named force. No-op if it doesn't exist.
    pub fn remove_force(&mut self, name: &str) {
        self.forces.remove(name);
    }

    /// Enable or disable a named force. Returns false if it doesn't exist.
    pub fn set_force_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.forces.get_mut(name) {
            Some(force) => {
                force.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Sum of all enabled forces.
    pub fn total_acceleration(&self) -> Vec2 {
        self.forces
            .values()
            .filter(|f| f.enabled)
            .fold(Vec2::ZERO, |acc, f| acc + f.value)
    }

    /// Stop integrating this body. Velocity is kept.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Resume integrating this body.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}
