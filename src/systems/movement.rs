//! Velocity integration.
//!
//! Runs after the tile blocker so a blocked axis, already zeroed, does not
//! advance, while the free axis keeps sliding.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldtime::WorldTime;

/// Apply enabled forces to velocity, then velocity to position.
pub fn movement(mut query: Query<(&mut MapPosition, &mut RigidBody)>, time: Res<WorldTime>) {
    let dt = time.delta;
    for (mut position, mut rigidbody) in query.iter_mut() {
        if rigidbody.frozen {
            continue;
        }
        let acceleration = rigidbody.total_acceleration();
        if acceleration != glam::Vec2::ZERO {
            rigidbody.velocity += acceleration * dt;
        }
        let velocity = rigidbody.velocity;
        position.pos += velocity * dt;
    }
}
