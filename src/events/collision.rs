//! Collision event type and reference observers.
//!
//! The collision detector triggers one [`CollisionEvent`] per overlapping
//! pair, synchronously: every observer runs, and its commands are applied,
//! before the detector moves on to the next pair. Observers can therefore
//! destroy entities and later pairs involving them will be skipped.
//!
//! Two observers are provided as arcade-style defaults:
//! [`observe_projectile_hit`] and [`observe_pickup_collected`]. Register them
//! with `world.add_observer(...)` or replace them with game-specific logic.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::collisionlayer::CollisionLayer;
use crate::components::tags::PendingDestroy;

/// Event fired when two entities with BoxCollider overlap on layers that
/// are allowed to collide.
///
/// `a` was gathered before `b` in the detection pass. `normal` is a unit
/// vector along the axis of least penetration, pointing from `a` toward `b`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
    /// Center of the overlap rectangle.
    pub point: Vec2,
    pub normal: Vec2,
    pub layer_a: CollisionLayer,
    pub layer_b: CollisionLayer,
    /// Overlap along `normal`.
    pub penetration: f32,
}

impl CollisionEvent {
    /// True when the pair is `(x, y)` in either order.
    pub fn involves_layers(&self, x: CollisionLayer, y: CollisionLayer) -> bool {
        (self.layer_a == x && self.layer_b == y) || (self.layer_a == y && self.layer_b == x)
    }

    /// The participant on `layer`, and the other one. Prefers `a` if both match.
    pub fn split_by_layer(&self, layer: CollisionLayer) -> Option<(Entity, Entity)> {
        if self.layer_a == layer {
            Some((self.a, self.b))
        } else if self.layer_b == layer {
            Some((self.b, self.a))
        } else {
            None
        }
    }
}

fn is_projectile(layer: CollisionLayer) -> bool {
    matches!(
        layer,
        CollisionLayer::Projectile
            | CollisionLayer::PlayerProjectile
            | CollisionLayer::EnemyProjectile
    )
}

/// Destroys a projectile when it hits anything, and the thing it hit when
/// that is a player or an enemy.
pub fn observe_projectile_hit(trigger: On<CollisionEvent>, mut commands: Commands) {
    let event = trigger.event();
    let (projectile, target, target_layer) = if is_projectile(event.layer_a) {
        (event.a, event.b, event.layer_b)
    } else if is_projectile(event.layer_b) {
        (event.b, event.a, event.layer_a)
    } else {
        return;
    };

    debug!("Projectile {:?} hit {:?} ({})", projectile, target, target_layer);
    commands.entity(projectile).try_insert(PendingDestroy);
    if matches!(target_layer, CollisionLayer::Player | CollisionLayer::Enemy) {
        commands.entity(target).try_insert(PendingDestroy);
    }
}

/// Destroys a pickup touched by a player.
pub fn observe_pickup_collected(trigger: On<CollisionEvent>, mut commands: Commands) {
    let event = trigger.event();
    if !event.involves_layers(CollisionLayer::Pickup, CollisionLayer::Player) {
        return;
    }
    if let Some((pickup, player)) = event.split_by_layer(CollisionLayer::Pickup) {
        debug!("Pickup {:?} collected by {:?}", pickup, player);
        commands.entity(pickup).try_insert(PendingDestroy);
    }
}
