//! Entity-vs-entity collision detection.
//!
//! # System Flow
//!
//! Each frame, [`collision_detector`]:
//!
//! 1. Gathers every entity with [`MapPosition`] and a valid [`BoxCollider`]
//!    that is not [`PendingDestroy`], snapshotting its world AABB and
//!    resolved [`CollisionLayer`].
//! 2. Tests every unordered pair `(i, j)`, `i < j`, in gather order, skipping
//!    pairs the [`CollisionMatrix`](crate::resources::collisionmatrix::CollisionMatrix)
//!    disallows.
//! 3. For overlapping pairs, re-checks that both entities are still alive,
//!    triggers a [`CollisionEvent`] and applies the observers' commands.
//! 4. If collision response is enabled, resolves the pair immediately.
//!
//! The pass is O(n²) over collidable entities. Positions are snapshotted in
//! step 1, so a correction applied while resolving one pair is not seen by
//! later pairs in the same pass.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::boxcollider::{Aabb, BoxCollider};
use crate::components::collisionlayer::{CollisionLayer, resolve_layer};
use crate::components::mapposition::MapPosition;
use crate::components::tags::PendingDestroy;
use crate::events::collision::CollisionEvent;
use crate::resources::collisionconfig::CollisionConfig;
use crate::systems::collisionresponse::resolve_collision;

#[derive(Debug, Clone, Copy)]
struct CollisionCandidate {
    entity: Entity,
    aabb: Aabb,
    layer: CollisionLayer,
}

fn gather_candidates(world: &mut World) -> Vec<CollisionCandidate> {
    let mut query =
        world.query_filtered::<(Entity, &MapPosition, &BoxCollider), Without<PendingDestroy>>();
    let world: &World = world;
    query
        .iter(world)
        .filter_map(|(entity, position, collider)| {
            if !collider.is_valid() {
                debug!(
                    "Skipping {:?}: invalid collider size {:?}",
                    entity, collider.size
                );
                return None;
            }
            Some(CollisionCandidate {
                entity,
                aabb: collider.aabb(position.pos),
                layer: resolve_layer(world.entity(entity)),
            })
        })
        .collect()
}

/// Alive means spawned and not marked [`PendingDestroy`].
fn is_alive(world: &World, entity: Entity) -> bool {
    world
        .get_entity(entity)
        .is_ok_and(|e| !e.contains::<PendingDestroy>())
}

/// Run one full detection pass and return the events that were published.
///
/// Events are triggered (and, if enabled, resolved) as they are found; the
/// returned list is the same events in publication order.
pub fn detect_collisions(world: &mut World) -> Vec<CollisionEvent> {
    let config = world
        .get_resource::<CollisionConfig>()
        .cloned()
        .unwrap_or_default();
    let candidates = gather_candidates(world);
    let mut published = Vec::new();

    for (i, first) in candidates.iter().enumerate() {
        for second in &candidates[i + 1..] {
            if !config.matrix.can_collide(first.layer, second.layer) {
                continue;
            }
            let Some(contact) = first.aabb.contact(&second.aabb) else {
                continue;
            };
            if !is_alive(world, first.entity) || !is_alive(world, second.entity) {
                debug!(
                    "Dropping collision {:?}/{:?}: entity destroyed earlier this pass",
                    first.entity, second.entity
                );
                continue;
            }

            let event = CollisionEvent {
                a: first.entity,
                b: second.entity,
                point: contact.point,
                normal: contact.normal,
                layer_a: first.layer,
                layer_b: second.layer,
                penetration: contact.depth,
            };
            debug!(
                "Collision {:?} ({}) / {:?} ({}) normal {:?} depth {}",
                event.a, event.layer_a, event.b, event.layer_b, event.normal, event.penetration
            );
            world.trigger(event);
            world.flush();
            published.push(event);

            if config.enable_collision_response
                && is_alive(world, first.entity)
                && is_alive(world, second.entity)
            {
                resolve_collision(
                    world,
                    first.entity,
                    second.entity,
                    contact.normal,
                    contact.depth,
                );
            }
        }
    }

    published
}

/// Exclusive system wrapper around [`detect_collisions`].
pub fn collision_detector(world: &mut World) {
    detect_collisions(world);
}

/// One-off check: do these two entities' colliders overlap right now?
///
/// Ignores layers. Returns false if either entity lacks a position or collider.
pub fn entities_overlap(world: &World, a: Entity, b: Entity) -> bool {
    let aabb = |entity: Entity| -> Option<Aabb> {
        let position = world.get::<MapPosition>(entity)?;
        let collider = world.get::<BoxCollider>(entity)?;
        Some(collider.aabb(position.pos))
    };
    match (aabb(a), aabb(b)) {
        (Some(first), Some(second)) => first.intersects(&second),
        _ => false,
    }
}
