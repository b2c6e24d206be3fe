//! Tile grid collision blocking.
//!
//! For every moving entity with a [`BoxCollider`], [`tile_collision_system`]
//! predicts the collider's bounds one step ahead and samples the
//! [`TileMap`] along the leading edge of each moving axis. A blocked axis
//! has its velocity component zeroed; the other axis is left alone, so the
//! entity slides along walls once the movement system integrates it.
//!
//! Samples along an edge are spaced half a tile apart, so a box can never
//! straddle a tile without one sample landing in it. Sampling stops at the
//! first solid tile.
//!
//! Max edges are treated as exclusive: the leading edge of a box moving in
//! the positive direction is sampled at `max - 0.001 * tile size`, not at
//! `max` itself, and so is the far end of the perpendicular span. A box
//! resting exactly on a tile boundary is therefore not blocked by the
//! neighbouring row or column, and a predicted max edge that only reaches
//! into a tile by less than that inset is not blocked either.
//!
//! Runs before [`movement`](crate::systems::movement::movement). Without a
//! `TileMap` resource the system does nothing.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::boxcollider::{Aabb, BoxCollider};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;

/// How far inside a max edge it is sampled, as a fraction of the tile size.
const EDGE_INSET_FRACTION: f32 = 0.001;
/// Upper bound on interior samples along one edge.
const MAX_EDGE_SAMPLES: usize = 4096;

/// Coordinates from `min` to just inside `max`, `step` apart. Both ends are
/// always included.
///
/// The sample count is computed up front, so the iterator ends even when
/// `step` is below the float resolution at `min`.
fn span_samples(min: f32, max: f32, step: f32, inset: f32) -> impl Iterator<Item = f32> {
    let last = (max - inset).max(min);
    let span = last - min;
    let count = if span > 0.0 && step > 0.0 {
        ((span / step).ceil() as usize).min(MAX_EDGE_SAMPLES)
    } else {
        0
    };
    (0..count)
        .map(move |k| min + k as f32 * step)
        .filter(move |value| *value < last)
        .chain(std::iter::once(last))
}

fn leading_edge(min: f32, max: f32, velocity: f32, inset: f32) -> f32 {
    if velocity > 0.0 {
        (max - inset).max(min)
    } else {
        min
    }
}

/// True if any tile under the leading vertical edge of `next` is solid.
pub fn blocked_horizontally(tilemap: &TileMap, next: &Aabb, velocity_x: f32) -> bool {
    let inset_x = tilemap.tile_width * EDGE_INSET_FRACTION;
    let inset_y = tilemap.tile_height * EDGE_INSET_FRACTION;
    let x = leading_edge(next.min.x, next.max.x, velocity_x, inset_x);
    span_samples(next.min.y, next.max.y, tilemap.tile_height * 0.5, inset_y).any(|y| {
        let (tx, ty) = tilemap.world_to_tile(Vec2::new(x, y));
        tilemap.is_solid_at(tx, ty)
    })
}

/// True if any tile under the leading horizontal edge of `next` is solid.
pub fn blocked_vertically(tilemap: &TileMap, next: &Aabb, velocity_y: f32) -> bool {
    let inset_x = tilemap.tile_width * EDGE_INSET_FRACTION;
    let inset_y = tilemap.tile_height * EDGE_INSET_FRACTION;
    let y = leading_edge(next.min.y, next.max.y, velocity_y, inset_y);
    span_samples(next.min.x, next.max.x, tilemap.tile_width * 0.5, inset_x).any(|x| {
        let (tx, ty) = tilemap.world_to_tile(Vec2::new(x, y));
        tilemap.is_solid_at(tx, ty)
    })
}

/// Zero the velocity components that would carry an entity into a solid tile.
pub fn tile_collision_system(
    time: Res<WorldTime>,
    tilemap: Option<Res<TileMap>>,
    mut query: Query<(Entity, &MapPosition, &mut RigidBody, &BoxCollider)>,
) {
    let Some(tilemap) = tilemap else {
        return;
    };
    let dt = time.delta;

    for (entity, position, mut rigidbody, collider) in query.iter_mut() {
        let velocity = rigidbody.velocity;
        if velocity == Vec2::ZERO || !collider.is_valid() {
            continue;
        }

        let next = collider.aabb(position.pos + velocity * dt);
        let blocked_x = velocity.x != 0.0 && blocked_horizontally(&tilemap, &next, velocity.x);
        let blocked_y = velocity.y != 0.0 && blocked_vertically(&tilemap, &next, velocity.y);

        if blocked_x || blocked_y {
            trace!(
                "Tile block {:?}: x={} y={} velocity {:?}",
                entity, blocked_x, blocked_y, velocity
            );
        }
        if blocked_x {
            rigidbody.velocity.x = 0.0;
        }
        if blocked_y {
            rigidbody.velocity.y = 0.0;
        }
    }
}
