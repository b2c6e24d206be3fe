//! Demo scene used by the `boxworld` binary.
//!
//! Builds a walled arena with a few pillars, then spawns a player, bouncing
//! enemies, pickups and a volley of player projectiles. A [`CollisionStats`]
//! observer tallies every collision by layer pair.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;
use rustc_hash::FxHashMap;

use crate::components::boxcollider::BoxCollider;
use crate::components::collisionlayer::{CollisionLayer, CollisionLayerTag};
use crate::components::mapposition::MapPosition;
use crate::components::physicsbody::PhysicsBody;
use crate::components::rigidbody::RigidBody;
use crate::components::tags::{Enemy, Player, Projectile};
use crate::events::collision::CollisionEvent;
use crate::resources::tilemap::{TileMap, Tileset};

pub const WALL_TILE: u32 = 1;
pub const FLOOR_TILE: u32 = 0;

const ACTOR_SIZE: f32 = 12.0;
const PICKUP_SIZE: f32 = 8.0;
const PROJECTILE_SIZE: f32 = 4.0;
const ENEMY_SPEED: f32 = 90.0;
const PLAYER_SPEED: f32 = 120.0;
const PROJECTILE_SPEED: f32 = 300.0;

/// Collision counts per layer pair (pair stored with the smaller layer first).
#[derive(Resource, Debug, Default)]
pub struct CollisionStats {
    pub pairs: FxHashMap<(CollisionLayer, CollisionLayer), u32>,
    pub total: u32,
}

impl CollisionStats {
    pub fn record(&mut self, a: CollisionLayer, b: CollisionLayer) {
        let key = if a <= b { (a, b) } else { (b, a) };
        *self.pairs.entry(key).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, a: CollisionLayer, b: CollisionLayer) -> u32 {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.pairs.get(&key).copied().unwrap_or(0)
    }

    pub fn log_summary(&self) {
        info!("{} collisions", self.total);
        let mut pairs: Vec<_> = self.pairs.iter().collect();
        pairs.sort();
        for ((a, b), count) in pairs {
            info!("  {:>18} / {:<18} {}", a.name(), b.name(), count);
        }
    }
}

pub fn observe_collision_stats(trigger: On<CollisionEvent>, mut stats: ResMut<CollisionStats>) {
    let event = trigger.event();
    stats.record(event.layer_a, event.layer_b);
}

/// Walled arena: a one-tile border and a pillar every few tiles.
pub fn build_arena(width: u32, height: u32, tile_size: f32) -> Result<TileMap, String> {
    if width < 3 || height < 3 {
        return Err(format!("Arena {}x{} is too small", width, height));
    }
    let mut map = TileMap::new(width, height, tile_size, tile_size)?
        .with_tileset(Tileset::with_solid([WALL_TILE]));
    let layer = map.add_layer("walls");
    let (w, h) = (width as i32, height as i32);
    map.fill_rect(layer, 0, 0, w, h, Some(FLOOR_TILE));
    map.fill_rect(layer, 0, 0, w, 1, Some(WALL_TILE));
    map.fill_rect(layer, 0, h - 1, w, 1, Some(WALL_TILE));
    map.fill_rect(layer, 0, 0, 1, h, Some(WALL_TILE));
    map.fill_rect(layer, w - 1, 0, 1, h, Some(WALL_TILE));
    for y in (4..h - 3).step_by(6) {
        for x in (4..w - 3).step_by(8) {
            map.set_tile(layer, x, y, Some(WALL_TILE));
        }
    }
    Ok(map)
}

fn random_direction(rng: &mut fastrand::Rng) -> Vec2 {
    let angle = rng.f32() * std::f32::consts::TAU;
    Vec2::new(angle.cos(), angle.sin())
}

/// Random point inside the arena's walls, aligned so a box of `size` fits
/// in the free tile it lands on. The map must be at least 3x3 tiles.
fn random_free_spot(rng: &mut fastrand::Rng, map: &TileMap, size: f32) -> Vec2 {
    for _ in 0..32 {
        let tx = 1 + rng.i32(0..(map.width as i32 - 2));
        let ty = 1 + rng.i32(0..(map.height as i32 - 2));
        if !map.is_solid_at(tx, ty) {
            let slack_x = (map.tile_width - size).max(0.0);
            let slack_y = (map.tile_height - size).max(0.0);
            return map.tile_to_world(tx, ty) + Vec2::new(rng.f32() * slack_x, rng.f32() * slack_y);
        }
    }
    map.tile_to_world(1, 1)
}

/// Spawn the demo cast inside the map's one-tile border. Returns the player
/// entity, or an error if the map has no interior to spawn in.
pub fn spawn_demo_entities(
    world: &mut World,
    rng: &mut fastrand::Rng,
    map: &TileMap,
    enemies: u32,
    pickups: u32,
) -> Result<Entity, String> {
    if map.width < 3 || map.height < 3 {
        return Err(format!(
            "Map {}x{} has no interior to spawn entities in",
            map.width, map.height
        ));
    }

    let spot = random_free_spot(rng, map, ACTOR_SIZE);
    let player = world
        .spawn((
            Player,
            MapPosition::from_vec(spot),
            BoxCollider::new(ACTOR_SIZE, ACTOR_SIZE),
            RigidBody::with_velocity(random_direction(rng) * PLAYER_SPEED),
            PhysicsBody::default().with_mass(2.0),
        ))
        .id();

    for _ in 0..enemies {
        let spot = random_free_spot(rng, map, ACTOR_SIZE);
        world.spawn((
            Enemy,
            MapPosition::from_vec(spot),
            BoxCollider::new(ACTOR_SIZE, ACTOR_SIZE),
            RigidBody::with_velocity(random_direction(rng) * ENEMY_SPEED),
            PhysicsBody::default().with_restitution(1.0),
        ));
    }

    for _ in 0..pickups {
        let spot = random_free_spot(rng, map, PICKUP_SIZE);
        world.spawn((
            CollisionLayerTag(CollisionLayer::Pickup),
            MapPosition::from_vec(spot),
            BoxCollider::new(PICKUP_SIZE, PICKUP_SIZE),
        ));
    }

    let origin = spot + Vec2::splat((ACTOR_SIZE - PROJECTILE_SIZE) * 0.5);
    for i in 0..8 {
        let angle = i as f32 * std::f32::consts::FRAC_PI_4;
        world.spawn((
            Projectile,
            CollisionLayerTag(CollisionLayer::PlayerProjectile),
            MapPosition::from_vec(origin),
            BoxCollider::new(PROJECTILE_SIZE, PROJECTILE_SIZE),
            RigidBody::with_velocity(Vec2::new(angle.cos(), angle.sin()) * PROJECTILE_SPEED),
        ));
    }

    Ok(player)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_has_solid_border_and_open_interior() {
        let map = build_arena(20, 12, 16.0).unwrap();
        for x in 0..20 {
            assert!(map.is_solid_at(x, 0));
            assert!(map.is_solid_at(x, 11));
        }
        for y in 0..12 {
            assert!(map.is_solid_at(0, y));
            assert!(map.is_solid_at(19, y));
        }
        assert!(!map.is_solid_at(1, 1));
        assert!(map.is_solid_at(4, 4));
    }

    #[test]
    fn arena_rejects_tiny_sizes() {
        assert!(build_arena(2, 10, 16.0).is_err());
    }

    #[test]
    fn stats_normalize_pair_order() {
        let mut stats = CollisionStats::default();
        stats.record(CollisionLayer::Player, CollisionLayer::Enemy);
        stats.record(CollisionLayer::Enemy, CollisionLayer::Player);
        assert_eq!(stats.count(CollisionLayer::Player, CollisionLayer::Enemy), 2);
        assert_eq!(stats.total, 2);
    }

    #[test]
    fn spawned_entities_start_outside_walls() {
        let map = build_arena(20, 12, 16.0).unwrap();
        let mut world = World::new();
        let mut rng = fastrand::Rng::with_seed(7);
        spawn_demo_entities(&mut world, &mut rng, &map, 5, 5).unwrap();
        let mut query = world.query::<(&MapPosition, &BoxCollider)>();
        for (position, collider) in query.iter(&world) {
            let aabb = collider.aabb(position.pos);
            let (tx, ty) = map.world_to_tile(aabb.min);
            assert!(!map.is_solid_at(tx, ty));
        }
    }

    #[test]
    fn spawning_on_a_map_without_interior_fails() {
        let json = r#"{ "tile_size": 16, "map_width": 2, "map_height": 2,
            "layers": [ { "name": "walls", "positions": [] } ] }"#;
        let map = TileMap::from_json_str(json).unwrap();
        let mut world = World::new();
        let mut rng = fastrand::Rng::with_seed(1);
        assert!(spawn_demo_entities(&mut world, &mut rng, &map, 3, 3).is_err());
        assert_eq!(world.query::<Entity>().iter(&world).count(), 0);

        let map = build_arena(3, 3, 16.0).unwrap();
        let player = spawn_demo_entities(&mut world, &mut rng, &map, 1, 1).unwrap();
        assert!(world.get::<Player>(player).is_some());
    }
}
