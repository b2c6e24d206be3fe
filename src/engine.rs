//! Engine composition: world, resources and the per-frame schedule.
//!
//! # Frame order
//!
//! 1. [`tile_collision_system`] – zero velocity components blocked by tiles
//! 2. [`movement`] – integrate velocity into position
//! 3. [`collision_detector`] – entity-vs-entity events and optional response
//! 4. [`despawn_pending_system`] – remove entities marked for destruction
//!
//! Observers for [`CollisionEvent`](crate::events::collision::CollisionEvent)
//! are registered directly on [`Engine::world`].

use bevy_ecs::prelude::*;

use crate::resources::collisionconfig::CollisionConfig;
use crate::resources::tilemap::TileMap;
use crate::resources::worldtime::WorldTime;
use crate::systems::collision::collision_detector;
use crate::systems::movement::movement;
use crate::systems::pendingdestroy::despawn_pending_system;
use crate::systems::tilecollision::tile_collision_system;
use crate::systems::time::update_world_time;

/// Build the update schedule in frame order.
pub fn build_update_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(tile_collision_system.before(movement));
    update.add_systems(movement);
    update.add_systems(collision_detector.after(movement));
    update.add_systems(despawn_pending_system.after(collision_detector));
    update
}

pub struct Engine {
    pub world: World,
    schedule: Schedule,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(CollisionConfig::default())
    }
}

impl Engine {
    pub fn new(config: CollisionConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(config);
        Self {
            world,
            schedule: build_update_schedule(),
        }
    }

    /// Enable tile blocking against this map.
    pub fn insert_tilemap(&mut self, tilemap: TileMap) {
        self.world.insert_resource(tilemap);
    }

    /// Disable tile blocking, returning the map if there was one.
    pub fn remove_tilemap(&mut self) -> Option<TileMap> {
        self.world.remove_resource::<TileMap>()
    }

    pub fn config_mut(&mut self) -> Mut<'_, CollisionConfig> {
        self.world
            .get_resource_or_insert_with(CollisionConfig::default)
    }

    /// Advance one frame by `dt` unscaled seconds.
    pub fn tick(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }
}
