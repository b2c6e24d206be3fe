use bevy_ecs::prelude::*;

use crate::components::tags::PendingDestroy;

/// Despawn every entity marked [`PendingDestroy`]. Runs at the end of the frame.
pub fn despawn_pending_system(mut commands: Commands, query: Query<Entity, With<PendingDestroy>>) {
    for entity in query.iter() {
        commands.entity(entity).try_despawn();
    }
}
