//! Marker components.
//!
//! The semantic tags ([`Player`], [`Enemy`], [`Projectile`], [`Static`],
//! [`Environment`]) are how game code describes what an entity is. The
//! collision system infers a [`CollisionLayer`](super::collisionlayer::CollisionLayer)
//! from them when no explicit layer is set.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Enemy;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Projectile;

/// Immovable scenery. Infers the environment layer.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Static;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Environment;

/// Entity scheduled for removal at the end of the frame.
///
/// The collision detector ignores these entities and treats an entity that
/// receives this marker mid-pass as already destroyed.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct PendingDestroy;
