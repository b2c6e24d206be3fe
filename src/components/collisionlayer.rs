//! Collision layers and per-entity layer resolution.
//!
//! Every collidable entity belongs to exactly one [`CollisionLayer`]. The
//! layer comes from, in order of precedence:
//!
//! 1. an explicit [`CollisionLayerTag`] component,
//! 2. the first semantic tag found among [`Player`], [`Enemy`],
//!    [`Projectile`], [`Static`] and [`Environment`],
//! 3. [`CollisionLayer::Default`].
//!
//! Whether two layers interact is decided by the
//! [`CollisionMatrix`](crate::resources::collisionmatrix::CollisionMatrix).

use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::Component;
use bevy_ecs::world::EntityRef;

use crate::components::tags::{Enemy, Environment, Player, Projectile, Static};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollisionLayer {
    Default,
    Player,
    Enemy,
    Projectile,
    Environment,
    PlayerProjectile,
    EnemyProjectile,
    Pickup,
    Trigger,
}

impl CollisionLayer {
    pub const COUNT: usize = 9;

    pub const ALL: [CollisionLayer; Self::COUNT] = [
        CollisionLayer::Default,
        CollisionLayer::Player,
        CollisionLayer::Enemy,
        CollisionLayer::Projectile,
        CollisionLayer::Environment,
        CollisionLayer::PlayerProjectile,
        CollisionLayer::EnemyProjectile,
        CollisionLayer::Pickup,
        CollisionLayer::Trigger,
    ];

    /// Row/column of this layer in the collision matrix.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            CollisionLayer::Default => "default",
            CollisionLayer::Player => "player",
            CollisionLayer::Enemy => "enemy",
            CollisionLayer::Projectile => "projectile",
            CollisionLayer::Environment => "environment",
            CollisionLayer::PlayerProjectile => "player_projectile",
            CollisionLayer::EnemyProjectile => "enemy_projectile",
            CollisionLayer::Pickup => "pickup",
            CollisionLayer::Trigger => "trigger",
        }
    }
}

impl fmt::Display for CollisionLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CollisionLayer {
    type Err = String;

    /// Accepts `player_projectile`, `PlayerProjectile` or `playerprojectile`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        CollisionLayer::ALL
            .into_iter()
            .find(|layer| layer.name().replace('_', "") == wanted)
            .ok_or_else(|| format!("Unknown collision layer '{}'", s))
    }
}

/// Explicit layer assignment. Takes precedence over tag inference.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionLayerTag(pub CollisionLayer);

/// Resolve the collision layer of an entity.
pub fn resolve_layer(entity: EntityRef) -> CollisionLayer {
    if let Some(tag) = entity.get::<CollisionLayerTag>() {
        return tag.0;
    }
    if entity.contains::<Player>() {
        CollisionLayer::Player
    } else if entity.contains::<Enemy>() {
        CollisionLayer::Enemy
    } else if entity.contains::<Projectile>() {
        CollisionLayer::Projectile
    } else if entity.contains::<Static>() || entity.contains::<Environment>() {
        CollisionLayer::Environment
    } else {
        CollisionLayer::Default
    }
}
