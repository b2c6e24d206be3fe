//! Impulse-based collision response.
//!
//! Called by the detector for each published pair when
//! [`CollisionConfig::enable_collision_response`](crate::resources::collisionconfig::CollisionConfig)
//! is set. One pass, one iteration per pair: position correction followed by
//! a restitution impulse along the contact normal. No friction, no rotation.
//!
//! The math lives in [`solve_contact`], which works on plain [`BodyState`]
//! values; [`resolve_collision`] loads them from the world and writes back.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::mapposition::MapPosition;
use crate::components::physicsbody::PhysicsBody;
use crate::components::rigidbody::RigidBody;

/// Penetration tolerated without correction.
pub const POSITION_CORRECTION_SLOP: f32 = 0.01;
/// Fraction of the remaining penetration removed per resolution.
pub const POSITION_CORRECTION_PERCENT: f32 = 0.8;

/// Everything the solver needs to know about one participant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vec2,
    /// `None` when the entity has no [`RigidBody`].
    pub velocity: Option<Vec2>,
    pub mass: f32,
    pub is_static: bool,
    pub restitution: f32,
}

impl BodyState {
    pub fn new(position: Vec2, velocity: Option<Vec2>, physics: PhysicsBody) -> Self {
        Self {
            position,
            velocity,
            mass: physics.mass,
            is_static: physics.is_static,
            restitution: physics.restitution,
        }
    }
}

/// Separate two bodies and apply a restitution impulse.
///
/// `normal` points from `a` toward `b`; `depth` is the penetration along it.
pub fn solve_contact(a: &mut BodyState, b: &mut BodyState, normal: Vec2, depth: f32) {
    if a.is_static && b.is_static {
        return;
    }

    if depth > 0.0 {
        let correction = normal * ((depth - POSITION_CORRECTION_SLOP).max(0.0) * POSITION_CORRECTION_PERCENT);
        if !a.is_static && !b.is_static {
            let total = a.mass + b.mass;
            a.position -= correction * (b.mass / total);
            b.position += correction * (a.mass / total);
        } else if b.is_static {
            a.position -= correction;
        } else {
            b.position += correction;
        }
    }

    let (Some(velocity_a), Some(velocity_b)) = (a.velocity, b.velocity) else {
        return;
    };
    let velocity_along_normal = (velocity_b - velocity_a).dot(normal);
    if velocity_along_normal >= 0.0 {
        return;
    }

    let restitution = (a.restitution + b.restitution) * 0.5;
    let magnitude =
        -(1.0 + restitution) * velocity_along_normal / (1.0 / a.mass + 1.0 / b.mass);
    let impulse = normal * magnitude;

    if !a.is_static {
        a.velocity = Some(velocity_a - impulse / a.mass);
    }
    if !b.is_static {
        b.velocity = Some(velocity_b + impulse / b.mass);
    }
}

fn load_body(world: &World, entity: Entity) -> Option<BodyState> {
    let position = world.get::<MapPosition>(entity)?.pos;
    let velocity = world.get::<RigidBody>(entity).map(|rb| rb.velocity);
    let physics = world.get::<PhysicsBody>(entity).copied().unwrap_or_default();
    Some(BodyState::new(position, velocity, physics))
}

fn store_body(world: &mut World, entity: Entity, state: &BodyState) {
    if state.is_static {
        return;
    }
    if let Some(mut position) = world.get_mut::<MapPosition>(entity) {
        position.pos = state.position;
    }
    if let (Some(velocity), Some(mut rigidbody)) = (state.velocity, world.get_mut::<RigidBody>(entity)) {
        rigidbody.velocity = velocity;
    }
}

/// Resolve one detected collision against the live world state.
///
/// Entities without a [`MapPosition`] (or already despawned) are left alone.
/// Missing [`PhysicsBody`] means dynamic, mass 1, restitution 0.
pub fn resolve_collision(world: &mut World, a: Entity, b: Entity, normal: Vec2, depth: f32) {
    let (Some(mut state_a), Some(mut state_b)) = (load_body(world, a), load_body(world, b)) else {
        return;
    };
    solve_contact(&mut state_a, &mut state_b, normal, depth);
    trace!(
        "Resolved {:?}/{:?}: positions {:?}/{:?}, velocities {:?}/{:?}",
        a, b, state_a.position, state_b.position, state_a.velocity, state_b.velocity
    );
    store_body(world, a, &state_a);
    store_body(world, b, &state_b);
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec2, b: Vec2) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
    }

    fn body(x: f32, velocity: Option<Vec2>, physics: PhysicsBody) -> BodyState {
        BodyState::new(Vec2::new(x, 0.0), velocity, physics)
    }

    // ==================== POSITION CORRECTION ====================

    #[test]
    fn equal_masses_split_correction() {
        let mut a = body(0.0, None, PhysicsBody::default());
        let mut b = body(5.0, None, PhysicsBody::default());
        solve_contact(&mut a, &mut b, Vec2::X, 1.01);
        // (1.01 - 0.01) * 0.8 = 0.8, half each
        assert!(vec_approx_eq(a.position, Vec2::new(-0.4, 0.0)));
        assert!(vec_approx_eq(b.position, Vec2::new(5.4, 0.0)));
    }

    #[test]
    fn heavier_body_moves_less() {
        let mut a = body(0.0, None, PhysicsBody::default().with_mass(3.0));
        let mut b = body(5.0, None, PhysicsBody::default().with_mass(1.0));
        solve_contact(&mut a, &mut b, Vec2::X, 1.01);
        assert!(vec_approx_eq(a.position, Vec2::new(-0.2, 0.0)));
        assert!(vec_approx_eq(b.position, Vec2::new(5.6, 0.0)));
    }

    #[test]
    fn dynamic_body_takes_full_correction_against_static() {
        let mut wall = body(0.0, None, PhysicsBody::fixed());
        let mut ball = body(5.0, None, PhysicsBody::default().with_mass(10.0));
        solve_contact(&mut wall, &mut ball, Vec2::X, 1.01);
        assert_eq!(wall.position, Vec2::ZERO);
        assert!(vec_approx_eq(ball.position, Vec2::new(5.8, 0.0)));

        let mut ball = body(0.0, None, PhysicsBody::default());
        let mut wall = body(5.0, None, PhysicsBody::fixed());
        solve_contact(&mut ball, &mut wall, Vec2::X, 1.01);
        assert!(vec_approx_eq(ball.position, Vec2::new(-0.8, 0.0)));
        assert_eq!(wall.position, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn penetration_within_slop_is_not_corrected() {
        let mut a = body(0.0, None, PhysicsBody::default());
        let mut b = body(5.0, None, PhysicsBody::default());
        solve_contact(&mut a, &mut b, Vec2::X, 0.005);
        assert_eq!(a.position, Vec2::ZERO);
        assert_eq!(b.position, Vec2::new(5.0, 0.0));
    }

    // ==================== VELOCITY IMPULSE ====================

    #[test]
    fn static_pair_is_untouched() {
        let mut a = body(0.0, Some(Vec2::new(10.0, 0.0)), PhysicsBody::fixed());
        let mut b = body(5.0, Some(Vec2::new(-10.0, 0.0)), PhysicsBody::fixed());
        let (before_a, before_b) = (a, b);
        solve_contact(&mut a, &mut b, Vec2::X, 3.0);
        assert_eq!(a, before_a);
        assert_eq!(b, before_b);
    }

    #[test]
    fn inelastic_head_on_stops_both() {
        let mut a = body(0.0, Some(Vec2::new(10.0, 0.0)), PhysicsBody::default());
        let mut b = body(5.0, Some(Vec2::new(-10.0, 0.0)), PhysicsBody::default());
        solve_contact(&mut a, &mut b, Vec2::X, 0.0);
        assert!(vec_approx_eq(a.velocity.unwrap(), Vec2::ZERO));
        assert!(vec_approx_eq(b.velocity.unwrap(), Vec2::ZERO));
    }

    #[test]
    fn elastic_head_on_swaps_velocities() {
        let elastic = PhysicsBody::default().with_restitution(1.0);
        let mut a = body(0.0, Some(Vec2::new(10.0, 0.0)), elastic);
        let mut b = body(5.0, Some(Vec2::new(-10.0, 0.0)), elastic);
        solve_contact(&mut a, &mut b, Vec2::X, 0.0);
        assert!(vec_approx_eq(a.velocity.unwrap(), Vec2::new(-10.0, 0.0)));
        assert!(vec_approx_eq(b.velocity.unwrap(), Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn restitution_is_averaged() {
        let mut a = body(0.0, Some(Vec2::new(10.0, 0.0)), PhysicsBody::default().with_restitution(1.0));
        let mut b = body(5.0, Some(Vec2::ZERO), PhysicsBody::default());
        solve_contact(&mut a, &mut b, Vec2::X, 0.0);
        // e = 0.5, vn = -10, j = 1.5 * 10 / 2 = 7.5
        assert!(vec_approx_eq(a.velocity.unwrap(), Vec2::new(2.5, 0.0)));
        assert!(vec_approx_eq(b.velocity.unwrap(), Vec2::new(7.5, 0.0)));
    }

    #[test]
    fn separating_bodies_keep_velocities() {
        let mut a = body(0.0, Some(Vec2::new(-3.0, 1.0)), PhysicsBody::default());
        let mut b = body(5.0, Some(Vec2::new(4.0, 2.0)), PhysicsBody::default());
        solve_contact(&mut a, &mut b, Vec2::X, 0.0);
        assert_eq!(a.velocity, Some(Vec2::new(-3.0, 1.0)));
        assert_eq!(b.velocity, Some(Vec2::new(4.0, 2.0)));
    }

    #[test]
    fn missing_velocity_skips_impulse_but_corrects_position() {
        let mut a = body(0.0, Some(Vec2::new(10.0, 0.0)), PhysicsBody::default());
        let mut b = body(5.0, None, PhysicsBody::default());
        solve_contact(&mut a, &mut b, Vec2::X, 1.01);
        assert_eq!(a.velocity, Some(Vec2::new(10.0, 0.0)));
        assert!(vec_approx_eq(a.position, Vec2::new(-0.4, 0.0)));
    }

    #[test]
    fn static_side_keeps_velocity() {
        let mut ball = body(0.0, Some(Vec2::new(0.0, 6.0)), PhysicsBody::default());
        let mut floor = body(5.0, Some(Vec2::ZERO), PhysicsBody::fixed());
        solve_contact(&mut ball, &mut floor, Vec2::Y, 0.0);
        // j = 6 / 2 = 3
        assert!(vec_approx_eq(ball.velocity.unwrap(), Vec2::new(0.0, 3.0)));
        assert_eq!(floor.velocity, Some(Vec2::ZERO));
    }

    // ==================== WORLD ====================

    #[test]
    fn resolve_collision_writes_back_to_components() {
        let mut world = World::new();
        let a = world
            .spawn((MapPosition::new(0.0, 0.0), RigidBody::with_velocity(Vec2::new(10.0, 0.0))))
            .id();
        let b = world
            .spawn((
                MapPosition::new(9.0, 0.0),
                RigidBody::with_velocity(Vec2::new(-10.0, 0.0)),
                PhysicsBody::default(),
            ))
            .id();

        resolve_collision(&mut world, a, b, Vec2::X, 1.01);

        assert!(approx_eq(world.get::<MapPosition>(a).unwrap().pos.x, -0.4));
        assert!(approx_eq(world.get::<MapPosition>(b).unwrap().pos.x, 9.4));
        assert!(vec_approx_eq(world.get::<RigidBody>(a).unwrap().velocity, Vec2::ZERO));
        assert!(vec_approx_eq(world.get::<RigidBody>(b).unwrap().velocity, Vec2::ZERO));
    }

    #[test]
    fn resolve_collision_ignores_despawned_entity() {
        let mut world = World::new();
        let a = world.spawn(MapPosition::new(0.0, 0.0)).id();
        let b = world.spawn(MapPosition::new(1.0, 0.0)).id();
        world.despawn(b);
        resolve_collision(&mut world, a, b, Vec2::X, 5.0);
        assert_eq!(world.get::<MapPosition>(a).unwrap().pos, Vec2::ZERO);
    }
}
