//! ECS components for entities.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned rectangular collider and AABB contact math
//! - [`collisionlayer`] – collision layers and per-entity layer resolution
//! - [`mapposition`] – world-space position (anchor) for an entity
//! - [`physicsbody`] – mass, static flag and restitution for collision response
//! - [`rigidbody`] – simple kinematic body storing velocity and forces
//! - [`tags`] – semantic marker components and the pending-destroy marker

pub mod boxcollider;
pub mod collisionlayer;
pub mod mapposition;
pub mod physicsbody;
pub mod rigidbody;
pub mod tags;
