//! Boxworld engine library.
//!
//! A 2D ECS engine core built on bevy_ecs. It exposes the components,
//! resources, systems and events needed for entity-vs-entity AABB collision
//! (layer filtering, events, impulse response) and tile grid blocking, plus
//! an [`engine::Engine`] that wires them into a frame schedule.

pub mod components;
pub mod engine;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
