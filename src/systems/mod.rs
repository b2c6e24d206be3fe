//! Engine systems.
//!
//! Submodules overview
//! - [`collision`] – pairwise AABB detection, event publication, overlap query
//! - [`collisionresponse`] – position correction and restitution impulses
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`pendingdestroy`] – despawn entities marked for destruction
//! - [`tilecollision`] – block velocity against solid tiles
//! - [`time`] – update simulation time and delta

pub mod collision;
pub mod collisionresponse;
pub mod movement;
pub mod pendingdestroy;
pub mod tilecollision;
pub mod time;
