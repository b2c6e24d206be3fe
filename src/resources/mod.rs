//! ECS resources made available to systems.
//!
//! Overview
//! - `collisionconfig` – response switch and layer matrix, loadable from INI
//! - `collisionmatrix` – symmetric layer-vs-layer collision table
//! - `tilemap` – tile grid, tileset and world/tile coordinate conversion
//! - `worldtime` – simulation time and delta
pub mod collisionconfig;
pub mod collisionmatrix;
pub mod tilemap;
pub mod worldtime;
