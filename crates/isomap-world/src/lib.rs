//! **isomap-world**: a map editing session.
//!
//! A [`World`] owns one [`TileGrid`](isomap_core::TileGrid) and a registry
//! of [`GridWalker`](isomap_paths::GridWalker)s. It keeps the walkers sized
//! to the map, drives stepped path queries on the active walker, and maps
//! window events (resize, scroll, cursor) onto the grid's camera.

mod config;
mod error;
mod world;

pub use config::WorldConfig;
pub use error::WorldError;
pub use world::World;
