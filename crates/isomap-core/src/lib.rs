//! **isomap-core**: tile map core types.
//!
//! This crate provides the map side of the isomap workspace: geometry
//! primitives, terrain cells, the [`TileGrid`] with its orthogonal and
//! isometric screen projections, the camera, and color-coded bitmap
//! import/export.

pub mod bitmap;
pub mod cell;
pub mod config;
pub mod error;
pub mod geom;
mod projection;
pub mod tilemap;

pub use cell::{BLOCKED_COST, Cell, Terrain};
pub use config::{MapConfig, Projection, TileMetrics};
pub use error::MapError;
pub use geom::{Point, Range};
pub use tilemap::TileGrid;
