//! Map configuration: projection mode, tile metrics, viewport and size.

use crate::error::MapError;
use crate::geom::Range;

/// How grid coordinates are laid out on screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Projection {
    /// Square tiles on a regular grid.
    Orthogonal,
    /// Diamond tiles: the map's x axis runs down-right, y runs down-left.
    #[default]
    Isometric,
}

/// Tile size in pixels. Both sides are powers of two so that coordinate
/// conversion can use shifts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileMetrics {
    pub width: i32,
    pub height: i32,
}

impl TileMetrics {
    /// Validate and build tile metrics.
    pub fn new(width: i32, height: i32) -> Result<Self, MapError> {
        let m = Self { width, height };
        m.validate()?;
        Ok(m)
    }

    /// Default isometric tile (64×32).
    pub const ISOMETRIC: Self = Self {
        width: 64,
        height: 32,
    };

    /// Default orthogonal tile (64×64).
    pub const ORTHOGONAL: Self = Self {
        width: 64,
        height: 64,
    };

    /// The conventional tile size for a projection.
    pub const fn for_projection(projection: Projection) -> Self {
        match projection {
            Projection::Orthogonal => Self::ORTHOGONAL,
            Projection::Isometric => Self::ISOMETRIC,
        }
    }

    pub fn validate(&self) -> Result<(), MapError> {
        let ok = |v: i32| v >= 2 && (v as u32).is_power_of_two();
        if ok(self.width) && ok(self.height) {
            Ok(())
        } else {
            Err(MapError::InvalidTileMetrics {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// log2 of the tile width.
    #[inline]
    pub fn shift_x(&self) -> u32 {
        self.width.trailing_zeros()
    }

    /// log2 of the tile height.
    #[inline]
    pub fn shift_y(&self) -> u32 {
        self.height.trailing_zeros()
    }

    #[inline]
    pub fn half_width(&self) -> i32 {
        self.width >> 1
    }

    #[inline]
    pub fn half_height(&self) -> i32 {
        self.height >> 1
    }
}

impl Default for TileMetrics {
    fn default() -> Self {
        Self::ISOMETRIC
    }
}

/// Everything needed to build a [`TileGrid`](crate::TileGrid).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    /// Cells per side.
    pub size: i32,
    pub projection: Projection,
    pub tile: TileMetrics,
    /// Screen rectangle the map is drawn into.
    pub viewport: Range,
}

impl MapConfig {
    /// Config for a square map of `size` cells with the default projection.
    pub fn with_size(size: i32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Switch projection and use its conventional tile size.
    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self.tile = TileMetrics::for_projection(projection);
        self
    }

    pub fn viewport(mut self, viewport: Range) -> Self {
        self.viewport = viewport;
        self
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            size: 256,
            projection: Projection::Isometric,
            tile: TileMetrics::ISOMETRIC,
            viewport: Range::new(0, 0, 1024, 768),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_shifts() {
        let m = TileMetrics::ISOMETRIC;
        assert_eq!(m.shift_x(), 6);
        assert_eq!(m.shift_y(), 5);
        assert_eq!(m.half_width(), 32);
        assert_eq!(m.half_height(), 16);
    }

    #[test]
    fn metrics_reject_non_power_of_two() {
        assert!(TileMetrics::new(48, 32).is_err());
        assert!(TileMetrics::new(64, 0).is_err());
        assert!(TileMetrics::new(1, 1).is_err());
        assert!(TileMetrics::new(32, 16).is_ok());
    }

    #[test]
    fn projection_builder_swaps_tile_size() {
        let cfg = MapConfig::with_size(16).projection(Projection::Orthogonal);
        assert_eq!(cfg.size, 16);
        assert_eq!(cfg.tile, TileMetrics::ORTHOGONAL);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = MapConfig::with_size(32).projection(Projection::Orthogonal);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: MapConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let back: MapConfig = serde_json::from_str(r#"{"size": 8}"#).unwrap();
        assert_eq!(back.size, 8);
        assert_eq!(back.projection, Projection::Isometric);
    }
}
