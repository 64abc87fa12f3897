//! Screen ↔ grid coordinate transforms for both projections.
//!
//! [`Transform`] keeps the constants that only change when the camera, the
//! viewport, the map size or the projection change, so per-tile conversions
//! reduce to a couple of shifts and adds.

use crate::config::{Projection, TileMetrics};
use crate::geom::{Point, Range};

#[derive(Clone, Debug)]
pub(crate) struct Transform {
    pub(crate) projection: Projection,
    pub(crate) tile: TileMetrics,
    pub(crate) viewport: Range,
    map_size: i32,
    half_view: Point,
    max_camera: Point,
    offset: Point,
}

impl Transform {
    pub(crate) fn new(projection: Projection, tile: TileMetrics, viewport: Range, map_size: i32) -> Self {
        let mut t = Self {
            projection,
            tile,
            viewport,
            map_size,
            half_view: Point::ZERO,
            max_camera: Point::ZERO,
            offset: Point::ZERO,
        };
        t.recompute_bounds();
        t.recompute_offset(Point::ZERO);
        t
    }

    /// Recompute the values derived from viewport, tile size and map size.
    /// The caller must re-apply the camera afterwards.
    pub(crate) fn recompute_bounds(&mut self) {
        self.half_view = Point::new(self.viewport.width() >> 1, self.viewport.height() >> 1);
        let n = self.map_size.max(0);
        self.max_camera = match self.projection {
            Projection::Orthogonal => Point::new(n * self.tile.width, n * self.tile.height),
            Projection::Isometric => Point::new((n * self.tile.width) >> 1, n * self.tile.height),
        };
    }

    pub(crate) fn set_map_size(&mut self, map_size: i32) {
        self.map_size = map_size;
        self.recompute_bounds();
    }

    #[inline]
    pub(crate) fn max_camera(&self) -> Point {
        self.max_camera
    }

    #[inline]
    pub(crate) fn offset(&self) -> Point {
        self.offset
    }

    /// Clamp an integer camera position into `[0, max_camera]`.
    #[inline]
    pub(crate) fn clamp_camera(&self, cam: Point) -> Point {
        cam.clamp(Point::ZERO, self.max_camera)
    }

    /// Cache the screen offset for an (already clamped) camera position.
    pub(crate) fn recompute_offset(&mut self, cam: Point) {
        let anchor = self.viewport.min + self.half_view;
        self.offset = match self.projection {
            Projection::Orthogonal => anchor - cam,
            Projection::Isometric => Point::new(
                anchor.x - (cam.x - cam.y),
                anchor.y - ((cam.x + cam.y) >> 1),
            ),
        };
    }

    /// Screen anchor of a tile: its top-left corner (orthogonal) or the top
    /// vertex of its diamond (isometric).
    #[inline]
    pub(crate) fn to_screen(&self, map: Point) -> Point {
        match self.projection {
            Projection::Orthogonal => Point::new(
                (map.x << self.tile.shift_x()) + self.offset.x,
                (map.y << self.tile.shift_y()) + self.offset.y,
            ),
            Projection::Isometric => Point::new(
                ((map.x - map.y) << (self.tile.shift_x() - 1)) + self.offset.x,
                ((map.x + map.y) << (self.tile.shift_y() - 1)) + self.offset.y,
            ),
        }
    }

    /// Grid coordinate under a screen pixel. Not clamped.
    ///
    /// Works in `i64` so that any `i32` screen position is defined.
    #[inline]
    pub(crate) fn to_map(&self, scr: Point) -> Point {
        let dx = scr.x as i64 - self.offset.x as i64;
        let dy = scr.y as i64 - self.offset.y as i64;
        match self.projection {
            Projection::Orthogonal => Point::new(
                narrow(dx >> self.tile.shift_x()),
                narrow(dy >> self.tile.shift_y()),
            ),
            Projection::Isometric => {
                // u = dx / hw and v = dy / hh; x = floor((u + v) / 2) and
                // y = floor((v - u) / 2), scaled by 2*hw*hh to stay integral.
                let hw = self.tile.half_width() as i64;
                let hh = self.tile.half_height() as i64;
                let den = 2 * hw * hh;
                Point::new(
                    narrow((dx * hh + dy * hw).div_euclid(den)),
                    narrow((dy * hw - dx * hh).div_euclid(den)),
                )
            }
        }
    }

    /// Screen bounding rectangle of a tile.
    pub(crate) fn tile_rect(&self, map: Point) -> Range {
        let s = self.to_screen(map);
        match self.projection {
            Projection::Orthogonal => Range::new(s.x, s.y, s.x + self.tile.width, s.y + self.tile.height),
            Projection::Isometric => {
                let hw = self.tile.half_width();
                Range::new(s.x - hw, s.y, s.x + hw, s.y + self.tile.height)
            }
        }
    }
}

/// Saturating `i64` to `i32` conversion.
#[inline]
fn narrow(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
