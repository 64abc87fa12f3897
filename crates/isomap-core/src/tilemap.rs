//! The [`TileGrid`]: a square matrix of [`Cell`]s plus the camera and the
//! screen projection used to draw and pick tiles.

use crate::cell::{Cell, Terrain};
use crate::config::{MapConfig, Projection, TileMetrics};
use crate::error::MapError;
use crate::geom::{Point, Range};
use crate::projection::Transform;

/// A square tile map with camera and screen projection.
///
/// Cell accessors take trusted grid coordinates and panic when they fall
/// outside the map. [`screen_to_map`](TileGrid::screen_to_map) accepts any
/// screen position and always returns a valid cell.
#[derive(Clone, Debug)]
pub struct TileGrid {
    cells: Vec<Cell>,
    size: i32,
    transform: Transform,
    // pixel camera used for drawing, truncated from the float camera
    camera: Point,
    camera_x: f32,
    camera_y: f32,
    show_grid: bool,
}

impl TileGrid {
    /// Build a grid from a config. Fails only on invalid tile metrics.
    pub fn new(config: &MapConfig) -> Result<Self, MapError> {
        config.tile.validate()?;
        let mut grid = Self {
            cells: Vec::new(),
            size: 0,
            transform: Transform::new(config.projection, config.tile, config.viewport, 0),
            camera: Point::ZERO,
            camera_x: 0.0,
            camera_y: 0.0,
            show_grid: false,
        };
        grid.init(config.size);
        Ok(grid)
    }

    /// Allocate a `size`×`size` matrix of default cells and put the camera
    /// back at the origin.
    ///
    /// Calling this on a grid that already holds cells discards them.
    pub fn init(&mut self, size: i32) {
        debug_assert!(size >= 0, "negative map size {size}");
        if self.is_initialized() {
            log::warn!("tile grid already initialized ({0}x{0}), rebuilding", self.size);
            self.destroy();
        }
        let size = size.max(0);
        let n = size as usize;
        self.cells = vec![Cell::default(); n * n];
        self.size = size;
        self.transform.set_map_size(size);
        self.set_camera_position(Point::ZERO);
        log::debug!("tile grid initialized: {size}x{size} {:?}", self.transform.projection);
    }

    /// Release the cells. The grid is empty afterwards.
    pub fn destroy(&mut self) {
        self.cells = Vec::new();
        self.size = 0;
        self.transform.set_map_size(0);
        self.set_camera_position(Point::ZERO);
        self.show_grid = false;
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        !self.cells.is_empty()
    }

    /// Cells per side.
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// The grid rectangle `[0, size)²`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::square(self.size)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        assert!(self.contains(p), "map coordinate {p} outside {0}x{0} grid", self.size);
        (p.y * self.size + p.x) as usize
    }

    // -----------------------------------------------------------------------
    // Cell access
    // -----------------------------------------------------------------------

    /// The cell at `p`, or `None` outside the map.
    #[inline]
    pub fn get(&self, p: Point) -> Option<Cell> {
        if self.contains(p) {
            Some(self.cells[self.idx(p)])
        } else {
            None
        }
    }

    #[inline]
    pub fn cell(&self, p: Point) -> Cell {
        self.cells[self.idx(p)]
    }

    #[inline]
    pub fn cost(&self, p: Point) -> i32 {
        self.cell(p).cost
    }

    #[inline]
    pub fn set_cost(&mut self, p: Point, cost: i32) {
        let i = self.idx(p);
        self.cells[i].cost = cost;
    }

    #[inline]
    pub fn terrain(&self, p: Point) -> Terrain {
        self.cell(p).terrain
    }

    /// Change the terrain kind only; the cost is left as is.
    #[inline]
    pub fn set_type(&mut self, p: Point, terrain: Terrain) {
        let i = self.idx(p);
        self.cells[i].terrain = terrain;
    }

    /// Change the terrain kind and reset the cost to the terrain's default.
    #[inline]
    pub fn set_terrain(&mut self, p: Point, terrain: Terrain) {
        let i = self.idx(p);
        self.cells[i] = Cell::of(terrain);
    }

    /// Whether the cell at `p` cannot be entered.
    #[inline]
    pub fn is_blocked(&self, p: Point) -> bool {
        self.cell(p).is_blocked()
    }

    /// Set every cell to the given terrain with its default cost.
    pub fn fill(&mut self, terrain: Terrain) {
        self.cells.fill(Cell::of(terrain));
    }

    /// Iterate over all cells with their positions, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    // -----------------------------------------------------------------------
    // Projection and viewport
    // -----------------------------------------------------------------------

    #[inline]
    pub fn projection(&self) -> Projection {
        self.transform.projection
    }

    /// Switch projection at runtime. Tile metrics are left unchanged.
    pub fn set_projection(&mut self, projection: Projection) {
        self.transform.projection = projection;
        self.transform.recompute_bounds();
        self.reclamp_camera();
    }

    #[inline]
    pub fn tile_metrics(&self) -> TileMetrics {
        self.transform.tile
    }

    pub fn set_tile_metrics(&mut self, tile: TileMetrics) -> Result<(), MapError> {
        tile.validate()?;
        self.transform.tile = tile;
        self.transform.recompute_bounds();
        self.reclamp_camera();
        Ok(())
    }

    /// Screen rectangle the map is drawn into.
    #[inline]
    pub fn viewport(&self) -> Range {
        self.transform.viewport
    }

    pub fn set_viewport(&mut self, viewport: Range) {
        self.transform.viewport = viewport;
        self.transform.recompute_bounds();
        self.reclamp_camera();
    }

    #[inline]
    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    #[inline]
    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    // -----------------------------------------------------------------------
    // Camera
    // -----------------------------------------------------------------------

    /// Largest camera coordinate on each axis.
    #[inline]
    pub fn max_camera(&self) -> Point {
        self.transform.max_camera()
    }

    /// Integer camera position in pixels.
    #[inline]
    pub fn camera_position(&self) -> Point {
        self.camera
    }

    /// Sub-pixel camera position.
    #[inline]
    pub fn camera_position_f(&self) -> (f32, f32) {
        (self.camera_x, self.camera_y)
    }

    /// Move the camera by a (possibly fractional) screen delta.
    ///
    /// Fractions accumulate across calls, so slow frame-rate independent
    /// scrolling still moves the camera eventually. Non-finite deltas are
    /// ignored.
    pub fn move_camera(&mut self, dx: f32, dy: f32) {
        let finite = |d: f32| if d.is_finite() { d } else { 0.0 };
        let (dx, dy) = (finite(dx), finite(dy));
        let max = self.max_camera();
        self.camera_x = (self.camera_x + dx).clamp(0.0, max.x as f32);
        self.camera_y = (self.camera_y + dy).clamp(0.0, max.y as f32);
        self.apply_camera(Point::new(self.camera_x.trunc() as i32, self.camera_y.trunc() as i32));
    }

    /// Place the camera at an integer position, clamped into range.
    pub fn set_camera_position(&mut self, p: Point) {
        let p = self.transform.clamp_camera(p);
        self.camera_x = p.x as f32;
        self.camera_y = p.y as f32;
        self.apply_camera(p);
    }

    fn apply_camera(&mut self, p: Point) {
        self.camera = self.transform.clamp_camera(p);
        self.transform.recompute_offset(self.camera);
    }

    fn reclamp_camera(&mut self) {
        let max = self.max_camera();
        self.camera_x = self.camera_x.clamp(0.0, max.x as f32);
        self.camera_y = self.camera_y.clamp(0.0, max.y as f32);
        self.apply_camera(self.camera);
    }

    /// Screen offset applied to every projected tile. Changes only when the
    /// camera, viewport or projection changes.
    #[inline]
    pub fn screen_offset(&self) -> Point {
        self.transform.offset()
    }

    // -----------------------------------------------------------------------
    // Coordinate conversion
    // -----------------------------------------------------------------------

    /// Grid cell under a screen position, clamped into the map.
    ///
    /// On an empty grid this returns the origin.
    pub fn screen_to_map(&self, scr: Point) -> Point {
        if self.size == 0 {
            return Point::ZERO;
        }
        let last = Point::new(self.size - 1, self.size - 1);
        self.transform.to_map(scr).clamp(Point::ZERO, last)
    }

    /// Screen anchor of a grid cell: the top-left corner of an orthogonal
    /// tile, or the top vertex of an isometric diamond.
    pub fn map_to_screen(&self, map: Point) -> Point {
        debug_assert!(self.contains(map), "map coordinate {map} outside {0}x{0} grid", self.size);
        self.transform.to_screen(map)
    }

    /// Screen bounding rectangle of a grid cell.
    pub fn tile_screen_rect(&self, map: Point) -> Range {
        debug_assert!(self.contains(map), "map coordinate {map} outside {0}x{0} grid", self.size);
        self.transform.tile_rect(map)
    }

    /// Grid rectangle that covers the viewport.
    ///
    /// The four viewport corners are converted separately because an
    /// isometric view skews the axis-aligned screen rectangle.
    pub fn visible_range(&self) -> Range {
        let vp = self.viewport();
        if self.size == 0 || vp.is_empty() {
            return Range::default();
        }
        let (x0, y0) = (vp.min.x, vp.min.y);
        let (x1, y1) = (vp.max.x - 1, vp.max.y - 1);
        let (min, max) = match self.projection() {
            Projection::Orthogonal => (
                self.screen_to_map(Point::new(x0, y0)),
                self.screen_to_map(Point::new(x1, y1)),
            ),
            Projection::Isometric => (
                Point::new(
                    self.screen_to_map(Point::new(x0, y0)).x,
                    self.screen_to_map(Point::new(x1, y0)).y,
                ),
                Point::new(
                    self.screen_to_map(Point::new(x1, y1)).x,
                    self.screen_to_map(Point::new(x0, y1)).y,
                ),
            ),
        };
        Range::new(min.x, min.y, max.x + 1, max.y + 1)
    }

    /// Cells whose screen rectangle intersects the viewport.
    pub fn visible_tiles(&self) -> impl Iterator<Item = Point> + '_ {
        let vp = self.viewport();
        self.visible_range()
            .iter()
            .filter(move |&p| self.transform.tile_rect(p).overlaps(vp))
    }

    // -----------------------------------------------------------------------
    // Bitmap import / export helpers
    // -----------------------------------------------------------------------

    pub(crate) fn replace_cells(&mut self, size: i32, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), (size.max(0) as usize).pow(2));
        self.cells = cells;
        self.size = size;
        self.transform.set_map_size(size);
        self.set_camera_position(Point::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    fn grid(size: i32, projection: Projection) -> TileGrid {
        let cfg = MapConfig::with_size(size)
            .projection(projection)
            .viewport(Range::new(0, 32, 800, 568));
        TileGrid::new(&cfg).unwrap()
    }

    #[test]
    fn init_fills_default_cells() {
        let g = grid(8, Projection::Isometric);
        assert_eq!(g.size(), 8);
        assert_eq!(g.iter().count(), 64);
        assert!(g.iter().all(|(_, c)| c == Cell::default()));
        assert_eq!(g.camera_position(), Point::ZERO);
    }

    #[test]
    fn reinit_rebuilds() {
        let mut g = grid(8, Projection::Orthogonal);
        g.set_terrain(Point::new(1, 1), Terrain::Obstacle);
        g.move_camera(100.0, 100.0);
        g.init(4);
        assert_eq!(g.size(), 4);
        assert_eq!(g.terrain(Point::new(1, 1)), Terrain::Walkable);
        assert_eq!(g.camera_position(), Point::ZERO);
        assert_eq!(g.max_camera(), Point::new(256, 256));
    }

    #[test]
    fn setters_are_independent() {
        let mut g = grid(4, Projection::Orthogonal);
        let p = Point::new(2, 3);
        g.set_type(p, Terrain::Marsh);
        assert_eq!(g.terrain(p), Terrain::Marsh);
        assert_eq!(g.cost(p), 1);
        g.set_cost(p, 7);
        assert_eq!(g.terrain(p), Terrain::Marsh);
        assert_eq!(g.cost(p), 7);
        g.set_terrain(p, Terrain::Water);
        assert_eq!(g.cost(p), Terrain::Water.default_cost());
        assert!(g.is_blocked(p));
        assert_eq!(g.get(Point::new(4, 0)), None);
        assert_eq!(g.get(Point::new(-1, 0)), None);
    }

    #[test]
    #[should_panic]
    fn out_of_range_cost_panics() {
        let g = grid(4, Projection::Orthogonal);
        g.cost(Point::new(4, 4));
    }

    #[test]
    #[should_panic]
    fn column_overflow_does_not_wrap_to_next_row() {
        let mut g = grid(4, Projection::Orthogonal);
        g.set_terrain(Point::new(4, 0), Terrain::Water);
    }

    #[test]
    fn round_trip_every_cell() {
        for projection in [Projection::Orthogonal, Projection::Isometric] {
            let mut g = grid(24, projection);
            for cam in [Point::ZERO, Point::new(133, 77), g.max_camera()] {
                g.set_camera_position(cam);
                for p in g.bounds() {
                    assert_eq!(g.screen_to_map(g.map_to_screen(p)), p, "{projection:?} {cam}");
                }
            }
        }
    }

    #[test]
    fn screen_to_map_clamps_untrusted_input() {
        for projection in [Projection::Orthogonal, Projection::Isometric] {
            let g = grid(10, projection);
            for scr in [
                Point::new(-10_000, -10_000),
                Point::new(10_000, 10_000),
                Point::new(-10_000, 10_000),
                Point::new(10_000, -10_000),
            ] {
                let m = g.screen_to_map(scr);
                assert!(g.contains(m), "{projection:?} {scr} -> {m}");
            }
        }
        let empty = grid(0, Projection::Isometric);
        assert_eq!(empty.screen_to_map(Point::new(5, 5)), Point::ZERO);
    }

    #[test]
    fn screen_to_map_survives_extreme_coordinates() {
        for projection in [Projection::Orthogonal, Projection::Isometric] {
            let mut g = grid(8, projection);
            for cam in [Point::ZERO, g.max_camera()] {
                g.set_camera_position(cam);
                let lo = g.screen_to_map(Point::new(i32::MIN, i32::MIN));
                let hi = g.screen_to_map(Point::new(i32::MAX, i32::MAX));
                assert!(g.contains(lo) && g.contains(hi), "{projection:?} {lo} {hi}");
                assert!(g.contains(g.screen_to_map(Point::new(i32::MIN, i32::MAX))));
                assert!(g.contains(g.screen_to_map(Point::new(i32::MAX, i32::MIN))));
            }
            if projection == Projection::Orthogonal {
                assert_eq!(g.screen_to_map(Point::new(i32::MIN, i32::MIN)), Point::ZERO);
                assert_eq!(g.screen_to_map(Point::new(i32::MAX, i32::MAX)), Point::new(7, 7));
            }
        }
    }

    #[test]
    fn camera_clamps_for_any_delta() {
        let mut rng = StdRng::seed_from_u64(7);
        for projection in [Projection::Orthogonal, Projection::Isometric] {
            let mut g = grid(16, projection);
            let max = g.max_camera();
            for _ in 0..500 {
                let dx = rng.random_range(-900.0f32..900.0);
                let dy = rng.random_range(-900.0f32..900.0);
                g.move_camera(dx, dy);
                let c = g.camera_position();
                assert!(c.x >= 0 && c.x <= max.x, "{c}");
                assert!(c.y >= 0 && c.y <= max.y, "{c}");
                let (fx, fy) = g.camera_position_f();
                assert!((0.0..=max.x as f32).contains(&fx));
                assert!((0.0..=max.y as f32).contains(&fy));
            }
        }
    }

    #[test]
    fn non_finite_camera_delta_is_ignored() {
        let mut g = grid(16, Projection::Orthogonal);
        g.move_camera(f32::NAN, 0.0);
        g.move_camera(10.0, 0.0);
        assert_eq!(g.camera_position_f(), (10.0, 0.0));
        assert_eq!(g.camera_position(), Point::new(10, 0));
        g.move_camera(f32::INFINITY, f32::NEG_INFINITY);
        g.move_camera(0.0, 3.0);
        assert_eq!(g.camera_position(), Point::new(10, 3));
    }

    #[test]
    fn fractional_camera_moves_accumulate() {
        let mut g = grid(16, Projection::Orthogonal);
        for _ in 0..4 {
            g.move_camera(0.25, 0.5);
        }
        assert_eq!(g.camera_position(), Point::new(1, 2));
        g.move_camera(-0.5, 0.0);
        assert_eq!(g.camera_position(), Point::new(0, 2));
    }

    #[test]
    fn camera_shifts_projection() {
        let mut g = grid(16, Projection::Orthogonal);
        let before = g.map_to_screen(Point::new(3, 3));
        g.move_camera(10.0, 20.0);
        assert_eq!(g.map_to_screen(Point::new(3, 3)), before - Point::new(10, 20));
    }

    #[test]
    fn shrinking_viewport_or_projection_keeps_camera_in_range() {
        let mut g = grid(16, Projection::Orthogonal);
        g.set_camera_position(Point::new(10_000, 10_000));
        assert_eq!(g.camera_position(), g.max_camera());
        g.set_projection(Projection::Isometric);
        assert_eq!(g.camera_position(), g.max_camera());
        g.set_viewport(Range::new(0, 0, 320, 240));
        assert!(g.camera_position().x <= g.max_camera().x);
    }

    #[test]
    fn visible_tiles_cover_viewport() {
        for projection in [Projection::Orthogonal, Projection::Isometric] {
            let mut g = grid(20, projection);
            g.set_viewport(Range::new(10, 20, 170, 140));
            g.move_camera(90.0, 60.0);
            let visible: std::collections::HashSet<Point> = g.visible_tiles().collect();
            assert!(!visible.is_empty());
            for p in &visible {
                assert!(g.tile_screen_rect(*p).overlaps(g.viewport()));
            }
            for scr in g.viewport() {
                let m = g.transform.to_map(scr);
                if g.contains(m) {
                    assert!(visible.contains(&m), "{projection:?}: {m} under {scr} not visible");
                }
            }
        }
    }

    #[test]
    fn visible_range_is_small_for_small_viewport() {
        let mut g = grid(256, Projection::Orthogonal);
        g.set_viewport(Range::new(0, 0, 128, 128));
        let r = g.visible_range();
        assert!(r.len() <= 9, "{r}");
    }
}
