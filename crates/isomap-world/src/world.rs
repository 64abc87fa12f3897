//! The editing session: map, walkers and camera controls.

use std::path::Path;

use isomap_core::{Point, Projection, Range, TileGrid};
use isomap_paths::{BreadthFirstWalker, GridWalker, UniformCostWalker, WalkState, run_to_completion};

use crate::config::WorldConfig;
use crate::error::WorldError;

/// One map plus the walkers that search it.
///
/// Walkers are kept sized to the grid: whenever the map is rebuilt through
/// the world, every registered walker is re-initialized. Path queries run on
/// the active walker only.
pub struct World {
    config: WorldConfig,
    grid: TileGrid,
    walkers: Vec<Box<dyn GridWalker>>,
    active: usize,
}

impl World {
    /// Build the map from `config` and register the default walkers
    /// (breadth-first, then uniform-cost). Walker 0 is active.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        let grid = TileGrid::new(&config.map)?;
        let mut world = Self {
            config,
            grid,
            walkers: Vec::new(),
            active: 0,
        };
        world.register_defaults();
        Ok(world)
    }

    /// Rebuild the session from its config: a fresh default map and freshly
    /// initialized walkers.
    pub fn init(&mut self) -> Result<(), WorldError> {
        if !self.walkers.is_empty() {
            log::warn!("world already initialized, rebuilding");
            self.destroy();
        }
        self.grid = TileGrid::new(&self.config.map)?;
        self.register_defaults();
        Ok(())
    }

    /// Drop every walker, then the map.
    pub fn destroy(&mut self) {
        for w in &mut self.walkers {
            w.destroy();
        }
        self.walkers.clear();
        self.active = 0;
        self.grid.destroy();
    }

    pub fn is_initialized(&self) -> bool {
        !self.walkers.is_empty()
    }

    fn register_defaults(&mut self) {
        self.register_walker(Box::new(BreadthFirstWalker::new()));
        self.register_walker(Box::new(UniformCostWalker::new()));
        self.active = 0;
    }

    /// Add a walker, initialized for the current map. Returns its index.
    pub fn register_walker(&mut self, mut walker: Box<dyn GridWalker>) -> usize {
        walker.init(&self.grid);
        log::debug!("registered walker {} at {}", walker.name(), self.walkers.len());
        self.walkers.push(walker);
        self.walkers.len() - 1
    }

    #[inline]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    #[inline]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Mutable map access for editing cells, camera and projection.
    ///
    /// Resizing the grid through this handle leaves the walkers sized for
    /// the old map; their next query fails with a size mismatch. Use
    /// [`new_map`](World::new_map) or [`load_map`](World::load_map) instead.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    // -----------------------------------------------------------------------
    // Walker selection
    // -----------------------------------------------------------------------

    pub fn select_walker(&mut self, index: usize) -> Result<(), WorldError> {
        if index >= self.walkers.len() {
            return Err(WorldError::BadWalkerIndex {
                index,
                count: self.walkers.len(),
            });
        }
        self.active = index;
        log::debug!("active walker: {}", self.walkers[index].name());
        Ok(())
    }

    /// Select the first walker offering the requested capabilities.
    /// Returns its index, or `None` when no walker qualifies; the active
    /// walker is unchanged in that case.
    pub fn select_walker_for(&mut self, weighted: bool, heuristics: bool) -> Option<usize> {
        let index = self.walkers.iter().position(|w| {
            (!weighted || w.weighted_graph_supported()) && (!heuristics || w.heuristics_supported())
        })?;
        self.active = index;
        Some(index)
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_walker(&self) -> Option<&dyn GridWalker> {
        self.walkers.get(self.active).map(|w| &**w)
    }

    pub fn walkers(&self) -> impl Iterator<Item = &dyn GridWalker> + '_ {
        self.walkers.iter().map(|w| &**w)
    }

    // -----------------------------------------------------------------------
    // Path queries
    // -----------------------------------------------------------------------

    /// Start a query on the active walker.
    pub fn begin_query(&mut self, start: Point, goal: Point) -> Result<(), WorldError> {
        let count = self.walkers.len();
        let walker = self
            .walkers
            .get_mut(self.active)
            .ok_or(WorldError::BadWalkerIndex {
                index: self.active,
                count,
            })?;
        walker.reset(&self.grid, start, goal)?;
        Ok(())
    }

    /// One update of the active walker.
    pub fn step(&mut self) -> WalkState {
        self.step_n(1)
    }

    /// Up to `n` updates of the active walker, stopping early once it
    /// finishes.
    pub fn step_n(&mut self, n: usize) -> WalkState {
        match self.walkers.get_mut(self.active) {
            Some(w) => run_to_completion(w.as_mut(), &self.grid, n),
            None => WalkState::Unreachable,
        }
    }

    /// A frame's worth of updates, as set by
    /// [`WorldConfig::step_budget`].
    pub fn step_frame(&mut self) -> WalkState {
        self.step_n(self.config.step_budget)
    }

    /// Run a whole query on the active walker. `Ok(None)` means the goal
    /// cannot be reached.
    pub fn find_path(&mut self, start: Point, goal: Point) -> Result<Option<Vec<Point>>, WorldError> {
        self.begin_query(start, goal)?;
        self.step_n(walker_budget(&self.grid));
        Ok(self.active_walker().and_then(|w| w.path()))
    }

    // -----------------------------------------------------------------------
    // Map lifecycle
    // -----------------------------------------------------------------------

    /// Replace the map with an empty `size`×`size` grid.
    pub fn new_map(&mut self, size: i32) {
        self.grid.init(size);
        self.reinit_walkers();
    }

    /// Import a color-coded bitmap as the new map. On failure the old map
    /// and walkers are untouched.
    pub fn load_map(&mut self, path: impl AsRef<Path>) -> Result<(), WorldError> {
        self.grid.load_from_image(path)?;
        self.reinit_walkers();
        Ok(())
    }

    /// Export the map in the same color code [`load_map`](World::load_map)
    /// reads.
    pub fn save_map(&self, path: impl AsRef<Path>) -> Result<(), WorldError> {
        self.grid.save_to_image(path)?;
        Ok(())
    }

    fn reinit_walkers(&mut self) {
        for w in &mut self.walkers {
            w.destroy();
            w.init(&self.grid);
        }
    }

    // -----------------------------------------------------------------------
    // Window and camera
    // -----------------------------------------------------------------------

    /// Fit the map viewport to a `width`×`height` window, leaving room for
    /// the menu bar and the tool panel, and re-clamp the camera.
    pub fn set_resolution(&mut self, width: i32, height: i32) {
        let top = self.config.top_margin;
        let bottom = (height - self.config.bottom_panel).max(top);
        self.grid.set_viewport(Range::new(0, top, width.max(0), bottom));
    }

    /// Scroll the camera in a screen direction for `dt` seconds.
    ///
    /// `dir` components are -1, 0 or 1 (right and down are positive). On an
    /// isometric map the screen direction is turned into the matching
    /// diagonal camera motion.
    pub fn scroll_camera(&mut self, dir: Point, dt: f32) {
        let d = match self.grid.projection() {
            Projection::Orthogonal => dir,
            Projection::Isometric => Point::new(dir.x + dir.y, dir.y - dir.x),
        };
        if d == Point::ZERO {
            return;
        }
        let [sx, sy] = self.config.scroll_speed;
        self.grid.move_camera(d.x as f32 * sx * dt, d.y as f32 * sy * dt);
    }

    /// Grid cell under a screen position, clamped into the map.
    #[inline]
    pub fn tile_under_cursor(&self, cursor: Point) -> Point {
        self.grid.screen_to_map(cursor)
    }
}

/// Updates that always finish a query: each one expands at most one node.
fn walker_budget(grid: &TileGrid) -> usize {
    let n = grid.size().max(0) as usize;
    n * n + 1
}
