use isomap_core::{Point, TileGrid};

use crate::error::WalkError;
use crate::node::{NodeGrid, NodeId, SearchNode};

/// Where a stepped search stands after an [`update`](GridWalker::update).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WalkState {
    /// More steps are needed.
    Searching,
    /// The goal was popped from the frontier; a path is available.
    ReachedGoal,
    /// The frontier ran dry without reaching the goal.
    Unreachable,
}

impl WalkState {
    /// Whether the search has finished. A finished walker keeps returning
    /// the same state until it is reset.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, WalkState::Searching)
    }
}

/// A pathfinding algorithm that searches a [`TileGrid`] one step at a time.
///
/// The grid is lent to every call instead of being stored, so walkers read
/// terrain but never own or modify it. Each walker owns its node grid and
/// frontier; several walkers can share one map.
///
/// Usage: [`init`](GridWalker::init) once per map, [`reset`](GridWalker::reset)
/// once per query, then [`update`](GridWalker::update) until
/// [`WalkState::is_terminal`]. Updates can be spread over frames.
pub trait GridWalker {
    /// Short identifier for logs and menus.
    fn name(&self) -> &'static str;

    /// Allocate search state sized to `grid`. Calling it again discards the
    /// old state and rebuilds.
    fn init(&mut self, grid: &TileGrid);

    /// Prepare a new query from `start` to `goal` without reallocating.
    fn reset(&mut self, grid: &TileGrid, start: Point, goal: Point) -> Result<(), WalkError>;

    /// Run one expansion step.
    fn update(&mut self, grid: &TileGrid) -> WalkState;

    /// Release all search state.
    fn destroy(&mut self);

    /// Whether the walker takes per-cell movement costs into account.
    fn weighted_graph_supported(&self) -> bool {
        false
    }

    /// Whether the walker orders its frontier with a goal estimate.
    fn heuristics_supported(&self) -> bool {
        false
    }

    fn is_initialized(&self) -> bool;

    fn state(&self) -> WalkState;

    fn start(&self) -> Point;

    fn goal(&self) -> Point;

    /// Discovered nodes not yet expanded.
    fn frontier_len(&self) -> usize;

    /// Whether `p` has been discovered and is waiting in the frontier.
    fn in_frontier(&self, p: Point) -> bool;

    /// Whether `p` has been expanded during the current query.
    fn is_visited(&self, p: Point) -> bool;

    /// Cells from start to goal, both included, once the goal is reached.
    fn path(&self) -> Option<Vec<Point>>;

    /// Number of steps in [`path`](GridWalker::path).
    fn path_len(&self) -> Option<usize>;
}

/// Call `update` until the walker finishes or `max_steps` updates ran.
pub fn run_to_completion(walker: &mut dyn GridWalker, grid: &TileGrid, max_steps: usize) -> WalkState {
    let mut state = walker.state();
    for _ in 0..max_steps {
        state = walker.update(grid);
        if state.is_terminal() {
            break;
        }
    }
    state
}

// ---------------------------------------------------------------------------
// Shared walker bookkeeping
// ---------------------------------------------------------------------------

/// Node arena, endpoints and state shared by the concrete walkers.
#[derive(Clone, Debug)]
pub(crate) struct Search<N> {
    pub(crate) name: &'static str,
    pub(crate) nodes: Option<NodeGrid<N>>,
    pub(crate) start: Point,
    pub(crate) goal: Point,
    pub(crate) state: WalkState,
}

impl<N: SearchNode> Search<N> {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            nodes: None,
            start: Point::ZERO,
            goal: Point::ZERO,
            state: WalkState::Unreachable,
        }
    }

    pub(crate) fn init(&mut self, grid: &TileGrid) {
        if let Some(nodes) = &self.nodes {
            log::warn!(
                "{} walker already initialized for {2}x{2}, rebuilding for {1}x{1}",
                self.name,
                grid.size(),
                nodes.size()
            );
            self.destroy();
        }
        self.nodes = Some(NodeGrid::new(grid.size()));
        log::debug!("{} walker initialized: {} nodes", self.name, grid.size().max(0).pow(2));
    }

    pub(crate) fn destroy(&mut self) {
        self.nodes = None;
        self.state = WalkState::Unreachable;
    }

    /// Validate a query and clear the arena. Returns the arena and the start
    /// node id.
    pub(crate) fn begin(
        &mut self,
        grid: &TileGrid,
        start: Point,
        goal: Point,
    ) -> Result<(&mut NodeGrid<N>, NodeId), WalkError> {
        let name = self.name;
        let nodes = self
            .nodes
            .as_mut()
            .ok_or(WalkError::NotInitialized { walker: name })?;
        if nodes.size() != grid.size() {
            return Err(WalkError::SizeMismatch {
                walker: name,
                expected: nodes.size(),
                actual: grid.size(),
            });
        }
        let out_of_bounds = |point| WalkError::OutOfBounds {
            point,
            size: grid.size(),
        };
        let start_id = nodes.id(start).ok_or_else(|| out_of_bounds(start))?;
        nodes.id(goal).ok_or_else(|| out_of_bounds(goal))?;

        nodes.clear();
        self.start = start;
        self.goal = goal;
        self.state = WalkState::Searching;
        Ok((nodes, start_id))
    }

    pub(crate) fn node_at(&self, p: Point) -> Option<&N> {
        self.nodes.as_ref()?.get(p)
    }

    pub(crate) fn is_visited(&self, p: Point) -> bool {
        self.node_at(p).is_some_and(|n| n.visited())
    }

    pub(crate) fn path(&self) -> Option<Vec<Point>> {
        if self.state != WalkState::ReachedGoal {
            return None;
        }
        let nodes = self.nodes.as_ref()?;
        Some(nodes.path_to(nodes.id(self.goal)?))
    }

    pub(crate) fn path_len(&self) -> Option<usize> {
        if self.state != WalkState::ReachedGoal {
            return None;
        }
        let nodes = self.nodes.as_ref()?;
        Some(nodes.parent_chain_len(nodes.id(self.goal)?))
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn state_round_trip() {
        for s in [WalkState::Searching, WalkState::ReachedGoal, WalkState::Unreachable] {
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(serde_json::from_str::<WalkState>(&json).unwrap(), s);
        }
    }
}
