use isomap_core::{Point, TileGrid};

use crate::error::WalkError;
use crate::neighbors::Neighbors;
use crate::node::{AStarNode, SearchNode};
use crate::queue::PriorityQueue;
use crate::walker::{GridWalker, Search, WalkState};

/// Uniform-cost (Dijkstra) walker.
///
/// Entering a cell costs that cell's movement cost, diagonals included.
/// The frontier is a [`PriorityQueue`] keyed on the accumulated cost, so the
/// first time the goal is popped its parent chain is a cheapest path.
#[derive(Clone, Debug)]
pub struct UniformCostWalker {
    search: Search<AStarNode>,
    open: PriorityQueue,
    nbuf: Neighbors,
}

impl Default for UniformCostWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformCostWalker {
    pub fn new() -> Self {
        Self {
            search: Search::new("uniform-cost"),
            open: PriorityQueue::new(),
            nbuf: Neighbors::new(),
        }
    }

    /// Walker already initialized for `grid`.
    pub fn for_grid(grid: &TileGrid) -> Self {
        let mut w = Self::new();
        w.init(grid);
        w
    }

    /// Total movement cost of [`path`](GridWalker::path), the start cell
    /// excluded.
    pub fn path_cost(&self) -> Option<i32> {
        if self.search.state != WalkState::ReachedGoal {
            return None;
        }
        self.search.node_at(self.search.goal).map(|n| n.g)
    }
}

impl GridWalker for UniformCostWalker {
    fn name(&self) -> &'static str {
        self.search.name
    }

    fn init(&mut self, grid: &TileGrid) {
        self.open.make_empty();
        self.search.init(grid);
    }

    fn reset(&mut self, grid: &TileGrid, start: Point, goal: Point) -> Result<(), WalkError> {
        self.open.make_empty();
        let (nodes, start_id) = self.search.begin(grid, start, goal)?;
        let n = nodes.node_mut(start_id);
        n.set_g(0);
        n.set_open(true);
        self.open.enqueue(start_id, nodes.node(start_id));
        Ok(())
    }

    fn update(&mut self, grid: &TileGrid) -> WalkState {
        if self.search.state.is_terminal() {
            return self.search.state;
        }
        let Some(nodes) = self.search.nodes.as_mut() else {
            return WalkState::Unreachable;
        };
        debug_assert_eq!(nodes.size(), grid.size(), "walker not re-initialized after map change");

        let Some(cur) = self.open.dequeue() else {
            self.search.state = WalkState::Unreachable;
            return self.search.state;
        };
        let cn = nodes.node_mut(cur);
        cn.set_visited(true);
        let (cp, cg) = (cn.pos(), cn.g);
        if cp == self.search.goal {
            self.search.state = WalkState::ReachedGoal;
            return self.search.state;
        }

        for &np in self.nbuf.within(cp, grid.bounds()) {
            if grid.is_blocked(np) {
                continue;
            }
            let Some(id) = nodes.id(np) else {
                continue;
            };
            let g = cg.saturating_add(grid.cost(np).max(0));
            let n = nodes.node_mut(id);
            if n.visited() || (n.is_open() && g >= n.g) {
                continue;
            }
            if n.is_open() {
                self.open.remove(id);
            }
            n.set_g(g);
            n.set_parent(Some(cur));
            n.set_open(true);
            self.open.enqueue(id, nodes.node(id));
        }

        WalkState::Searching
    }

    fn destroy(&mut self) {
        self.open = PriorityQueue::new();
        self.search.destroy();
    }

    fn weighted_graph_supported(&self) -> bool {
        true
    }

    fn is_initialized(&self) -> bool {
        self.search.nodes.is_some()
    }

    fn state(&self) -> WalkState {
        self.search.state
    }

    fn start(&self) -> Point {
        self.search.start
    }

    fn goal(&self) -> Point {
        self.search.goal
    }

    fn frontier_len(&self) -> usize {
        self.open.len()
    }

    fn in_frontier(&self, p: Point) -> bool {
        self.search
            .node_at(p)
            .is_some_and(|n| n.is_open() && !n.visited())
    }

    fn is_visited(&self, p: Point) -> bool {
        self.search.is_visited(p)
    }

    fn path(&self) -> Option<Vec<Point>> {
        self.search.path()
    }

    fn path_len(&self) -> Option<usize> {
        self.search.path_len()
    }
}
