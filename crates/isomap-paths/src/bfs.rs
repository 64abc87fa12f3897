use std::collections::VecDeque;

use isomap_core::{Point, TileGrid};

use crate::error::WalkError;
use crate::neighbors::Neighbors;
use crate::node::{Node, NodeId, SearchNode};
use crate::walker::{GridWalker, Search, WalkState};

/// Breadth-first walker with a FIFO frontier.
///
/// Every step costs the same, so the first time the goal is popped its
/// parent chain is a shortest path by step count. Diagonal steps are
/// allowed. Ties are broken by the fixed neighbour order in
/// [`COMPASS`](crate::COMPASS).
#[derive(Clone, Debug)]
pub struct BreadthFirstWalker {
    search: Search<Node>,
    open: VecDeque<NodeId>,
    nbuf: Neighbors,
}

impl Default for BreadthFirstWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl BreadthFirstWalker {
    pub fn new() -> Self {
        Self {
            search: Search::new("breadth-first"),
            open: VecDeque::new(),
            nbuf: Neighbors::new(),
        }
    }

    /// Walker already initialized for `grid`.
    pub fn for_grid(grid: &TileGrid) -> Self {
        let mut w = Self::new();
        w.init(grid);
        w
    }
}

impl GridWalker for BreadthFirstWalker {
    fn name(&self) -> &'static str {
        self.search.name
    }

    fn init(&mut self, grid: &TileGrid) {
        self.open.clear();
        self.search.init(grid);
    }

    fn reset(&mut self, grid: &TileGrid, start: Point, goal: Point) -> Result<(), WalkError> {
        self.open.clear();
        let (nodes, start_id) = self.search.begin(grid, start, goal)?;
        let n = nodes.node_mut(start_id);
        n.set_visited(true);
        n.set_open(true);
        self.open.push_back(start_id);
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

        let Some(cur) = self.open.pop_front() else {
            self.search.state = WalkState::Unreachable;
            return self.search.state;
        };
        nodes.node_mut(cur).set_visited(true);
        let cp = nodes.node(cur).pos();
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
            let n = nodes.node_mut(id);
            if n.visited() || n.is_open() {
                continue;
            }
            n.set_parent(Some(cur));
            n.set_open(true);
            self.open.push_back(id);
        }

        WalkState::Searching
    }

    fn destroy(&mut self) {
        self.open = VecDeque::new();
        self.search.destroy();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::chebyshev;
    use crate::walker::run_to_completion;
    use isomap_core::{MapConfig, Projection, Terrain};

    fn open_grid(size: i32) -> TileGrid {
        TileGrid::new(&MapConfig::with_size(size).projection(Projection::Orthogonal)).unwrap()
    }

    fn solve(w: &mut BreadthFirstWalker, g: &TileGrid, from: Point, to: Point) -> WalkState {
        w.reset(g, from, to).unwrap();
        run_to_completion(w, g, usize::MAX)
    }

    #[test]
    fn four_by_four_diagonal() {
        let g = open_grid(4);
        let mut w = BreadthFirstWalker::for_grid(&g);
        let state = solve(&mut w, &g, Point::new(0, 0), Point::new(3, 3));
        assert_eq!(state, WalkState::ReachedGoal);
        assert_eq!(w.path_len(), Some(3));
        assert_eq!(
            w.path().unwrap(),
            vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 2), Point::new(3, 3)]
        );
    }

    #[test]
    fn open_grid_path_is_chebyshev() {
        for n in [1, 2, 5, 16] {
            let g = open_grid(n);
            let mut w = BreadthFirstWalker::for_grid(&g);
            let from = Point::ZERO;
            let to = Point::new(n - 1, n - 1);
            assert_eq!(solve(&mut w, &g, from, to), WalkState::ReachedGoal);
            assert_eq!(w.path_len(), Some(chebyshev(from, to) as usize));
        }
        let g = open_grid(12);
        let mut w = BreadthFirstWalker::for_grid(&g);
        for (from, to) in [
            (Point::new(2, 9), Point::new(11, 0)),
            (Point::new(5, 5), Point::new(5, 11)),
            (Point::new(0, 3), Point::new(10, 4)),
        ] {
            assert_eq!(solve(&mut w, &g, from, to), WalkState::ReachedGoal);
            assert_eq!(w.path_len(), Some(chebyshev(from, to) as usize));
        }
    }

    #[test]
    fn enclosed_goal_is_unreachable() {
        let mut g = open_grid(7);
        let goal = Point::new(4, 4);
        for d in crate::COMPASS {
            g.set_terrain(goal + d, Terrain::Obstacle);
        }
        let mut w = BreadthFirstWalker::for_grid(&g);
        assert_eq!(solve(&mut w, &g, Point::ZERO, goal), WalkState::Unreachable);
        assert_eq!(w.frontier_len(), 0);
        assert_eq!(w.path(), None);
        assert!(!w.is_visited(goal));
        // terminal state sticks until the next reset
        assert_eq!(w.update(&g), WalkState::Unreachable);
    }

    #[test]
    fn path_avoids_blocked_cells() {
        let mut g = open_grid(5);
        for y in 0..4 {
            g.set_terrain(Point::new(2, y), Terrain::Water);
        }
        let mut w = BreadthFirstWalker::for_grid(&g);
        assert_eq!(
            solve(&mut w, &g, Point::new(0, 0), Point::new(4, 0)),
            WalkState::ReachedGoal
        );
        let path = w.path().unwrap();
        assert!(path.contains(&Point::new(2, 4)));
        assert!(path.iter().all(|&p| !g.is_blocked(p)));
        for step in path.windows(2) {
            assert_eq!(chebyshev(step[0], step[1]), 1);
        }
    }

    #[test]
    fn reset_then_rerun_is_idempotent() {
        let mut g = open_grid(9);
        g.set_terrain(Point::new(4, 4), Terrain::Obstacle);
        g.set_terrain(Point::new(4, 3), Terrain::Obstacle);
        let mut w = BreadthFirstWalker::for_grid(&g);
        let from = Point::new(1, 7);
        let to = Point::new(7, 1);
        let first = solve(&mut w, &g, from, to);
        let first_path = w.path();
        for _ in 0..3 {
            assert_eq!(solve(&mut w, &g, from, to), first);
            assert_eq!(w.path(), first_path);
        }
    }

    #[test]
    fn reset_clears_stale_parents() {
        let g = open_grid(6);
        let mut w = BreadthFirstWalker::for_grid(&g);
        solve(&mut w, &g, Point::new(0, 0), Point::new(5, 5));
        // the new start had a parent in the previous query
        solve(&mut w, &g, Point::new(3, 3), Point::new(5, 5));
        assert_eq!(w.path().unwrap().first(), Some(&Point::new(3, 3)));
        assert_eq!(w.path_len(), Some(2));
    }

    #[test]
    fn one_node_per_update() {
        let g = open_grid(3);
        let mut w = BreadthFirstWalker::for_grid(&g);
        w.reset(&g, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(w.frontier_len(), 1);
        assert_eq!(w.update(&g), WalkState::Searching);
        // the corner has three neighbours
        assert_eq!(w.frontier_len(), 3);
        assert!(w.in_frontier(Point::new(1, 1)));
        assert!(w.is_visited(Point::new(0, 0)));
        assert!(!w.is_visited(Point::new(1, 1)));
    }

    #[test]
    fn start_equals_goal() {
        let g = open_grid(3);
        let mut w = BreadthFirstWalker::for_grid(&g);
        assert_eq!(
            solve(&mut w, &g, Point::new(1, 1), Point::new(1, 1)),
            WalkState::ReachedGoal
        );
        assert_eq!(w.path(), Some(vec![Point::new(1, 1)]));
        assert_eq!(w.path_len(), Some(0));
    }

    #[test]
    fn reset_errors() {
        let g = open_grid(4);
        let mut w = BreadthFirstWalker::new();
        assert!(matches!(
            w.reset(&g, Point::ZERO, Point::ZERO),
            Err(WalkError::NotInitialized { .. })
        ));
        w.init(&g);
        assert_eq!(
            w.reset(&g, Point::ZERO, Point::new(4, 0)),
            Err(WalkError::OutOfBounds {
                point: Point::new(4, 0),
                size: 4
            })
        );
        let bigger = open_grid(8);
        assert!(matches!(
            w.reset(&bigger, Point::ZERO, Point::ZERO),
            Err(WalkError::SizeMismatch {
                expected: 4,
                actual: 8,
                ..
            })
        ));
        w.init(&bigger);
        assert!(w.reset(&bigger, Point::ZERO, Point::new(7, 7)).is_ok());
        w.destroy();
        assert!(!w.is_initialized());
        assert_eq!(w.update(&bigger), WalkState::Unreachable);
    }

    #[test]
    fn capabilities() {
        let w = BreadthFirstWalker::new();
        assert!(!w.weighted_graph_supported());
        assert!(!w.heuristics_supported());
    }
}
