//! Per-cell search bookkeeping and the arena that holds it.
//!
//! A walker mirrors the tile grid with a [`NodeGrid`]: one node per cell,
//! stored in a flat vector. Parent links are [`NodeId`]s into that vector,
//! so a path is recovered by following indices back from the goal.

use isomap_core::{Point, Range};

/// Index of a node inside its [`NodeGrid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub usize);

/// Behaviour shared by every node kind a walker can store.
///
/// `cost` is the frontier ordering key. Node kinds decide for themselves what
/// it means, so a cost-ordered frontier works with any of them.
pub trait SearchNode: Clone {
    /// A fresh node for grid position `pos`.
    fn at(pos: Point) -> Self;

    fn pos(&self) -> Point;

    fn cost(&self) -> i32;

    /// Whether the node was popped from the frontier and expanded.
    fn visited(&self) -> bool;

    fn set_visited(&mut self, visited: bool);

    /// Whether the node has been discovered (pushed to the frontier).
    fn is_open(&self) -> bool;

    fn set_open(&mut self, open: bool);

    fn parent(&self) -> Option<NodeId>;

    fn set_parent(&mut self, parent: Option<NodeId>);

    /// Forget everything learned by a previous search.
    fn clear(&mut self);

    /// Whether two nodes refer to the same cell.
    #[inline]
    fn same_cell(&self, other: &Self) -> bool {
        self.pos() == other.pos()
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// Plain search node with a stored cost.
///
/// Two nodes compare equal when they sit on the same cell, whatever their
/// search state.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub pos: Point,
    pub cost: i32,
    pub visited: bool,
    pub open: bool,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn new(pos: Point, cost: i32) -> Self {
        Self {
            pos,
            cost,
            visited: false,
            open: false,
            parent: None,
        }
    }

    #[inline]
    pub fn set_cost(&mut self, cost: i32) {
        self.cost = cost;
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Node {}

impl SearchNode for Node {
    fn at(pos: Point) -> Self {
        Self::new(pos, 0)
    }

    #[inline]
    fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    fn cost(&self) -> i32 {
        self.cost
    }

    #[inline]
    fn visited(&self) -> bool {
        self.visited
    }

    #[inline]
    fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    #[inline]
    fn is_open(&self) -> bool {
        self.open
    }

    #[inline]
    fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    #[inline]
    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    fn clear(&mut self) {
        self.cost = 0;
        self.visited = false;
        self.open = false;
        self.parent = None;
    }
}

// ---------------------------------------------------------------------------
// AStarNode
// ---------------------------------------------------------------------------

/// Node for weighted and heuristic searches.
///
/// `g` is the cost accumulated from the start and `h` the estimate to the
/// goal. The ordering key is the fitness `f = g + h`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AStarNode {
    pub base: Node,
    pub g: i32,
    pub h: i32,
}

impl AStarNode {
    /// Fitness, `g + h`.
    #[inline]
    pub fn f(&self) -> i32 {
        self.g.saturating_add(self.h)
    }

    #[inline]
    pub fn set_g(&mut self, g: i32) {
        self.g = g;
    }

    #[inline]
    pub fn set_h(&mut self, h: i32) {
        self.h = h;
    }
}

impl SearchNode for AStarNode {
    fn at(pos: Point) -> Self {
        Self {
            base: Node::at(pos),
            g: 0,
            h: 0,
        }
    }

    #[inline]
    fn pos(&self) -> Point {
        self.base.pos
    }

    #[inline]
    fn cost(&self) -> i32 {
        self.f()
    }

    #[inline]
    fn visited(&self) -> bool {
        self.base.visited
    }

    #[inline]
    fn set_visited(&mut self, visited: bool) {
        self.base.visited = visited;
    }

    #[inline]
    fn is_open(&self) -> bool {
        self.base.open
    }

    #[inline]
    fn set_open(&mut self, open: bool) {
        self.base.open = open;
    }

    #[inline]
    fn parent(&self) -> Option<NodeId> {
        self.base.parent
    }

    #[inline]
    fn set_parent(&mut self, parent: Option<NodeId>) {
        self.base.parent = parent;
    }

    fn clear(&mut self) {
        self.base.clear();
        self.g = 0;
        self.h = 0;
    }
}

// ---------------------------------------------------------------------------
// NodeGrid
// ---------------------------------------------------------------------------

/// Arena of nodes mirroring a square tile grid, row-major.
#[derive(Clone, Debug)]
pub struct NodeGrid<N> {
    size: i32,
    nodes: Vec<N>,
}

impl<N: SearchNode> NodeGrid<N> {
    /// Allocate one node per cell of a `size`×`size` grid.
    pub fn new(size: i32) -> Self {
        let size = size.max(0);
        Self {
            size,
            nodes: Range::square(size).iter().map(N::at).collect(),
        }
    }

    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node index of a grid position, `None` outside the grid.
    #[inline]
    pub fn id(&self, p: Point) -> Option<NodeId> {
        if Range::square(self.size).contains(p) {
            Some(NodeId((p.y * self.size + p.x) as usize))
        } else {
            None
        }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &N {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut N {
        &mut self.nodes[id.0]
    }

    /// Node at a grid position, `None` outside the grid.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&N> {
        self.id(p).map(|id| self.node(id))
    }

    /// Reset every node without reallocating.
    pub fn clear(&mut self) {
        for n in &mut self.nodes {
            n.clear();
        }
    }

    /// Number of parent links between `goal` and the root of its chain.
    pub fn parent_chain_len(&self, goal: NodeId) -> usize {
        self.chain(goal).count() - 1
    }

    /// Positions from the root of `goal`'s parent chain to `goal`, both
    /// included.
    pub fn path_to(&self, goal: NodeId) -> Vec<Point> {
        let mut path: Vec<Point> = self.chain(goal).map(|id| self.node(id).pos()).collect();
        path.reverse();
        path
    }

    /// Walk parent links from `from`. Bounded by the arena size so a
    /// corrupted chain cannot loop forever.
    fn chain(&self, from: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(from), |&id| self.node(id).parent()).take(self.nodes.len().max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_equality_ignores_search_state() {
        let mut a = Node::new(Point::new(2, 3), 5);
        let b = Node::new(Point::new(2, 3), 9);
        a.visited = true;
        assert_eq!(a, b);
        assert_ne!(a, Node::new(Point::new(3, 2), 5));
        assert!(a.same_cell(&b));
    }

    #[test]
    fn astar_cost_is_fitness() {
        let mut n = AStarNode::at(Point::new(1, 1));
        n.set_g(4);
        n.set_h(6);
        assert_eq!(n.cost(), 10);
        n.set_g(i32::MAX);
        assert_eq!(n.cost(), i32::MAX);
        n.clear();
        assert_eq!(n.cost(), 0);
        assert_eq!(n.pos(), Point::new(1, 1));
    }

    #[test]
    fn grid_ids_are_row_major() {
        let g: NodeGrid<Node> = NodeGrid::new(4);
        assert_eq!(g.len(), 16);
        assert_eq!(g.id(Point::new(1, 2)), Some(NodeId(9)));
        assert_eq!(g.node(NodeId(9)).pos(), Point::new(1, 2));
        assert_eq!(g.id(Point::new(4, 0)), None);
        assert_eq!(g.id(Point::new(0, -1)), None);
    }

    #[test]
    fn path_follows_parents() {
        let mut g: NodeGrid<Node> = NodeGrid::new(3);
        let ids: Vec<NodeId> = [(0, 0), (1, 1), (2, 1), (2, 2)]
            .iter()
            .map(|&(x, y)| g.id(Point::new(x, y)).unwrap())
            .collect();
        for w in ids.windows(2) {
            g.node_mut(w[1]).set_parent(Some(w[0]));
        }
        let goal = ids[3];
        assert_eq!(g.parent_chain_len(goal), 3);
        assert_eq!(
            g.path_to(goal),
            vec![
                Point::new(0, 0),
                Point::new(1, 1),
                Point::new(2, 1),
                Point::new(2, 2)
            ]
        );
        assert_eq!(g.parent_chain_len(ids[0]), 0);

        g.clear();
        assert_eq!(g.path_to(goal), vec![Point::new(2, 2)]);
    }

    #[test]
    fn cyclic_chain_terminates() {
        let mut g: NodeGrid<Node> = NodeGrid::new(2);
        let a = NodeId(0);
        let b = NodeId(1);
        g.node_mut(a).set_parent(Some(b));
        g.node_mut(b).set_parent(Some(a));
        assert_eq!(g.path_to(a).len(), 4);
    }
}
