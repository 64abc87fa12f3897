//! Stepped pathfinding over an isomap [`TileGrid`](isomap_core::TileGrid).
//!
//! Walkers search one node per [`update`](GridWalker::update), so a search
//! can be spread across frames and its frontier inspected as it grows:
//!
//! - **Breadth-first** shortest paths by step count ([`BreadthFirstWalker`])
//! - **Uniform-cost** cheapest paths over per-cell costs ([`UniformCostWalker`])
//!
//! Both move in eight directions and treat cells at or above
//! [`BLOCKED_COST`](isomap_core::BLOCKED_COST) as impassable. Each walker
//! owns a [`NodeGrid`] sized to the map and reuses it between queries.

mod bfs;
mod distance;
mod error;
mod neighbors;
pub mod node;
mod queue;
mod uniform_cost;
mod walker;

pub use bfs::BreadthFirstWalker;
pub use distance::chebyshev;
pub use error::WalkError;
pub use neighbors::{COMPASS, Neighbors};
pub use node::{AStarNode, Node, NodeGrid, NodeId, SearchNode};
pub use queue::PriorityQueue;
pub use uniform_cost::UniformCostWalker;
pub use walker::{GridWalker, WalkState, run_to_completion};
