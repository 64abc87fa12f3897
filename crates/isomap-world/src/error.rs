use isomap_core::MapError;
use isomap_paths::WalkError;
use thiserror::Error;

/// Errors surfaced by a [`World`](crate::World).
#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error("no walker at index {index} ({count} registered)")]
    BadWalkerIndex { index: usize, count: usize },
}
