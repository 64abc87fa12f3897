use isomap_core::Point;
use thiserror::Error;

/// Errors from preparing a walker for a query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalkError {
    #[error("walker {walker} used before init")]
    NotInitialized { walker: &'static str },
    #[error("walker {walker} was built for a {expected}x{expected} grid, map is {actual}x{actual}")]
    SizeMismatch {
        walker: &'static str,
        expected: i32,
        actual: i32,
    },
    #[error("{point} is outside the {size}x{size} grid")]
    OutOfBounds { point: Point, size: i32 },
}
