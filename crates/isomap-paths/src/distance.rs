use isomap_core::Point;

/// Chebyshev (L∞) distance between two points. This is the number of steps
/// between two cells when diagonal moves cost the same as straight ones.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}
