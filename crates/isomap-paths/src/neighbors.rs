use isomap_core::{Point, Range};

/// The eight step directions in expansion order: East, South-East, South,
/// South-West, West, North-West, North, North-East. South is `+y`.
///
/// Walkers expand neighbours in this order, which decides between paths of
/// equal length.
pub const COMPASS: [Point; 8] = [
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
    Point::new(0, -1),
    Point::new(1, -1),
];

/// Reusable buffer for neighbour enumeration.
#[derive(Clone, Debug)]
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// The in-bounds neighbours of `p`, in [`COMPASS`] order.
    pub fn within(&mut self, p: Point, bounds: Range) -> &[Point] {
        self.buf.clear();
        for d in COMPASS {
            let n = p + d;
            if bounds.contains(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}
