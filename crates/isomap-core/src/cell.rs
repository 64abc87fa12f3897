//! The [`Cell`] type: one map tile with a terrain kind and a movement cost.

/// Movement cost at or above which a cell cannot be entered.
pub const BLOCKED_COST: i32 = 3000;

/// Terrain kinds a tile can carry.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Water,
    #[default]
    Walkable,
    Marsh,
    Obstacle,
}

impl Terrain {
    /// All terrain kinds, in declaration order.
    pub const ALL: [Terrain; 4] = [
        Terrain::Water,
        Terrain::Walkable,
        Terrain::Marsh,
        Terrain::Obstacle,
    ];

    /// Cost assigned to a cell when its terrain is set through
    /// [`TileGrid::set_terrain`](crate::TileGrid::set_terrain) or a bitmap import.
    #[inline]
    pub const fn default_cost(self) -> i32 {
        match self {
            Terrain::Walkable => 1,
            Terrain::Marsh => 3,
            Terrain::Water | Terrain::Obstacle => BLOCKED_COST,
        }
    }

    /// Classify a pixel of a terrain bitmap.
    ///
    /// Pure blue is water, pure green is walkable, pure yellow is marsh.
    /// Every other color is an obstacle.
    #[inline]
    pub const fn from_rgb(rgb: [u8; 3]) -> Self {
        match rgb {
            [0x00, 0x00, 0xFF] => Terrain::Water,
            [0x00, 0xFF, 0x00] => Terrain::Walkable,
            [0xFF, 0xFF, 0x00] => Terrain::Marsh,
            _ => Terrain::Obstacle,
        }
    }

    /// Color written for this terrain when exporting a bitmap.
    #[inline]
    pub const fn to_rgb(self) -> [u8; 3] {
        match self {
            Terrain::Water => [0x00, 0x00, 0xFF],
            Terrain::Walkable => [0x00, 0xFF, 0x00],
            Terrain::Marsh => [0xFF, 0xFF, 0x00],
            Terrain::Obstacle => [0x00, 0x00, 0x00],
        }
    }
}

/// A single map tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub terrain: Terrain,
    pub cost: i32,
}

impl Cell {
    #[inline]
    pub const fn new(terrain: Terrain, cost: i32) -> Self {
        Self { terrain, cost }
    }

    /// A cell of the given terrain with that terrain's default cost.
    #[inline]
    pub const fn of(terrain: Terrain) -> Self {
        Self::new(terrain, terrain.default_cost())
    }

    /// Whether the cell's cost marks it as impassable.
    #[inline]
    pub const fn is_blocked(self) -> bool {
        self.cost >= BLOCKED_COST
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::new(Terrain::Walkable, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_walkable() {
        let c = Cell::default();
        assert_eq!(c.terrain, Terrain::Walkable);
        assert_eq!(c.cost, 1);
        assert!(!c.is_blocked());
    }

    #[test]
    fn blocked_sentinel_is_representable() {
        assert!(Cell::of(Terrain::Obstacle).is_blocked());
        assert!(Cell::of(Terrain::Water).is_blocked());
        assert!(!Cell::of(Terrain::Marsh).is_blocked());
        assert!(Cell::new(Terrain::Walkable, BLOCKED_COST + 1).is_blocked());
    }

    #[test]
    fn pixel_classification() {
        assert_eq!(Terrain::from_rgb([0, 0, 255]), Terrain::Water);
        assert_eq!(Terrain::from_rgb([0, 255, 0]), Terrain::Walkable);
        assert_eq!(Terrain::from_rgb([255, 255, 0]), Terrain::Marsh);
        assert_eq!(Terrain::from_rgb([255, 0, 0]), Terrain::Obstacle);
        assert_eq!(Terrain::from_rgb([0, 254, 0]), Terrain::Obstacle);
        for t in Terrain::ALL {
            assert_eq!(Terrain::from_rgb(t.to_rgb()), t);
        }
    }
}
