use smallvec::SmallVec;
use std::convert::From;
use std::fmt;

/// A cell position on a maze grid. Row 0 is the top row, column 0 the leftmost column.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: u32,
    pub column: u32,
}

impl GridCoordinate {
    #[inline]
    pub fn new(row: u32, column: u32) -> GridCoordinate {
        GridCoordinate { row, column }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(row_column_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CellState {
    Wall,
    Open,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    /// (row, column) delta of a single step in this direction.
    #[inline]
    pub fn offset(self) -> (i64, i64) {
        match self {
            CompassPrimary::North => (-1, 0),
            CompassPrimary::South => (1, 0),
            CompassPrimary::East => (0, 1),
            CompassPrimary::West => (0, -1),
        }
    }

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// Creates a new `GridCoordinate` offset `steps` cells away in the given direction.
///
/// Returns None if the coordinate is not representable (it would fall above row 0 or left of
/// column 0). There is no upper bound check, that depends on the grid dimensions.
pub fn offset_coordinate(coord: GridCoordinate,
                         dir: CompassPrimary,
                         steps: u32)
                         -> Option<GridCoordinate> {
    let (row_delta, column_delta) = dir.offset();
    let steps = i64::from(steps);
    let row = i64::from(coord.row) + row_delta * steps;
    let column = i64::from(coord.column) + column_delta * steps;

    if row < 0 || column < 0 || row > i64::from(u32::MAX) || column > i64::from(u32::MAX) {
        None
    } else {
        Some(GridCoordinate::new(row as u32, column as u32))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn single_step_offsets() {
        let gc = |r, c| GridCoordinate::new(r, c);
        let origin = gc(1, 1);
        assert_eq!(offset_coordinate(origin, CompassPrimary::North, 1), Some(gc(0, 1)));
        assert_eq!(offset_coordinate(origin, CompassPrimary::South, 1), Some(gc(2, 1)));
        assert_eq!(offset_coordinate(origin, CompassPrimary::East, 1), Some(gc(1, 2)));
        assert_eq!(offset_coordinate(origin, CompassPrimary::West, 1), Some(gc(1, 0)));
    }

    #[test]
    fn offsets_below_zero_are_unrepresentable() {
        let gc = |r, c| GridCoordinate::new(r, c);
        assert_eq!(offset_coordinate(gc(1, 1), CompassPrimary::North, 2), None);
        assert_eq!(offset_coordinate(gc(1, 1), CompassPrimary::West, 2), None);
        assert_eq!(offset_coordinate(gc(0, 0), CompassPrimary::North, 1), None);
        assert_eq!(offset_coordinate(gc(u32::MAX, 0), CompassPrimary::South, 1), None);
    }

    #[test]
    fn lattice_offsets() {
        let gc = |r, c| GridCoordinate::new(r, c);
        assert_eq!(offset_coordinate(gc(1, 1), CompassPrimary::South, 2), Some(gc(3, 1)));
        assert_eq!(offset_coordinate(gc(3, 5), CompassPrimary::West, 2), Some(gc(3, 3)));
    }

    #[test]
    fn opposite_directions_cancel_out() {
        let start = GridCoordinate::new(4, 4);
        for dir in CompassPrimary::ALL.iter().cloned() {
            let there = offset_coordinate(start, dir, 1).unwrap();
            let back = offset_coordinate(there, dir.opposite(), 1).unwrap();
            assert_eq!(back, start);
        }
    }

    #[test]
    fn coordinate_ordering_is_row_major() {
        let mut coords = vec![GridCoordinate::new(1, 0),
                              GridCoordinate::new(0, 12),
                              GridCoordinate::new(0, 2)];
        coords.sort();
        assert_eq!(coords,
                   vec![GridCoordinate::new(0, 2),
                        GridCoordinate::new(0, 12),
                        GridCoordinate::new(1, 0)]);
    }

    #[test]
    fn display() {
        assert_eq!(GridCoordinate::from((3, 14)).to_string(), "(3, 14)");
    }
}
