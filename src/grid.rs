use bit_set::BitSet;
use error_chain::bail;
use std::fmt;
use std::str::FromStr;

use crate::cells::{offset_coordinate, CellState, CompassPrimary, CoordinateSmallVec,
                   GridCoordinate};
use crate::errors::*;
use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnsCount, RowsCount};


/// A rectangular grid of wall and open cells.
///
/// Every cell is a wall when the grid is created. Only maze generators in this crate carve open
/// cells, so a grid handed out by a generator is effectively immutable.
#[derive(Clone)]
pub struct Grid {
    dimensions: RectGridDimensions,
    open: BitSet,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Grid :: rows: {:?}, columns: {:?}, open cells: {:?}",
               self.rows(),
               self.columns(),
               self.open_cells_count())
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Grid) -> bool {
        self.dimensions == other.dimensions && self.open.iter().eq(other.open.iter())
    }
}
impl Eq for Grid {}

impl Grid {
    pub fn new(dimensions: RectGridDimensions) -> Grid {
        Grid {
            dimensions,
            open: BitSet::with_capacity(dimensions.size()),
        }
    }

    #[inline]
    pub fn dimensions(&self) -> &RectGridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.size()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.dimensions.rows()
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.dimensions.columns()
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        self.dimensions.is_valid_coordinate(coord)
    }

    /// State of the cell at `coord`, None if the coordinate is outside the grid.
    pub fn cell_state(&self, coord: GridCoordinate) -> Option<CellState> {
        self.dimensions.row_major_index(coord).map(|index| {
            if self.open.contains(index) {
                CellState::Open
            } else {
                CellState::Wall
            }
        })
    }

    /// Out of bounds coordinates are never open.
    #[inline]
    pub fn is_open(&self, coord: GridCoordinate) -> bool {
        self.cell_state(coord) == Some(CellState::Open)
    }

    #[inline]
    pub fn open_cells_count(&self) -> usize {
        self.open.len()
    }

    /// Turn a wall cell into an open cell. Returns true if the cell was a valid wall cell.
    pub(crate) fn carve(&mut self, coord: GridCoordinate) -> bool {
        match self.dimensions.row_major_index(coord) {
            Some(index) => self.open.insert(index),
            None => false,
        }
    }

    /// The in bounds cell one step away in the given direction, open or not.
    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        offset_coordinate(coord, direction, 1).filter(|c| self.is_valid_coordinate(*c))
    }

    /// Cells to the North, South, East or West of a cell that are inside the grid.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    /// Neighbouring cells that are open.
    pub fn open_neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        self.neighbours(coord)
            .into_iter()
            .filter(|c| self.is_open(*c))
            .collect()
    }

    /// Number of pairs of orthogonally adjacent open cells. For a perfect maze this is one less
    /// than the number of open cells.
    pub fn passages_count(&self) -> usize {
        self.open_cells()
            .map(|coord| {
                [CompassPrimary::South, CompassPrimary::East]
                    .iter()
                    .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                    .filter(|c| self.is_open(*c))
                    .count()
            })
            .sum()
    }

    /// All cell coordinates in row major order.
    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter {
            dimensions: self.dimensions,
            current_cell_number: 0,
            cells_count: self.dimensions.size(),
        }
    }

    /// Open cell coordinates in row major order.
    pub fn open_cells<'a>(&'a self) -> impl Iterator<Item = GridCoordinate> + 'a {
        let dimensions = self.dimensions;
        self.open.iter().map(move |index| dimensions.coordinate_at(index))
    }
}

#[derive(Debug, Clone)]
pub struct CellIter {
    dimensions: RectGridDimensions,
    current_cell_number: usize,
    cells_count: usize,
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = self.dimensions.coordinate_at(self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        (lower_bound, Some(lower_bound))
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = GridCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parses the plain text rendering of a grid: one line per row, `#` for a wall and `.` or a space
/// for an open cell. Empty leading and trailing lines are ignored.
impl FromStr for Grid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Grid> {
        let lines = s.lines()
            .skip_while(|line| line.is_empty())
            .collect::<Vec<&str>>();
        let rows_count = lines.iter()
            .rposition(|line| !line.is_empty())
            .map_or(0, |last| last + 1);
        let lines = &lines[..rows_count];

        let columns_count = lines.first().map_or(0, |line| line.chars().count());
        let dimensions = RectGridDimensions::new(RowsCount(rows_count), ColumnsCount(columns_count));
        let mut grid = Grid::new(dimensions);

        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != columns_count {
                bail!(ErrorKind::MalformedGrid(format!("row {} is not {} cells wide", row, columns_count)));
            }
            for (column, glyph) in line.chars().enumerate() {
                match glyph {
                    '#' => {}
                    '.' | ' ' => {
                        let _ = grid.carve(GridCoordinate::new(row as u32, column as u32));
                    }
                    other => {
                        bail!(ErrorKind::MalformedGrid(format!("unexpected cell '{}' at row {}", other, row)))
                    }
                }
            }
        }

        Ok(grid)
    }
}


#[cfg(test)]
mod tests {

    use itertools::Itertools;

    use super::*;

    fn small_grid(rows: usize, columns: usize) -> Grid {
        Grid::new(RectGridDimensions::new(RowsCount(rows), ColumnsCount(columns)))
    }

    fn gc(row: u32, column: u32) -> GridCoordinate {
        GridCoordinate::new(row, column)
    }

    #[test]
    fn new_grid_is_all_wall() {
        let g = small_grid(4, 6);
        assert_eq!(g.size(), 24);
        assert_eq!(g.open_cells_count(), 0);
        assert!(g.iter().all(|coord| g.cell_state(coord) == Some(CellState::Wall)));
    }

    #[test]
    fn cell_state_is_bounds_checked() {
        let g = small_grid(3, 3);
        assert_eq!(g.cell_state(gc(2, 2)), Some(CellState::Wall));
        assert_eq!(g.cell_state(gc(3, 0)), None);
        assert_eq!(g.cell_state(gc(0, 3)), None);
        assert!(!g.is_open(gc(100, 100)));
    }

    #[test]
    fn carving() {
        let mut g = small_grid(3, 3);
        assert!(g.carve(gc(1, 1)));
        assert!(!g.carve(gc(1, 1)));
        assert!(!g.carve(gc(5, 5)));
        assert_eq!(g.cell_state(gc(1, 1)), Some(CellState::Open));
        assert_eq!(g.open_cells_count(), 1);
        assert_eq!(g.open_cells().collect::<Vec<_>>(), vec![gc(1, 1)]);
    }

    #[test]
    fn neighbour_cells() {
        let g = small_grid(2, 2);
        let sorted = |coords: CoordinateSmallVec| coords.into_iter().sorted().collect::<Vec<_>>();
        assert_eq!(sorted(g.neighbours(gc(0, 0))), vec![gc(0, 1), gc(1, 0)]);
        assert_eq!(sorted(g.neighbours(gc(1, 1))), vec![gc(0, 1), gc(1, 0)]);

        let g = small_grid(3, 3);
        assert_eq!(sorted(g.neighbours(gc(1, 1))),
                   vec![gc(0, 1), gc(1, 0), gc(1, 2), gc(2, 1)]);
    }

    #[test]
    fn neighbour_at_direction() {
        let g = small_grid(2, 2);
        let check_neighbour = |coord, dir, expected| {
            assert_eq!(g.neighbour_at_direction(coord, dir), expected);
        };
        check_neighbour(gc(0, 0), CompassPrimary::North, None);
        check_neighbour(gc(0, 0), CompassPrimary::South, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), CompassPrimary::East, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), CompassPrimary::West, None);

        check_neighbour(gc(1, 1), CompassPrimary::North, Some(gc(0, 1)));
        check_neighbour(gc(1, 1), CompassPrimary::South, None);
        check_neighbour(gc(1, 1), CompassPrimary::East, None);
        check_neighbour(gc(1, 1), CompassPrimary::West, Some(gc(1, 0)));
    }

    #[test]
    fn cell_iter() {
        let g = small_grid(2, 2);
        assert_eq!(g.iter().len(), 4);
        assert_eq!(g.iter().collect::<Vec<GridCoordinate>>(),
                   &[gc(0, 0), gc(0, 1), gc(1, 0), gc(1, 1)]);
    }

    #[test]
    fn parse_grid_text() {
        let g = "
#####
#...#
###.#
#####
".parse::<Grid>()
            .unwrap();
        assert_eq!(g.rows(), RowsCount(4));
        assert_eq!(g.columns(), ColumnsCount(5));
        assert_eq!(g.open_cells().collect::<Vec<_>>(),
                   vec![gc(1, 1), gc(1, 2), gc(1, 3), gc(2, 3)]);
        assert_eq!(g.open_neighbours(gc(1, 3)).into_iter().sorted().collect::<Vec<_>>(),
                   vec![gc(1, 2), gc(2, 3)]);
        assert_eq!(g.passages_count(), 3);
    }

    #[test]
    fn parse_rejects_ragged_and_unknown_cells() {
        assert!("###\n##\n###".parse::<Grid>().is_err());
        assert!("###\n#x#\n###".parse::<Grid>().is_err());
    }

    #[test]
    fn passages_count_sees_loops() {
        let g = "
....
....
".parse::<Grid>()
            .unwrap();
        // 3 + 3 horizontal, 4 vertical
        assert_eq!(g.passages_count(), 10);
    }
}
