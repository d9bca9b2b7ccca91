use crate::cells::GridCoordinate;
use crate::units::{CellSize, ColumnsCount, Height, RowsCount, Width};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RectGridDimensions {
    rows: RowsCount,
    columns: ColumnsCount,
}

impl RectGridDimensions {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> RectGridDimensions {
        RectGridDimensions { rows, columns }
    }

    /// Dimensions of a grid that tiles a canvas with square cells. Partial cells at the right and
    /// bottom edges are dropped. A zero cell size gives an empty grid.
    pub fn from_canvas(width: Width, height: Height, cell_size: CellSize) -> RectGridDimensions {
        let CellSize(cell) = cell_size;
        if cell == 0 {
            return RectGridDimensions::new(RowsCount(0), ColumnsCount(0));
        }
        RectGridDimensions::new(RowsCount(height.0 / cell), ColumnsCount(width.0 / cell))
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.rows.0 * self.columns.0
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.row as usize) < self.rows.0 && (coord.column as usize) < self.columns.0
    }

    /// Is the coordinate inside the grid with a margin of one cell from every edge?
    #[inline]
    pub fn is_interior(&self, coord: GridCoordinate) -> bool {
        let (row, column) = (coord.row as usize, coord.column as usize);
        row >= 1 && column >= 1 && row + 1 < self.rows.0 && column + 1 < self.columns.0
    }

    /// Is the coordinate on the outermost ring of cells?
    #[inline]
    pub fn is_border(&self, coord: GridCoordinate) -> bool {
        self.is_valid_coordinate(coord) && !self.is_interior(coord)
    }

    #[inline]
    pub fn row_major_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.columns.0 + coord.column as usize)
        } else {
            None
        }
    }

    /// Inverse of `row_major_index`. The index must be less than `size`.
    #[inline]
    pub fn coordinate_at(&self, index: usize) -> GridCoordinate {
        let row = index / self.columns.0;
        let column = index % self.columns.0;
        GridCoordinate::new(row as u32, column as u32)
    }

    /// The bottom right cell, None for an empty grid.
    pub fn last_coordinate(&self) -> Option<GridCoordinate> {
        if self.size() == 0 {
            None
        } else {
            Some(GridCoordinate::new((self.rows.0 - 1) as u32, (self.columns.0 - 1) as u32))
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn dims(rows: usize, columns: usize) -> RectGridDimensions {
        RectGridDimensions::new(RowsCount(rows), ColumnsCount(columns))
    }

    #[test]
    fn canvas_tiling() {
        let d = RectGridDimensions::from_canvas(Width(800), Height(600), CellSize(20));
        assert_eq!(d.rows(), RowsCount(30));
        assert_eq!(d.columns(), ColumnsCount(40));
        assert_eq!(d.size(), 1200);

        let partial = RectGridDimensions::from_canvas(Width(810), Height(619), CellSize(20));
        assert_eq!(partial, d);

        let empty = RectGridDimensions::from_canvas(Width(800), Height(600), CellSize(0));
        assert_eq!(empty.size(), 0);
    }

    #[test]
    fn coordinate_as_index() {
        let d = dims(2, 3);
        let gc = |r, c| GridCoordinate::new(r, c);
        let coords = [gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 0), gc(1, 1), gc(1, 2)];
        let indices = coords.iter()
            .map(|coord| d.row_major_index(*coord))
            .collect::<Vec<Option<usize>>>();
        let expected = (0..6).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(indices, expected);

        for i in 0..6 {
            assert_eq!(d.coordinate_at(i), coords[i]);
        }

        assert_eq!(d.row_major_index(gc(2, 0)), None);
        assert_eq!(d.row_major_index(gc(0, 3)), None);
        assert_eq!(d.row_major_index(gc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn interior_has_a_one_cell_margin() {
        let d = dims(5, 5);
        let gc = |r, c| GridCoordinate::new(r, c);
        assert!(d.is_interior(gc(1, 1)));
        assert!(d.is_interior(gc(3, 3)));
        assert!(!d.is_interior(gc(0, 2)));
        assert!(!d.is_interior(gc(4, 2)));
        assert!(!d.is_interior(gc(2, 4)));
        assert!(!d.is_interior(gc(9, 9)));

        assert!(d.is_border(gc(0, 0)));
        assert!(d.is_border(gc(4, 3)));
        assert!(!d.is_border(gc(2, 2)));
        assert!(!d.is_border(gc(5, 5)));
    }

    #[test]
    fn last_coordinate() {
        assert_eq!(dims(3, 7).last_coordinate(), Some(GridCoordinate::new(2, 6)));
        assert_eq!(dims(0, 7).last_coordinate(), None);
    }
}
