use error_chain::bail;
use log::debug;
use rand::seq::SliceRandom;
use rand::{self, Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use smallvec::SmallVec;

use crate::cells::{offset_coordinate, CompassPrimary, GridCoordinate};
use crate::errors::*;
use crate::grid::Grid;
use crate::grid_dimensions::RectGridDimensions;
use crate::units::{ColumnsCount, RowsCount};

/// Where wall extension carving starts, and where the player starts on those mazes.
pub const WALL_EXTENSION_START: GridCoordinate = GridCoordinate { row: 1, column: 1 };

/// Where backtracker carving starts.
pub const BACKTRACKER_START: GridCoordinate = GridCoordinate { row: 0, column: 0 };

// Initial order of the lattice steps before shuffling.
const CARVE_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::East,
                                               CompassPrimary::West,
                                               CompassPrimary::South,
                                               CompassPrimary::North];

#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
pub enum Generator {
    /// Randomized wall extension on the odd lattice, start at (1, 1), outer ring stays wall.
    WallExtension,
    /// Randomized backtracker over the whole grid from (0, 0) with the goal in the bottom right
    /// corner.
    Backtracker,
}

impl Default for Generator {
    fn default() -> Generator {
        Generator::WallExtension
    }
}

impl Generator {
    pub fn start(self) -> GridCoordinate {
        match self {
            Generator::WallExtension => WALL_EXTENSION_START,
            Generator::Backtracker => BACKTRACKER_START,
        }
    }

    pub fn generate<R: Rng + ?Sized>(self,
                                     rows: RowsCount,
                                     columns: ColumnsCount,
                                     rng: &mut R)
                                     -> Result<Grid> {
        match self {
            Generator::WallExtension => generate_with_rng(rows, columns, rng),
            Generator::Backtracker => recursive_backtracker(rows, columns, rng),
        }
    }
}

/// Generate a wall extension maze using the thread local random number generator.
pub fn generate(rows: RowsCount, columns: ColumnsCount) -> Result<Grid> {
    generate_with_rng(rows, columns, &mut rand::thread_rng())
}

/// Generate a wall extension maze that is the same for every call with the same seed.
pub fn generate_seeded(rows: RowsCount, columns: ColumnsCount, seed: u64) -> Result<Grid> {
    let mut rng = XorShiftRng::seed_from_u64(seed);
    generate_with_rng(rows, columns, &mut rng)
}

/// Apply the wall extension maze generation algorithm to a fresh all wall grid.
///
/// Carving works on the lattice of cells two steps apart from the start cell at (1, 1). From the
/// current cell the four lattice neighbours are tried in a freshly shuffled order; a neighbour
/// that is inside the one cell margin and still a wall is carved open along with the connector
/// cell between the two, and the search continues from that neighbour before any of the
/// remaining directions are tried. When every direction of a cell is used up the search backs
/// up to the cell it came from.
///
/// This is a depth first search, so the open cells form a spanning tree of the lattice: a perfect
/// maze with walls one cell thick. Grids too small to hold a second lattice cell (3x3 and 4x4)
/// end up with only the start cell open.
pub fn generate_with_rng<R: Rng + ?Sized>(rows: RowsCount,
                                          columns: ColumnsCount,
                                          rng: &mut R)
                                          -> Result<Grid> {
    let dimensions = maze_dimensions(rows, columns)?;
    let mut grid = Grid::new(dimensions);
    wall_extension(&mut grid, WALL_EXTENSION_START, rng);

    debug!("wall extension maze {}x{} carved {} open cells",
           rows.0,
           columns.0,
           grid.open_cells_count());
    Ok(grid)
}

/// Apply the randomized backtracker maze generation algorithm to a fresh all wall grid.
///
/// Starts at (0, 0) and carves on the whole grid with no margin. The top of the stack picks one
/// random lattice neighbour that is still a wall, carves it and the connector, and pushes it. A
/// cell with no such neighbour is popped. The bottom right corner is always opened as the goal
/// and joined to the maze if the lattice did not reach it.
pub fn recursive_backtracker<R: Rng + ?Sized>(rows: RowsCount,
                                              columns: ColumnsCount,
                                              rng: &mut R)
                                              -> Result<Grid> {
    let dimensions = maze_dimensions(rows, columns)?;
    let mut grid = Grid::new(dimensions);
    backtracker(&mut grid, BACKTRACKER_START, rng);

    if let Some(corner) = dimensions.last_coordinate() {
        open_corner_goal(&mut grid, corner);
    }

    debug!("backtracker maze {}x{} carved {} open cells",
           rows.0,
           columns.0,
           grid.open_cells_count());
    Ok(grid)
}

fn maze_dimensions(rows: RowsCount, columns: ColumnsCount) -> Result<RectGridDimensions> {
    if rows.0 < 3 || columns.0 < 3 || rows.0 > u32::MAX as usize || columns.0 > u32::MAX as usize {
        bail!(ErrorKind::InvalidDimensions(rows.0, columns.0));
    }
    Ok(RectGridDimensions::new(rows, columns))
}

// One pending cell of the wall extension search: its shuffled directions and how many of them
// have been tried.
struct CarveFrame {
    cell: GridCoordinate,
    directions: [CompassPrimary; 4],
    next: usize,
}

impl CarveFrame {
    fn new<R: Rng + ?Sized>(cell: GridCoordinate, rng: &mut R) -> CarveFrame {
        let mut directions = CARVE_DIRECTIONS;
        directions.shuffle(rng);
        CarveFrame {
            cell,
            directions,
            next: 0,
        }
    }
}

fn wall_extension<R: Rng + ?Sized>(grid: &mut Grid, start: GridCoordinate, rng: &mut R) {
    let _ = grid.carve(start);
    let mut stack = vec![CarveFrame::new(start, rng)];

    while let Some(frame) = stack.last_mut() {
        if frame.next == frame.directions.len() {
            stack.pop();
            continue;
        }
        let current = frame.cell;
        let dir = frame.directions[frame.next];
        frame.next += 1;

        let step = (offset_coordinate(current, dir, 2), offset_coordinate(current, dir, 1));
        if let (Some(candidate), Some(connector)) = step {
            if grid.dimensions().is_interior(candidate) && !grid.is_open(candidate) {
                let _ = grid.carve(candidate);
                let _ = grid.carve(connector);
                stack.push(CarveFrame::new(candidate, rng));
            }
        }
    }
}

fn backtracker<R: Rng + ?Sized>(grid: &mut Grid, start: GridCoordinate, rng: &mut R) {
    let _ = grid.carve(start);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let uncarved: SmallVec<[CompassPrimary; 4]> = CARVE_DIRECTIONS.iter()
            .cloned()
            .filter(|dir| {
                offset_coordinate(current, *dir, 2)
                    .map_or(false, |c| grid.is_valid_coordinate(c) && !grid.is_open(c))
            })
            .collect();

        match uncarved.choose(rng) {
            Some(&dir) => {
                if let (Some(next), Some(connector)) = (offset_coordinate(current, dir, 2),
                                                        offset_coordinate(current, dir, 1)) {
                    let _ = grid.carve(connector);
                    let _ = grid.carve(next);
                    stack.push(next);
                }
            }
            None => {
                stack.pop();
            }
        }
    }
}

// With an even number of rows and columns the corner is not on the lattice and may be walled in.
// Its western neighbour then sits next to a lattice cell, so opening that joins it up.
fn open_corner_goal(grid: &mut Grid, corner: GridCoordinate) {
    let _ = grid.carve(corner);
    if grid.open_neighbours(corner).is_empty() {
        if let Some(west) = grid.neighbour_at_direction(corner, CompassPrimary::West) {
            let _ = grid.carve(west);
        }
    }
}
