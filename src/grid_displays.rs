use fnv::FnvHashSet;
use std::fmt;

use crate::cells::GridCoordinate;
use crate::grid::Grid;
use crate::pathing::Distances;
use crate::session::GameSession;

pub const WALL_GLYPH: char = '#';
pub const OPEN_GLYPH: char = ' ';

/// Overlays markers on the plain text rendering of a grid.
pub trait GridDisplay {
    /// The character to show for a cell, None to show the plain wall or open glyph.
    fn render_cell(&self, _: GridCoordinate) -> Option<char> {
        None
    }
}

/// Render one character per cell, one line per row, with an optional overlay.
pub fn render_grid(grid: &Grid, overlay: Option<&dyn GridDisplay>) -> String {
    let columns = grid.columns().0;
    let mut output = String::with_capacity(grid.size() + grid.rows().0);

    for (index, coord) in grid.iter().enumerate() {
        let glyph = overlay.and_then(|display| display.render_cell(coord))
            .unwrap_or_else(|| if grid.is_open(coord) { OPEN_GLYPH } else { WALL_GLYPH });
        output.push(glyph);
        if (index + 1) % columns == 0 {
            output.push('\n');
        }
    }
    output
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_grid(self, None))
    }
}


/// Marks the player `@`, the start `S`, uncollected checkpoints `1` to `9` and the goal `G`.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> SessionDisplay<'a> {
        SessionDisplay { session }
    }
}

impl<'a> GridDisplay for SessionDisplay<'a> {
    fn render_cell(&self, coord: GridCoordinate) -> Option<char> {
        let session = self.session;
        if coord == session.player() {
            return Some('@');
        }

        let uncollected = session.checkpoints()
            .position_of(coord)
            .filter(|&i| i >= session.collected());
        if let Some(i) = uncollected {
            return std::char::from_digit(i as u32 + 1, 10);
        }

        if coord == session.goal() {
            Some('G')
        } else if coord == session.start() {
            Some('S')
        } else {
            None
        }
    }
}


/// Shows the distance from the start on each reachable cell, base 36 wrapping around.
#[derive(Debug)]
pub struct DistancesDisplay<'a> {
    distances: &'a Distances,
}

impl<'a> DistancesDisplay<'a> {
    pub fn new(distances: &'a Distances) -> DistancesDisplay<'a> {
        DistancesDisplay { distances }
    }
}

impl<'a> GridDisplay for DistancesDisplay<'a> {
    fn render_cell(&self, coord: GridCoordinate) -> Option<char> {
        self.distances
            .distance_from_start_to(coord)
            .and_then(|d| std::char::from_digit(d % 36, 36))
    }
}


/// Marks cells on a path with `.`.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell(&self, coord: GridCoordinate) -> Option<char> {
        if self.on_path_coordinates.contains(&coord) {
            Some('.')
        } else {
            None
        }
    }
}
