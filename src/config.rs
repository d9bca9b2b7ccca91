use error_chain::bail;
use serde_derive::Deserialize;

use crate::generators::Generator;
use crate::grid_dimensions::RectGridDimensions;
use crate::units::{CellSize, ColumnsCount, Height, RowsCount, Width};

use crate::errors::*;

pub const DEFAULT_CANVAS_WIDTH: usize = 800;
pub const DEFAULT_CANVAS_HEIGHT: usize = 600;
pub const DEFAULT_CELL_SIZE: usize = 20;

/// Settings for a game. The grid size comes from tiling the canvas with cells unless rows or
/// columns are given explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: usize,
    pub canvas_height: usize,
    pub cell_size: usize,
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    /// Fixed seed for reproducible mazes. Each retry still draws a new maze from the seeded stream.
    pub seed: Option<u64>,
    pub generator: Generator,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            rows: None,
            columns: None,
            seed: None,
            generator: Generator::default(),
        }
    }
}

impl GameConfig {
    /// Grid rows and columns, checked to be large enough for a maze.
    pub fn dimensions(&self) -> Result<(RowsCount, ColumnsCount)> {
        if self.cell_size == 0 && (self.rows.is_none() || self.columns.is_none()) {
            bail!(ErrorKind::InvalidConfig("cell size must be greater than zero".to_string()));
        }

        let canvas = RectGridDimensions::from_canvas(Width(self.canvas_width),
                                                     Height(self.canvas_height),
                                                     CellSize(self.cell_size));
        let rows = self.rows.map_or(canvas.rows(), RowsCount);
        let columns = self.columns.map_or(canvas.columns(), ColumnsCount);

        if rows.0 < 3 || columns.0 < 3 {
            bail!(ErrorKind::InvalidConfig(format!("a {} x {} grid is too small, need at least 3 x 3",
                                                   rows.0,
                                                   columns.0)));
        }
        Ok((rows, columns))
    }
}
