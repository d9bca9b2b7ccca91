// Create the Error, ErrorKind, ResultExt, and Result types.
// Other modules `use crate::errors::*;` to get access to everything `error_chain!` creates.
use crate::cells::GridCoordinate;
use error_chain::*;

error_chain! {

    errors {
        InvalidDimensions(rows: usize, columns: usize) {
            description("maze grid dimensions are too small")
            display("a {} x {} grid is too small for a maze, need at least 3 rows and 3 columns",
                    rows, columns)
        }
        InvalidStart(coord: GridCoordinate) {
            description("start coordinate is not an open cell on the grid")
            display("start coordinate {} is out of bounds or a wall", coord)
        }
        EmptyTraversal {
            description("cannot sample checkpoints from an empty traversal order")
            display("cannot sample checkpoints from an empty traversal order")
        }
        InvalidConfig(reason: String) {
            description("invalid game configuration")
            display("invalid game configuration: {}", reason)
        }
        MalformedGrid(reason: String) {
            description("malformed grid text")
            display("malformed grid text: {}", reason)
        }
    }
}
