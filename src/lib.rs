//! **checkpoint_maze** generates wall extension mazes, finds the breadth first order through them,
//! places checkpoints along that order and runs the game of collecting them in sequence.

pub mod cells;
pub mod checkpoints;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod pathing;
pub mod session;
pub mod units;
