//! Game state for one maze: where the player is, which checkpoints have been collected and
//! whether the goal has been reached.
//!
//! A `GameSession` owns everything about a single maze. Starting over never edits a session in
//! place, `Game::retry` builds a new one and drops the old.

use std::time::{Duration, Instant};

use log::{info, trace};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::checkpoints::{sample_checkpoints, CheckpointSet};
use crate::config::GameConfig;
use crate::errors::*;
use crate::generators::Generator;
use crate::grid::Grid;
use crate::pathing::bfs_order;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// Maze is shown, moves are ignored until the game is started.
    Ready,
    Playing,
    Finished,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MoveOutcome {
    /// The session is not accepting moves.
    Ignored,
    /// Destination is a wall or off the grid. Nothing changed.
    Blocked,
    Moved,
    /// Collected the checkpoint with this index.
    CheckpointReached(usize),
    /// Reached the goal with every checkpoint collected, after this long.
    GoalReached(Duration),
}

#[derive(Debug, Clone)]
pub struct GameSession {
    grid: Grid,
    start: GridCoordinate,
    traversal_len: usize,
    checkpoints: CheckpointSet,
    player: GridCoordinate,
    collected: usize,
    phase: Phase,
    started_at: Option<Instant>,
    finish_time: Option<Duration>,
}

impl GameSession {
    /// Generate a maze for the config and lay out the session on it.
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<GameSession> {
        let (rows, columns) = config.dimensions()?;
        let grid = config.generator.generate(rows, columns, rng)?;
        GameSession::from_grid(grid, config.generator)
    }

    /// Lay out a session on an existing grid.
    ///
    /// Wall extension mazes get checkpoints sampled from the breadth first order from (1, 1).
    /// Backtracker mazes have no checkpoints and the goal in the bottom right corner.
    pub fn from_grid(grid: Grid, generator: Generator) -> Result<GameSession> {
        let start = generator.start();
        let order = bfs_order(&grid, start)
            .chain_err(|| "the maze start is not an open cell")?;

        let checkpoints = match generator {
            Generator::WallExtension => sample_checkpoints(&order)?,
            Generator::Backtracker => {
                let corner = grid.dimensions()
                    .last_coordinate()
                    .ok_or_else(|| Error::from(ErrorKind::InvalidDimensions(0, 0)))?;
                CheckpointSet::goal_only(corner)
            }
        };

        Ok(GameSession {
            grid,
            start,
            traversal_len: order.len(),
            checkpoints,
            player: start,
            collected: 0,
            phase: Phase::Ready,
            started_at: None,
            finish_time: None,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.start
    }

    /// Number of open cells reachable from the start.
    #[inline]
    pub fn traversal_len(&self) -> usize {
        self.traversal_len
    }

    #[inline]
    pub fn checkpoints(&self) -> &CheckpointSet {
        &self.checkpoints
    }

    #[inline]
    pub fn goal(&self) -> GridCoordinate {
        self.checkpoints.goal()
    }

    #[inline]
    pub fn player(&self) -> GridCoordinate {
        self.player
    }

    /// How many checkpoints have been collected, in order.
    #[inline]
    pub fn collected(&self) -> usize {
        self.collected
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// The next checkpoint to collect, None once all are collected.
    #[inline]
    pub fn next_checkpoint(&self) -> Option<GridCoordinate> {
        self.checkpoints.next_after(self.collected)
    }

    /// Time since the first move command, or the finishing time once the goal is reached.
    pub fn elapsed(&self) -> Option<Duration> {
        self.finish_time.or_else(|| self.started_at.map(|at| at.elapsed()))
    }

    /// Leave the ready phase. Returns false if the session was already started.
    pub fn begin(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.phase = Phase::Playing;
        info!("game started with {} checkpoints", self.checkpoints.len());
        true
    }

    /// Try to move the player one cell. Moves onto walls or off the grid are rejected without
    /// any change.
    pub fn try_move(&mut self, direction: CompassPrimary) -> MoveOutcome {
        if self.phase != Phase::Playing {
            return MoveOutcome::Ignored;
        }
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }

        let destination = match self.grid.neighbour_at_direction(self.player, direction) {
            Some(coord) if self.grid.is_open(coord) => coord,
            _ => {
                trace!("blocked moving {:?} from {}", direction, self.player);
                return MoveOutcome::Blocked;
            }
        };
        self.player = destination;
        trace!("moved {:?} to {}", direction, destination);

        let mut outcome = MoveOutcome::Moved;
        if self.next_checkpoint() == Some(destination) {
            outcome = MoveOutcome::CheckpointReached(self.collected);
            self.collected += 1;
            info!("checkpoint {} of {} reached", self.collected, self.checkpoints.len());
        }

        if destination == self.goal() && self.collected == self.checkpoints.len() {
            let time = self.started_at.map_or(Duration::from_secs(0), |at| at.elapsed());
            self.finish_time = Some(time);
            self.phase = Phase::Finished;
            info!("goal reached in {:.1}s", time.as_secs_f64());
            outcome = MoveOutcome::GoalReached(time);
        }

        outcome
    }
}


/// A run of sessions sharing a config, a random stream and the best finishing time.
#[derive(Debug)]
pub struct Game<R: Rng = XorShiftRng> {
    config: GameConfig,
    rng: R,
    session: GameSession,
    best_time: Option<Duration>,
}

impl Game<XorShiftRng> {
    /// Seeded from the config seed if there is one, otherwise from system entropy.
    pub fn new(config: GameConfig) -> Result<Game<XorShiftRng>> {
        let rng = match config.seed {
            Some(seed) => XorShiftRng::seed_from_u64(seed),
            None => XorShiftRng::from_entropy(),
        };
        Game::with_rng(config, rng)
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Game<R>> {
        let session = GameSession::new(&config, &mut rng)?;
        Ok(Game {
            config,
            rng,
            session,
            best_time: None,
        })
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[inline]
    pub fn best_time(&self) -> Option<Duration> {
        self.best_time
    }

    pub fn begin(&mut self) -> bool {
        self.session.begin()
    }

    pub fn try_move(&mut self, direction: CompassPrimary) -> MoveOutcome {
        let outcome = self.session.try_move(direction);
        if let MoveOutcome::GoalReached(time) = outcome {
            if self.best_time.map_or(true, |best| time < best) {
                self.best_time = Some(time);
            }
        }
        outcome
    }

    /// Throw away the current session and start over on a new maze. The best time is kept.
    pub fn retry(&mut self) -> Result<()> {
        self.session = GameSession::new(&self.config, &mut self.rng)?;
        info!("new maze with {} reachable cells", self.session.traversal_len());
        Ok(())
    }
}
