use checkpoint_maze::{
    cells::CompassPrimary,
    config::GameConfig,
    generators::Generator,
    grid_displays::{render_grid, DistancesDisplay, GridDisplay, SessionDisplay},
    pathing::Distances,
    session::{Game, MoveOutcome, Phase},
};
use docopt::Docopt;
use log::{info, warn};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    path::Path,
    time::Duration,
};

const USAGE: &str = "Checkpoint Maze

Usage:
    maze_driver -h | --help
    maze_driver [options]
    maze_driver play [options]

Commands:
    play                   Play in the terminal. Type w/a/s/d (or up/down/left/right) and enter to move,
                           r to start over on a new maze, q to quit.

Options:
    -h --help              Show this screen.
    --rows=<r>             Number of grid rows. Overrides the canvas derived height.
    --cols=<c>             Number of grid columns. Overrides the canvas derived width.
    --canvas-width=<w>     Canvas width in units [default: 800].
    --canvas-height=<h>    Canvas height in units [default: 600].
    --cell-size=<n>        Side length of one grid cell in canvas units [default: 20].
    --seed=<n>             Seed for a reproducible maze.
    --backtracker          Carve with the corner goal backtracker instead of wall extension with checkpoints.
    --show-checkpoints     Mark the start (S), checkpoints (1-5), goal (G) and player (@).
    --show-distances       Show breadth first distances from the start, base 36 wrapping.
                           Replaces the --show-checkpoints markers when both are given.
    --text-out=<path>      Write the rendered maze to a file instead of the terminal.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_play: bool,
    flag_rows: Option<usize>,
    flag_cols: Option<usize>,
    flag_canvas_width: usize,
    flag_canvas_height: usize,
    flag_cell_size: usize,
    flag_seed: Option<u64>,
    flag_backtracker: bool,
    flag_show_checkpoints: bool,
    flag_show_distances: bool,
    flag_text_out: String,
}

impl MazeArgs {
    fn game_config(&self) -> GameConfig {
        GameConfig {
            canvas_width: self.flag_canvas_width,
            canvas_height: self.flag_canvas_height,
            cell_size: self.flag_cell_size,
            rows: self.flag_rows,
            columns: self.flag_cols,
            seed: self.flag_seed,
            generator: if self.flag_backtracker {
                Generator::Backtracker
            } else {
                Generator::WallExtension
            },
        }
    }
}

// The driver's errors link in the library's error chain so `?` works on both.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::checkpoint_maze::errors::Error, ::checkpoint_maze::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

enum Command {
    Move(CompassPrimary),
    Retry,
    Quit,
}

fn main() -> Result<()> {

    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    let config = args.game_config();
    let game = Game::new(config).chain_err(|| "Failed to set up the maze")?;
    info!("{} x {} maze with {} reachable cells",
          game.session().grid().rows().0,
          game.session().grid().columns().0,
          game.session().traversal_len());

    if args.cmd_play {
        play(game)
    } else {
        let text = render_maze(&game, &args)?;
        if args.flag_text_out.is_empty() {
            print!("{}", text);
            Ok(())
        } else {
            write_text_to_file(&text, &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))
        }
    }
}

fn render_maze(game: &Game, args: &MazeArgs) -> Result<String> {
    let session = game.session();

    if args.flag_show_distances {
        if args.flag_show_checkpoints {
            warn!("--show-distances replaces the checkpoint markers");
        }
        let distances = Distances::for_grid(session.grid(), session.start())?;
        let display = DistancesDisplay::new(&distances);
        return Ok(render_grid(session.grid(), Some(&display as &dyn GridDisplay)));
    }

    if args.flag_show_checkpoints {
        let display = SessionDisplay::new(session);
        Ok(render_grid(session.grid(), Some(&display as &dyn GridDisplay)))
    } else {
        Ok(render_grid(session.grid(), None))
    }
}

fn play(mut game: Game) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    game.begin();
    show_session(&mut stdout, &game)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match parse_command(line.trim()) {
            Some(command) => command,
            None => {
                writeln!(stdout, "w/a/s/d to move, r to retry, q to quit")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Retry => {
                game.retry()?;
                game.begin();
            }
            Command::Move(dir) => {
                match game.try_move(dir) {
                    MoveOutcome::Blocked => writeln!(stdout, "That way is blocked.")?,
                    MoveOutcome::CheckpointReached(i) => {
                        writeln!(stdout, "Checkpoint {} collected.", i + 1)?
                    }
                    MoveOutcome::GoalReached(time) => {
                        writeln!(stdout, "Goal! TIME: {}", format_time(time))?;
                        if let Some(best) = game.best_time() {
                            writeln!(stdout, "BEST: {}", format_time(best))?;
                        }
                        writeln!(stdout, "r to play again, q to quit")?;
                    }
                    MoveOutcome::Ignored | MoveOutcome::Moved => {}
                }
            }
        }

        show_session(&mut stdout, &game)?;
    }

    Ok(())
}

fn show_session<W: Write>(out: &mut W, game: &Game) -> Result<()> {
    let session = game.session();
    let display = SessionDisplay::new(session);
    write!(out, "{}", render_grid(session.grid(), Some(&display as &dyn GridDisplay)))?;

    if session.phase() == Phase::Playing {
        let time = session.elapsed().unwrap_or_default();
        writeln!(out,
                 "TIME: {}  checkpoints {}/{}",
                 format_time(time),
                 session.collected(),
                 session.checkpoints().len())?;
    }
    out.flush()?;
    Ok(())
}

fn parse_command(input: &str) -> Option<Command> {
    match input.to_lowercase().as_str() {
        "w" | "up" => Some(Command::Move(CompassPrimary::North)),
        "s" | "down" => Some(Command::Move(CompassPrimary::South)),
        "a" | "left" => Some(Command::Move(CompassPrimary::West)),
        "d" | "right" => Some(Command::Move(CompassPrimary::East)),
        "r" | "retry" => Some(Command::Retry),
        "q" | "quit" => Some(Command::Quit),
        _ => None,
    }
}

fn format_time(time: Duration) -> String {
    format!("{:.1}s", time.as_secs_f64())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let path = Path::new(file_name);
    let mut file = File::create(&path)?;
    file.write_all(data.as_bytes())?;
    Ok(())
}
