//! Mushroom-Path: collect mushrooms along a chess piece's path.
//!
//! ## Usage
//!
//! - `mushroom-path` - Show a demo
//! - `mushroom-path generate --piece knight --length 5` - Print one path
//! - `mushroom-path play` - Play on stdin/stdout
//! - `mushroom-path demo` - Generate one path per piece

use std::time::Duration;

use anyhow::{Context, Result, ensure};
use clap::{Args, Parser, Subcommand};

use mushroom_path::board::Board;
use mushroom_path::console::ConsoleEngine;
use mushroom_path::constants::{BOARD_SIZE, MAX_ATTEMPTS, MAX_STEPS, MUSHROOMS_COUNT};
use mushroom_path::game::Game;
use mushroom_path::generator::{GeneratorConfig, PathGenerator, dump_stats};
use mushroom_path::moves::PieceRule;

/// Mushroom-Path: a chess-move mushroom picking puzzle
#[derive(Parser)]
#[command(name = "mushroom-path")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a single path and print it
    Generate {
        /// Piece whose moves connect the squares
        #[arg(long, default_value = "rook")]
        piece: PieceRule,
        /// Number of squares to collect
        #[arg(long, default_value_t = MUSHROOMS_COUNT)]
        length: usize,
        /// Generate one extra leading square as the mover's start
        #[arg(long)]
        mover: bool,
        /// Print search statistics to stderr
        #[arg(long)]
        verbose: bool,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Play on stdin/stdout using the text protocol
    Play {
        /// Piece for the first game
        #[arg(long, default_value = "rook")]
        piece: PieceRule,
        /// Number of mushrooms per game
        #[arg(long, default_value_t = MUSHROOMS_COUNT)]
        length: usize,
        /// Show the mover on its starting square
        #[arg(long)]
        mover: bool,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Generate and render one path per piece
    Demo {
        /// Random seed
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Random seed (defaults to system entropy)
    #[arg(long)]
    seed: Option<u64>,
    /// Board size (NxN)
    #[arg(long, default_value_t = BOARD_SIZE)]
    board_size: usize,
    /// Random start squares tried before giving up
    #[arg(long, default_value_t = MAX_ATTEMPTS)]
    max_attempts: usize,
    /// Backtracking steps allowed per attempt
    #[arg(long, default_value_t = MAX_STEPS)]
    max_steps: usize,
    /// Give up after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl SearchArgs {
    fn generator(&self) -> Result<PathGenerator> {
        let mut config = GeneratorConfig::default()
            .with_board_size(self.board_size)
            .with_max_attempts(self.max_attempts)
            .with_max_steps(self.max_steps);
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        let generator = match self.seed {
            Some(seed) => PathGenerator::with_seed(seed, config),
            None => PathGenerator::new(config),
        };
        generator.context("invalid generator settings")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Generate {
            piece,
            length,
            mover,
            verbose,
            search,
        }) => run_generate(piece, length, mover, verbose, &search),
        Some(Commands::Play {
            piece,
            length,
            mover,
            search,
        }) => {
            let mut game = Game::new(search.generator()?).with_mover(mover);
            ensure!(
                (1..=game.max_mushrooms()).contains(&length),
                "length must be between 1 and {}",
                game.max_mushrooms()
            );
            game.set_rule(piece);
            game.set_mushrooms(length);
            ConsoleEngine::new(game)
                .run()
                .context("console session failed")
        }
        Some(Commands::Demo { seed }) => run_demo(seed),
        None => run_demo(None),
    }
}

fn run_generate(
    piece: PieceRule,
    length: usize,
    mover: bool,
    verbose: bool,
    search: &SearchArgs,
) -> Result<()> {
    ensure!(length > 0, "length must be at least 1");
    let mut generator = search.generator()?;
    let board = generator.board();
    let target = if mover {
        length
            .checked_add(1)
            .with_context(|| format!("length {length} leaves no square for the mover"))?
    } else {
        length
    };

    let (path, stats) = generator
        .generate_with_stats(piece, target)
        .with_context(|| format!("failed to generate a {piece} path of length {length}"))?;
    if verbose {
        dump_stats(piece, &stats);
    }

    let (start, collectibles) = if mover {
        let split = path
            .split_mover()
            .context("generated path has no mover square")?;
        (Some(split.mover), split.collectibles)
    } else {
        (None, path.into_vec())
    };

    if let Some(sq) = start {
        println!("mover: {}", board.str_coord(sq));
    }
    let coords: Vec<String> = collectibles.iter().map(|&sq| board.str_coord(sq)).collect();
    println!("path: {}", coords.join(" "));
    println!("{}", render_path(&board, start, &collectibles));
    Ok(())
}

/// Number each collectible in order; the mover is shown as `*`.
fn render_path(board: &Board, start: Option<usize>, collectibles: &[usize]) -> String {
    board.render(|sq| {
        if start == Some(sq) {
            return '*';
        }
        match collectibles.iter().position(|&c| c == sq) {
            Some(i) => char::from_digit((i % 36) as u32 + 1, 36).unwrap_or('#'),
            None => '.',
        }
    })
}

fn run_demo(seed: Option<u64>) -> Result<()> {
    println!("Mushroom-Path: chess-move mushroom picking\n");

    let config = GeneratorConfig::default();
    let mut generator = match seed {
        Some(seed) => PathGenerator::with_seed(seed, config),
        None => PathGenerator::new(config),
    }
    .context("invalid generator settings")?;
    let board = generator.board();

    for rule in PieceRule::ALL {
        println!("=== {rule} ===");
        match generator.generate_with_stats(rule, MUSHROOMS_COUNT) {
            Ok((path, stats)) => {
                let coords: Vec<String> = path.iter().map(|&sq| board.str_coord(sq)).collect();
                println!("path: {}", coords.join(" "));
                println!("{}", render_path(&board, None, &path));
                dump_stats(rule, &stats);
            }
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}
