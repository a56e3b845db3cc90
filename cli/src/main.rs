use std::{
    env,
    fs::{self, File},
    io::{self, BufRead},
    path::PathBuf,
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mate_engine::{
    find_checkmate, legal_moves_from, Board, Color, SearchParams, Square, MOVE_GEN,
    POSITION_EVALUATOR,
};
use mimalloc::MiMalloc;
use tracing::{debug, level_filters::LevelFilter, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, prelude::*, util::SubscriberInitExt, Registry};

use mate_cli::{read_listing_file, Session};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search a position for a forced checkmate.
    Search {
        #[command(flatten)]
        source: BoardSource,
        /// Side that tries to deliver mate.
        #[arg(long, default_value_t = SearchParams::default().color)]
        color: Color,
        /// Number of moves the mating side gets.
        #[arg(long, default_value_t = SearchParams::default().plies)]
        plies: u8,
        /// Print every forcing line found.
        #[arg(long)]
        lines: bool,
        /// Only search the best K moves at each node. May miss a mate.
        #[arg(long)]
        breadth: Option<usize>,
        /// Print per-ply search statistics.
        #[arg(long)]
        stats: bool,
    },
    /// List the legal moves of the piece on a square.
    Moves {
        #[command(flatten)]
        source: BoardSource,
        square: String,
    },
    /// Print a position as a piece listing and FEN.
    Show {
        #[command(flatten)]
        source: BoardSource,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct BoardSource {
    /// Piece placement field of a FEN string.
    #[arg(long)]
    fen: Option<String>,
    /// File with one `<square> <color> <pieceType>` line per piece.
    #[arg(long)]
    file: Option<PathBuf>,
}

impl BoardSource {
    fn load(&self) -> Result<Board> {
        match (&self.fen, &self.file) {
            (Some(fen), _) => {
                Board::from_fen(fen).with_context(|| format!("Couldn't parse given fen: `{}`", fen))
            }
            (None, Some(path)) => read_listing_file(path),
            (None, None) => anyhow::bail!("Either --fen or --file is required"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    enable_logging()?;

    match cli.command {
        Some(Commands::Search {
            source,
            color,
            plies,
            lines,
            breadth,
            stats,
        }) => {
            let params = SearchParams {
                color,
                plies,
                record_lines: lines,
                breadth,
            };
            cli_search(&source, &params, stats)
        }
        Some(Commands::Moves { source, square }) => cli_moves(&source, &square),
        Some(Commands::Show { source }) => cli_show(&source),
        None => session_main_loop(),
    }
}

fn cli_search(source: &BoardSource, params: &SearchParams, stats: bool) -> Result<()> {
    let mut board = source.load()?;
    print!("{}", board);

    let outcome = find_checkmate(&mut board, params, MOVE_GEN, POSITION_EVALUATOR)
        .with_context(|| format!("Couldn't search with {}", params))?;
    print!("{}", outcome);
    if stats {
        print!("{}", outcome.stats);
    }
    Ok(())
}

fn cli_moves(source: &BoardSource, square: &str) -> Result<()> {
    let mut board = source.load()?;
    let square =
        Square::from_text(square).with_context(|| format!("Not a square: `{}`", square))?;

    for mve in legal_moves_from(&mut board, square) {
        println!("{}", mve);
    }
    Ok(())
}

fn cli_show(source: &BoardSource) -> Result<()> {
    let board = source.load()?;
    print!("{}", board);
    println!("fen: {}", board.to_fen());
    Ok(())
}

fn session_main_loop() -> Result<()> {
    let mut session = Session::new(io::stdout());

    for line in io::stdin().lock().lines() {
        let line = line.context("Couldn't read command")?;
        if line.trim().is_empty() {
            continue;
        }
        debug!("{}", line);

        if let Err(err) = session.handle_command(&line) {
            warn!("{}", err);
        }
        if session.is_finished() {
            break;
        }
    }
    Ok(())
}

fn enable_logging() -> Result<()> {
    let log_path = if let Ok(log_path_str) = env::var("MATE_LOG_PATH") {
        PathBuf::from_str(&log_path_str)?
    } else {
        let log_path = get_default_log_path()?;
        if let Some(log_path_dir) = log_path.parent() {
            fs::create_dir_all(log_path_dir)?;
        }
        log_path
    };

    let log_file =
        File::create(&log_path).with_context(|| format!("Couldn't create file {:?}", log_path))?;

    let stderr_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_writer(io::stderr)
        .with_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        );

    let log_layer = tracing_subscriber::fmt::layer()
        .with_writer(log_file)
        .with_filter(LevelFilter::from_level(Level::DEBUG));

    Registry::default()
        .with(stderr_layer)
        .with(log_layer)
        .init();

    Ok(())
}

fn get_default_log_path() -> Result<PathBuf> {
    let mut log_path = dirs::home_dir().context("Home directory not set")?;
    log_path.push(".local/state/mate");
    log_path.push("mate.log");
    Ok(log_path)
}
