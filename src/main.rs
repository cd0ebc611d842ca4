//! Headless self-play runner (default binary).
//!
//! Loads settings, lets the automated player drive the board tick by tick, and prints a
//! summary when the game ends or a limit is reached. Nothing is rendered; `--dump-every`
//! logs the grid as text.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use serde::Serialize;

use autotris::core::{Grid, Settings};
use autotris::engine::Autoplayer;
use autotris::logger;

#[derive(Parser, Debug)]
#[command(name = "autotris", about = "Self-play for the look-ahead falling-block player")]
struct Args {
    /// Settings file (JSON; missing fields take their defaults)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u32>,

    /// Stop after this many locked pieces
    #[arg(long, default_value_t = 500)]
    max_pieces: u64,

    /// Stop after this many ticks
    #[arg(long, default_value_t = 1_000_000)]
    max_ticks: u64,

    /// Run look-ahead on the thread pool
    #[arg(long)]
    parallel: bool,

    /// off | error | warn | info | debug | trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Pace ticks at the configured framerate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Log the grid every N locked pieces (0 = never)
    #[arg(long, default_value_t = 0)]
    dump_every: u64,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_settings: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct Summary {
    pieces_locked: u64,
    lines_cleared: u32,
    ticks: u64,
    game_over: bool,
    elapsed_ms: u128,
    grid: Vec<String>,
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if args.parallel {
        settings.ai_parallel = true;
    }
    settings.ai_enabled = true;
    Ok(settings.clamped())
}

fn tick_interval(settings: &Settings) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(settings.framerate.max(1)))
}

fn dump(grid: &Grid) -> String {
    grid.to_ascii().join("\n")
}

fn main() -> Result<()> {
    let args = Args::parse();

    logger::init_console(args.log_level).context("initializing logger")?;

    let settings = load_settings(&args)?;
    if args.print_settings {
        println!("{}", settings.to_json_pretty()?);
        return Ok(());
    }

    info!(
        "starting {}x{} board, seed {}, ai_delay {}, parallel {}",
        settings.cols, settings.rows, settings.seed, settings.ai_delay, settings.ai_parallel
    );

    let interval = args.realtime.then(|| tick_interval(&settings));
    let started = Instant::now();
    let mut player = Autoplayer::new(settings);
    let mut ticks: u64 = 0;
    let mut last_serial = 0;

    while ticks < args.max_ticks
        && !player.board().game_over()
        && player.board().lock_serial() < args.max_pieces
    {
        player
            .tick()
            .with_context(|| format!("tick {} failed", ticks))?;
        ticks += 1;
        if let Some(interval) = interval {
            thread::sleep(interval);
        }

        let serial = player.board().lock_serial();
        if serial != last_serial {
            last_serial = serial;
            if args.dump_every > 0 && serial % args.dump_every == 0 {
                info!("after {} pieces:\n{}", serial, dump(player.board().grid()));
            }
        }
    }

    let board = player.board();
    let elapsed = started.elapsed();
    if args.json {
        let summary = Summary {
            pieces_locked: board.lock_serial(),
            lines_cleared: board.lines_cleared(),
            ticks,
            game_over: board.game_over(),
            elapsed_ms: elapsed.as_millis(),
            grid: board.grid().to_ascii(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    println!("pieces locked : {}", board.lock_serial());
    println!("lines cleared : {}", board.lines_cleared());
    println!("ticks         : {}", ticks);
    println!("game over     : {}", board.game_over());
    println!("elapsed       : {:.2?}", elapsed);
    if board.game_over() {
        println!("{}", dump(board.grid()));
    }
    Ok(())
}
