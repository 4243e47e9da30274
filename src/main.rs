use std::io::stdout;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};

use tile48::engine::{Difficulty, Session};

mod app;
mod store;
mod tui;

use app::App;
use store::Store;
use tui::crossterm::{Crossterm, CrosstermEvents};

/// Slide tiles, merge equal neighbours and reach 2048.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Starting difficulty: easy, medium, hard or very-hard.
    #[arg(short, long, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// File holding aggregate stats and the theme preference.
    #[arg(long, default_value = "./tile48.json")]
    store: PathBuf,

    /// File that log output is written to.
    #[arg(long, default_value = "./tile48.log")]
    log_file: PathBuf,

    /// Seed for a reproducible sequence of spawned tiles.
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn setup_logging(path: &Path, level: log::LevelFilter) -> tile48::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(level)
        .chain(fern::log_file(path)?)
        .apply()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_file, cli.verbose.log_level_filter())?;

    let store = Store::open(&cli.store)?;
    let session = match cli.seed {
        Some(seed) => {
            log::info!("seeding spawns with {}", seed);
            Session::new(StdRng::seed_from_u64(seed), cli.difficulty, store.stats())
        }
        None => Session::new(thread_rng(), cli.difficulty, store.stats()),
    };

    let w = stdout().lock();
    let renderer = Crossterm::new(Box::new(w))?;
    let event_source = CrosstermEvents::default();
    let app = App::new(session, store, renderer, event_source);

    app.run()?;

    Ok(())
}
