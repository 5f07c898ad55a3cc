use anyhow::{Context, Result};
use clap::Parser;
use navigare::config::Config;
use navigare::engine::Engine;
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: PathBuf,

    /// Seed for the run; drawn from the OS when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds to simulate.
    #[arg(long, default_value_t = 10)]
    rounds: usize,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let cfg = Config::from_file(&args.config).context("failed to construct cfg")?;
    log::info!("{cfg:#?}");

    let rng = match args.seed {
        Some(seed) => ChaCha12Rng::seed_from_u64(seed),
        None => ChaCha12Rng::try_from_os_rng().context("failed to seed rng from the OS")?,
    };

    let mut engine = Engine::new(cfg, rng).context("failed to construct engine")?;

    let stop = AtomicBool::new(false);
    engine
        .run(args.rounds, &stop, None)
        .context("failed to run simulation")?;

    Ok(())
}
