//! rf-cluster-sim command line
//!
//! Usage:
//!   rf-cluster-sim spin --seed 42          - One spin, JSON to stdout
//!   rf-cluster-sim rtp --spins 1000000     - Estimate RTP
//!   rf-cluster-sim session --award 10      - Play one free-spin session
//!   rf-cluster-sim buy --start 5           - Price a feature buy
//!   rf-cluster-sim config                  - Print the effective config

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use rf_cluster_lab::{
    SessionState, SimConfig, SimConfigArgs, SpinMode, build_sim_config, simulate_spin,
};
use rf_cluster_sim::{BuyOptions, RtpOptions, estimate_rtp, price_feature_buy, run_session};

#[derive(Parser)]
#[command(name = "rf-cluster-sim", about = "Cluster-pays tumble engine simulator")]
struct Cli {
    /// Config file (.json, .yaml or .yml); engine defaults when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Grid width override
    #[arg(long, global = true)]
    cols: Option<usize>,

    /// Grid height override
    #[arg(long, global = true)]
    rows: Option<usize>,

    /// Free-spin total cap override
    #[arg(long = "fs-cap", global = true)]
    fs_cap: Option<u32>,

    /// Base-game payout calibration
    #[arg(long = "rtp-base", global = true)]
    rtp_base: Option<f64>,

    /// Free-spins payout calibration
    #[arg(long = "rtp-fs", global = true)]
    rtp_fs: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Base,
    FreeSpins,
}

impl From<Mode> for SpinMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Base => SpinMode::Base,
            Mode::FreeSpins => SpinMode::FreeSpins,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Play one spin
    Spin {
        #[arg(short, long, value_enum, default_value = "base")]
        mode: Mode,
        /// Seed; a fresh one is drawn and reported when omitted
        #[arg(short, long)]
        seed: Option<u64>,
        /// Free spins left before this spin (free-spins mode)
        #[arg(long, default_value_t = 0)]
        fs_remaining: u32,
        /// Carried ladder index (free-spins mode)
        #[arg(long, default_value_t = 0)]
        ladder_index: u32,
    },
    /// Estimate return-to-player
    Rtp {
        #[arg(short = 'n', long, default_value_t = 100_000)]
        spins: u64,
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
        /// Worker threads (defaults to one per CPU)
        #[arg(short, long)]
        threads: Option<usize>,
    },
    /// Play one free-spin session to completion
    Session {
        /// Free spins awarded at entry
        #[arg(short, long, default_value_t = 10)]
        award: u32,
        #[arg(long, default_value_t = 0)]
        ladder_index: u32,
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
    },
    /// Price a feature buy
    Buy {
        /// Ladder multiplier the bought session starts on
        #[arg(long = "start", default_value_t = 1.0)]
        start_multiplier: f64,
        #[arg(short = 'n', long, default_value_t = 10_000)]
        sessions: u64,
        #[arg(short, long, default_value_t = 1)]
        seed: u64,
        #[arg(short, long)]
        threads: Option<usize>,
    },
    /// Print the effective config as JSON
    Config,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = effective_config(&cli)?;

    match cli.command {
        Commands::Spin {
            mode,
            seed,
            fs_remaining,
            ladder_index,
        } => {
            let result = simulate_spin(&config, mode.into(), fs_remaining, ladder_index, seed)?;
            print_json(&result)
        }
        Commands::Rtp {
            spins,
            seed,
            threads,
        } => {
            let report = estimate_rtp(
                &config,
                &RtpOptions {
                    spins,
                    seed,
                    threads,
                },
            )?;
            print_json(&report)
        }
        Commands::Session {
            award,
            ladder_index,
            seed,
        } => {
            let state = SessionState::starting_at(&config, award, ladder_index);
            let summary = run_session(&config, state, seed)?;
            print_json(&summary)
        }
        Commands::Buy {
            start_multiplier,
            sessions,
            seed,
            threads,
        } => {
            let report = price_feature_buy(
                &config,
                &BuyOptions {
                    start_multiplier,
                    sessions,
                    seed,
                    threads,
                },
            )?;
            print_json(&report)
        }
        Commands::Config => {
            println!("{}", config.to_json());
            Ok(())
        }
    }
}

/// Config file (or defaults) with command-line overrides applied
fn effective_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => build_sim_config(SimConfigArgs::default()),
    };

    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(cap) = cli.fs_cap {
        config.fs_total_cap = cap;
    }
    let base = cli.rtp_base.unwrap_or(config.rtp_scale.base);
    let free_spins = cli.rtp_fs.unwrap_or(config.rtp_scale.free_spins);
    config.set_rtp_scale(base, free_spins);

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
