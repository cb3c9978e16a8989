//! Glint CLI - run particle effects headless and inspect the effect library

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{presets, simulate};

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Headless driver for the Glint 2D particle engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an effect at a fixed frame rate and report what it did
    Simulate {
        /// Effect name from the library
        #[arg(long, conflicts_with = "boost")]
        preset: Option<String>,

        /// Drive a boost trail around a circular track instead of a preset
        #[arg(long)]
        boost: bool,

        /// Simulated duration in seconds
        #[arg(long, default_value = "3.0")]
        seconds: f64,

        /// Frames per simulated second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Quality tier (low, medium, high) or a particle cap
        #[arg(long)]
        quality: Option<String>,

        /// Particle settings TOML file
        #[arg(long)]
        settings: Option<String>,

        /// Effect library TOML file merged over the built-in presets
        #[arg(long)]
        library: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// List the effects available to `simulate --preset`
    Presets {
        /// Effect library TOML file merged over the built-in presets
        #[arg(long)]
        library: Option<String>,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

/// Log level for the number of `-v` flags; `None` leaves RUST_LOG (or `warn`) in charge
fn log_level(verbose: u8) -> Option<log::LevelFilter> {
    match verbose {
        0 => None,
        1 => Some(log::LevelFilter::Info),
        2 => Some(log::LevelFilter::Debug),
        _ => Some(log::LevelFilter::Trace),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = log_level(cli.verbose) {
        logger.filter_level(level);
    }
    logger.init();

    match cli.command {
        Commands::Simulate {
            preset,
            boost,
            seconds,
            fps,
            quality,
            settings,
            library,
            format,
        } => simulate::run(simulate::SimulateArgs {
            preset,
            boost,
            seconds,
            fps,
            quality,
            settings,
            library,
            format,
        }),
        Commands::Presets { library } => presets::run(library.as_deref()),
    }
}
