//! Inkswarm CLI - text-to-particle swarm from the command line

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{play, render, settings, targets, InputArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inkswarm")]
#[command(about = "Particles that swarm into the shape of your text", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive player window
    Play {
        #[command(flatten)]
        input: InputArgs,

        /// Reload the settings and text files when they change
        #[arg(long)]
        watch: bool,

        /// Launch in fullscreen mode
        #[arg(long)]
        fullscreen: bool,
    },

    /// Run the simulation headless and write frames as PNG
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Output image path
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,

        /// Viewport width in logical pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Viewport height in logical pixels
        #[arg(long, default_value = "400")]
        height: u32,

        /// Device pixel ratio
        #[arg(long, default_value = "1.0")]
        dpr: f32,

        /// Number of ticks to simulate
        #[arg(long, default_value = "300")]
        ticks: u32,

        /// Write every N-th frame as a numbered PNG instead of only the last
        #[arg(long)]
        every: Option<u32>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Extract targets from text and report them
    Targets {
        #[command(flatten)]
        input: InputArgs,

        /// Extraction surface width in pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Extraction surface height in pixels
        #[arg(long, default_value = "400")]
        height: u32,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Also write the rasterized alpha mask as PNG
        #[arg(long)]
        mask: Option<PathBuf>,
    },

    /// Print default settings as TOML, or check a settings file
    Settings {
        /// Settings file to validate and print normalized
        #[arg(long)]
        check: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Play {
            input,
            watch,
            fullscreen,
        } => play::run(play::PlayArgs {
            input,
            watch,
            fullscreen,
        }),
        Commands::Render {
            input,
            output,
            width,
            height,
            dpr,
            ticks,
            every,
            seed,
        } => render::run(render::RenderArgs {
            input,
            output,
            width,
            height,
            dpr,
            ticks,
            every,
            seed,
        }),
        Commands::Targets {
            input,
            width,
            height,
            format,
            mask,
        } => targets::run(targets::TargetsArgs {
            input,
            width,
            height,
            format,
            mask,
        }),
        Commands::Settings { check } => settings::run(check.as_deref()),
    }
}
