//! Inkswarm Player - standalone window binary
//!
//! Usage:
//!   inkswarm-player [TEXT] [--settings <file>] [--text-file <file>] [--watch] [--fullscreen]

use anyhow::{Context, Result};
use clap::Parser;
use inkswarm_core::Settings;
use inkswarm_player::{load_settings, PlayerOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inkswarm-player")]
#[command(about = "Inkswarm player - type text and watch particles form it")]
struct Args {
    /// Initial text (use \n in a quoted argument for several lines)
    text: Option<String>,

    /// Settings TOML file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Read the initial text from a file
    #[arg(long, conflicts_with = "text")]
    text_file: Option<PathBuf>,

    /// Additional font directory (repeatable)
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Reload the settings and text files when they change
    #[arg(long)]
    watch: bool,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("Failed to load settings {}", path.display()))?,
        None => Settings::default(),
    };

    println!("Controls:");
    println!("  Type      - Edit text");
    println!("  Enter     - New line");
    println!("  Backspace - Delete last character");
    println!("  F5        - Reload settings file");
    println!("  Escape    - Exit");

    inkswarm_player::run(PlayerOptions {
        settings,
        settings_path: args.settings,
        text: args.text.map(|t| t.replace("\\n", "\n")),
        text_path: args.text_file,
        font_dirs: args.font_dirs,
        fullscreen: args.fullscreen,
        watch: args.watch,
    })
}
