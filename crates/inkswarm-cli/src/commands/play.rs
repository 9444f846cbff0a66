//! Play command - opens the interactive player

use super::InputArgs;
use anyhow::Result;
use inkswarm_player::PlayerOptions;

pub struct PlayArgs {
    pub input: InputArgs,
    pub watch: bool,
    pub fullscreen: bool,
}

pub fn run(args: PlayArgs) -> Result<()> {
    let settings = args.input.load_settings()?;

    println!("Controls:");
    println!("  Type      - Edit text");
    println!("  Enter     - New line");
    println!("  Backspace - Delete last character");
    println!("  F5        - Reload settings file");
    println!("  Escape    - Exit");

    inkswarm_player::run(PlayerOptions {
        settings,
        text: args.input.inline_text(),
        settings_path: args.input.settings,
        text_path: args.input.text_file,
        font_dirs: args.input.font_dirs,
        fullscreen: args.fullscreen,
        watch: args.watch,
    })
}
