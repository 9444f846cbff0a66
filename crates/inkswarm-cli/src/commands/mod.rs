//! CLI command implementations

pub mod play;
pub mod render;
pub mod settings;
pub mod targets;

use anyhow::{Context, Result};
use clap::Args;
use inkswarm_core::Settings;
use inkswarm_player::{load_settings, DEFAULT_TEXT};
use std::path::PathBuf;

/// Text, settings and font options shared by every command that draws text
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Text to draw (a literal \n starts a new line)
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with = "text")]
    pub text_file: Option<PathBuf>,

    /// Settings TOML file
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Additional font directory (repeatable)
    #[arg(long = "font-dir")]
    pub font_dirs: Vec<PathBuf>,
}

impl InputArgs {
    pub fn load_settings(&self) -> Result<Settings> {
        match &self.settings {
            Some(path) => load_settings(path)
                .with_context(|| format!("Failed to load settings {}", path.display())),
            None => Ok(Settings::default()),
        }
    }

    /// Inline text (with `\n` escapes expanded)
    pub fn inline_text(&self) -> Option<String> {
        self.text.as_ref().map(|t| t.replace("\\n", "\n"))
    }

    pub fn load_text(&self) -> Result<String> {
        if let Some(text) = self.inline_text() {
            return Ok(text);
        }
        match &self.text_file {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read text file {}", path.display())),
            None => Ok(DEFAULT_TEXT.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(text: Option<&str>) -> InputArgs {
        InputArgs {
            text: text.map(str::to_string),
            text_file: None,
            settings: None,
            font_dirs: Vec::new(),
        }
    }

    #[test]
    fn escaped_newlines_are_expanded() {
        assert_eq!(args(Some("a\\nb")).load_text().unwrap(), "a\nb");
    }

    #[test]
    fn missing_text_uses_default() {
        assert_eq!(args(None).load_text().unwrap(), DEFAULT_TEXT);
        assert_eq!(args(None).load_settings().unwrap(), Settings::default());
    }
}
