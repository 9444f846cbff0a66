//! Settings command - print defaults or check a file

use anyhow::{Context, Result};
use inkswarm_core::Settings;
use std::path::Path;

pub fn run(check: Option<&Path>) -> Result<()> {
    let settings = match check {
        Some(path) => {
            let mut settings = Settings::load(path)
                .with_context(|| format!("Failed to load settings {}", path.display()))?;
            let adjusted = settings.sanitize();
            if adjusted.is_empty() {
                eprintln!("{}: all values in range", path.display());
            } else {
                for note in &adjusted {
                    eprintln!("{}: {note}", path.display());
                }
            }
            settings
        }
        None => Settings::default(),
    };

    print!("{}", settings.to_toml_string()?);
    Ok(())
}
