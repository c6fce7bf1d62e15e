use crate::config::RunnerConfig;
use anyhow::{bail, Context, Result};
use std::path::Path;

pub fn run(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => RunnerConfig::default_path().context("Failed to determine project directories")?,
    };
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    RunnerConfig::default().save_to(&path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
