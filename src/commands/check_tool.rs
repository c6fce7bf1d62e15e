use crate::config::RunnerConfig;
use crate::utils::external_tools::check_tool;
use anyhow::Result;
use std::path::Path;

pub fn run(tool: Option<String>, config: Option<&Path>) -> Result<()> {
    let tool = match tool {
        Some(tool) => tool,
        None => match config {
            Some(path) => RunnerConfig::load_from(path)?.tool,
            None => RunnerConfig::load().tool,
        },
    };
    let path = check_tool(&tool)?;
    println!("{} resolves to {}", tool, path.display());
    Ok(())
}
