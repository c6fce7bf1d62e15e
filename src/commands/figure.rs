use crate::figure::write_figure;
use anyhow::Result;
use std::path::Path;

pub fn run(table: &Path, output_prefix: &str) -> Result<()> {
    let (path, rows) = write_figure(table, output_prefix)?;
    println!("Plotted {} positions to {}", rows, path.display());
    Ok(())
}
