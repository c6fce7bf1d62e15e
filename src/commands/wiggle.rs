use crate::wiggle::msa_to_wiggle_files;
use anyhow::Result;
use std::path::Path;

pub fn run(msa_file: &Path, seq_id: &str, msa_output: &Path, wig_output: &Path) -> Result<()> {
    let columns = msa_to_wiggle_files(msa_file, seq_id, msa_output, wig_output)?;
    println!(
        "{} columns written to {} and {}",
        columns,
        msa_output.display(),
        wig_output.display()
    );
    Ok(())
}
