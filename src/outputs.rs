//! Collection of a finished job's result files.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Result files kept from a job directory, as (produced name, collected suffix).
/// Logs and the zip archive the tool also writes are left in place.
pub const COLLECTED_OUTPUTS: &[(&str, &str)] = &[
    ("output.aln", "aln"),
    ("output.afa", "afa"),
    ("cons.fasta", "cons.fasta"),
    ("foma.table", "foma.tsv"),
];

/// File name of `path` without its final extension.
pub fn basename_for(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[..idx].to_string(),
        _ => name,
    }
}

fn collected_path(dest_dir: &Path, basename: &str, suffix: &str) -> PathBuf {
    dest_dir.join(format!("{}.{}", basename, suffix))
}

fn is_taken(dest_dir: &Path, basename: &str) -> bool {
    COLLECTED_OUTPUTS
        .iter()
        .any(|(_, suffix)| collected_path(dest_dir, basename, suffix).exists())
}

/// `basename`, or `basename_2`, `basename_3`, ... so that no earlier
/// collection in `dest_dir` is overwritten.
pub fn unique_basename(dest_dir: &Path, basename: &str) -> String {
    if !is_taken(dest_dir, basename) {
        return basename.to_string();
    }
    (2..)
        .map(|n| format!("{}_{}", basename, n))
        .find(|candidate| !is_taken(dest_dir, candidate))
        .unwrap_or_else(|| basename.to_string())
}

/// Moves the job's result files into `dest_dir` under `basename`, returning the
/// new paths in [`COLLECTED_OUTPUTS`] order.
pub fn collect_outputs(job_dir: &Path, dest_dir: &Path, basename: &str) -> Result<Vec<PathBuf>> {
    let missing: Vec<&str> = COLLECTED_OUTPUTS
        .iter()
        .map(|(name, _)| *name)
        .filter(|name| !job_dir.join(name).exists())
        .collect();
    if !missing.is_empty() {
        bail!(
            "Job directory {} is missing expected output(s): {}",
            job_dir.display(),
            missing.join(", ")
        );
    }

    fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create output directory {}", dest_dir.display()))?;

    let mut collected = Vec::with_capacity(COLLECTED_OUTPUTS.len());
    for (name, suffix) in COLLECTED_OUTPUTS {
        let from = job_dir.join(name);
        let to = collected_path(dest_dir, basename, suffix);
        move_file(&from, &to)?;
        collected.push(to);
    }
    info!("Collected {} outputs from {} as {}", collected.len(), job_dir.display(), basename);
    Ok(collected)
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    // rename fails across filesystems
    fs::copy(from, to)
        .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))?;
    fs::remove_file(from).with_context(|| format!("Failed to remove {}", from.display()))?;
    Ok(())
}
