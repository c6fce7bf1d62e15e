use crate::alphabet;
use crate::cli::RunnerOptions;
use crate::config::RunnerConfig;
use crate::job::{Job, JobOutcome, ToolLauncher};
use crate::outputs;
use crate::utils::external_tools::ProcessLauncher;
use anyhow::{Context, Result};
use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use tracing::info;

/// Config from file/defaults with the command line overrides applied.
pub fn resolve_config(runner: &RunnerOptions) -> Result<RunnerConfig> {
    let mut config = match &runner.config {
        Some(path) => RunnerConfig::load_from(path)?,
        None => RunnerConfig::load(),
    };
    if let Some(root) = &runner.root {
        config.analysis_root = root.clone();
    }
    if let Some(tool) = &runner.tool {
        config.tool = tool.clone();
    }
    if let Some(flag_match) = runner.flag_match {
        config.flag_match = flag_match;
    }
    Ok(config)
}

pub fn run(
    ticket: String,
    options: String,
    sequence_file: &Path,
    parameters_file: &Path,
    runner: &RunnerOptions,
) -> Result<i32> {
    let sequence = fs::read_to_string(sequence_file)
        .with_context(|| format!("Failed to read sequence file {}", sequence_file.display()))?;
    let parameters = fs::read_to_string(parameters_file)
        .with_context(|| format!("Failed to read parameters file {}", parameters_file.display()))?;

    let job = build_job(ticket, options, parameters, sequence, runner)?;
    let config = resolve_config(runner)?;
    let launcher = ProcessLauncher::new().with_progress(std::io::stderr().is_terminal());
    execute(job, &config, &launcher, runner, &outputs::basename_for(sequence_file))
}

pub(crate) fn build_job(
    ticket: String,
    options: String,
    parameters: String,
    sequence: String,
    runner: &RunnerOptions,
) -> Result<Job> {
    let options = if runner.detect_alphabet {
        alphabet::with_nucleotide_flag(&options, &sequence)
    } else {
        options
    };
    Ok(Job::new(ticket, options, parameters, sequence)?)
}

/// Runs `job` and, when requested and the tool succeeded, collects its
/// outputs. Returns the exit code to report.
pub(crate) fn execute(
    job: Job,
    config: &RunnerConfig,
    launcher: &dyn ToolLauncher,
    runner: &RunnerOptions,
    basename: &str,
) -> Result<i32> {
    fs::create_dir_all(&config.analysis_root).with_context(|| {
        format!("Failed to create analysis root {}", config.analysis_root.display())
    })?;
    let outcome = job.run(config, launcher)?;
    if outcome.status.success() {
        if let Some(dest) = &runner.collect {
            collect(&outcome, dest, basename)?;
        }
    }
    Ok(exit_code(&outcome))
}

fn collect(outcome: &JobOutcome, dest: &Path, basename: &str) -> Result<()> {
    let basename = outputs::unique_basename(dest, basename);
    let collected = outputs::collect_outputs(&outcome.job_dir, dest, &basename)?;
    for path in collected {
        info!("Wrote {}", path.display());
    }
    Ok(())
}

fn exit_code(outcome: &JobOutcome) -> i32 {
    match outcome.status.code {
        Some(code) => code,
        None => 1,
    }
}
