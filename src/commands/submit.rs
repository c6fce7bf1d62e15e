use super::run::{build_job, execute, resolve_config};
use crate::cli::RunnerOptions;
use crate::job::JobRequest;
use crate::utils::external_tools::ProcessLauncher;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, IsTerminal};
use std::path::Path;

pub fn run(job_file: &Path, runner: &RunnerOptions) -> Result<i32> {
    let file = File::open(job_file)
        .with_context(|| format!("Failed to open job file {}", job_file.display()))?;
    let request: JobRequest = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse job file {}", job_file.display()))?;

    let job = build_job(
        request.ticket_number,
        request.options,
        request.parameters,
        request.sequence,
        runner,
    )?;
    let basename = job.ticket().to_string();
    let config = resolve_config(runner)?;
    let launcher = ProcessLauncher::new().with_progress(std::io::stderr().is_terminal());
    execute(job, &config, &launcher, runner, &basename)
}
