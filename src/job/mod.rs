//! Preparation and launch of a single SNP analysis job.
//!
//! A job owns a working directory `<root>/<ticket>`. Running it writes the
//! sequence and parameter files there and hands the directory to the external
//! analysis tool together with the caller's option string.

mod invocation;
mod ticket;

pub use invocation::{ToolInvocation, ToolLauncher, ToolStatus};
pub use ticket::{JobError, TicketNumber};

use crate::config::RunnerConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Option that marks the sequence as an already aligned FASTA.
pub const ALIGNED_INPUT_FLAG: &str = "-x";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    ticket: TicketNumber,
    options: String,
    parameters: String,
    sequence: String,
}

/// What a finished [`Job::run`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub job_dir: PathBuf,
    pub sequence_path: PathBuf,
    pub parameters_path: PathBuf,
    pub invocation: ToolInvocation,
    pub status: ToolStatus,
}

impl Job {
    pub fn new(
        ticket: impl Into<String>,
        options: impl Into<String>,
        parameters: impl Into<String>,
        sequence: impl Into<String>,
    ) -> Result<Self, JobError> {
        Ok(Job {
            ticket: TicketNumber::new(ticket)?,
            options: options.into(),
            parameters: parameters.into(),
            sequence: sequence.into(),
        })
    }

    pub fn ticket(&self) -> &TicketNumber {
        &self.ticket
    }

    pub fn options(&self) -> &str {
        &self.options
    }

    pub fn parameters(&self) -> &str {
        &self.parameters
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Whether the sequence goes to the aligned (`output.afa`) file name.
    pub fn is_aligned_input(&self, config: &RunnerConfig) -> bool {
        config.flag_match.contains(&self.options, ALIGNED_INPUT_FLAG)
    }

    pub fn invocation(&self, config: &RunnerConfig) -> ToolInvocation {
        ToolInvocation::new(
            config.tool.clone(),
            config.job_dir(self.ticket.as_str()),
            self.options.clone(),
        )
    }

    /// Writes the job's input files and blocks until the external tool exits.
    ///
    /// A non-zero exit status is reported in the outcome, not as an error.
    /// Write and launch failures are returned with the offending path.
    pub fn run(self, config: &RunnerConfig, launcher: &dyn ToolLauncher) -> Result<JobOutcome> {
        let job_dir = config.job_dir(self.ticket.as_str());
        if !job_dir.exists() {
            // not recursive: a missing analysis root is left for the writes to report
            if let Err(e) = fs::create_dir(&job_dir) {
                debug!("Could not create job directory {}: {}", job_dir.display(), e);
            }
        }

        if self.options.starts_with(ALIGNED_INPUT_FLAG) && !self.is_aligned_input(config) {
            warn!(
                "Ticket {}: leading {} in options {:?} is not recognised with {:?} flag matching",
                self.ticket, ALIGNED_INPUT_FLAG, self.options, config.flag_match
            );
        }

        let sequence_name = if self.is_aligned_input(config) {
            &config.afa_file_name
        } else {
            &config.fasta_input_file_name
        };
        let sequence_path = job_dir.join(sequence_name);
        fs::write(&sequence_path, &self.sequence)
            .with_context(|| format!("Failed to write sequence to {}", sequence_path.display()))?;

        let parameters_path = job_dir.join(&config.param_file_name);
        fs::write(&parameters_path, &self.parameters)
            .with_context(|| format!("Failed to write parameters to {}", parameters_path.display()))?;

        let invocation = self.invocation(config);
        info!("SNP {}", invocation.command_line());
        let status = launcher
            .launch(&invocation)
            .with_context(|| format!("Failed to launch {}", invocation.program()))?;
        if !status.success() {
            warn!("SNP job {} finished with {}", self.ticket, status);
        }

        Ok(JobOutcome {
            job_dir,
            sequence_path,
            parameters_path,
            invocation,
            status,
        })
    }
}

/// JSON form of a job submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    #[serde(alias = "ticketNumber")]
    pub ticket_number: String,
    #[serde(default)]
    pub options: String,
    #[serde(default)]
    pub parameters: String,
    pub sequence: String,
}

impl JobRequest {
    pub fn into_job(self) -> Result<Job, JobError> {
        Job::new(self.ticket_number, self.options, self.parameters, self.sequence)
    }
}
