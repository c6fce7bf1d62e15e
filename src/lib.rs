pub mod alphabet;
pub mod cli;
pub mod commands;
pub mod config;
pub mod figure;
pub mod job;
pub mod logging;
pub mod outputs;
pub mod types;
pub mod utils;
pub mod wiggle;

pub use config::RunnerConfig;
pub use job::{Job, JobError, JobOutcome, JobRequest, TicketNumber, ToolInvocation, ToolLauncher, ToolStatus};
pub use utils::external_tools::ProcessLauncher;
