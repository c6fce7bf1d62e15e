#[allow(clippy::module_inception)]
mod config;

pub use config::{RunnerConfig, ROOT_ENV_VAR};
