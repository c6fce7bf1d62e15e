use crate::types::FlagMatch;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides `analysis_root` when set to a non-empty value.
pub const ROOT_ENV_VAR: &str = "SNP_RUNNER_ROOT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Directory under which one working directory per ticket is created
    #[serde(default = "default_analysis_root")]
    pub analysis_root: PathBuf,
    /// External SNP analysis program, resolved through PATH when not absolute
    #[serde(default = "default_tool")]
    pub tool: String,
    #[serde(default = "default_afa_file_name")]
    pub afa_file_name: String,
    #[serde(default = "default_fasta_input_file_name")]
    pub fasta_input_file_name: String,
    #[serde(default = "default_param_file_name")]
    pub param_file_name: String,
    #[serde(default)]
    pub flag_match: FlagMatch,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "snp-runner", "snp-runner")
}

fn default_analysis_root() -> PathBuf {
    match project_dirs() {
        Some(dirs) => dirs.data_dir().join("analysis"),
        None => PathBuf::from("analysis_files"),
    }
}

fn default_tool() -> String {
    "web_flu_snp_analysis.pl".to_string()
}

fn default_afa_file_name() -> String {
    "output.afa".to_string()
}

fn default_fasta_input_file_name() -> String {
    "input.fasta".to_string()
}

fn default_param_file_name() -> String {
    "params.txt".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            analysis_root: default_analysis_root(),
            tool: default_tool(),
            afa_file_name: default_afa_file_name(),
            fasta_input_file_name: default_fasta_input_file_name(),
            param_file_name: default_param_file_name(),
            flag_match: FlagMatch::default(),
        }
    }
}

impl RunnerConfig {
    /// Path of the per-user config file, if a home directory can be resolved.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads the per-user config, falling back to defaults when the file is
    /// missing or unreadable. The root env override is applied last.
    pub fn load() -> Self {
        let mut config: RunnerConfig = Self::default_path()
            .filter(|path| path.exists())
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default();
        config.apply_env();
        config
    }

    /// Loads an explicitly requested config file. Unlike [`RunnerConfig::load`]
    /// a missing or malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: RunnerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env();
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Some(root) = std::env::var_os(ROOT_ENV_VAR).filter(|v| !v.is_empty()) {
            self.analysis_root = PathBuf::from(root);
        }
    }

    /// Working directory of a single job.
    pub fn job_dir(&self, ticket: &str) -> PathBuf {
        self.analysis_root.join(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: RunnerConfig = toml::from_str(
            r#"
            analysis_root = "/srv/analysis"
            flag_match = "token"
            "#,
        )
        .unwrap();

        assert_eq!(config.analysis_root, PathBuf::from("/srv/analysis"));
        assert_eq!(config.flag_match, FlagMatch::Token);
        assert_eq!(config.tool, "web_flu_snp_analysis.pl");
        assert_eq!(config.afa_file_name, "output.afa");
        assert_eq!(config.fasta_input_file_name, "input.fasta");
        assert_eq!(config.param_file_name, "params.txt");
    }

    #[test]
    fn test_save_then_load_from() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = RunnerConfig {
            analysis_root: dir.path().join("analysis"),
            tool: "/opt/snp/bin/web_flu_snp_analysis.pl".to_string(),
            ..RunnerConfig::default()
        };

        config.save_to(&path).unwrap();
        let loaded = RunnerConfig::load_from(&path).unwrap();

        assert_eq!(loaded.tool, config.tool);
        assert_eq!(loaded.param_file_name, config.param_file_name);
    }

    #[test]
    fn test_load_from_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let err = RunnerConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_job_dir_joins_ticket() {
        let config = RunnerConfig {
            analysis_root: PathBuf::from("/data/snp"),
            ..RunnerConfig::default()
        };
        assert_eq!(config.job_dir("T100"), PathBuf::from("/data/snp/T100"));
    }
}
