use crate::job::{ToolInvocation, ToolLauncher, ToolStatus};
use crate::utils::progress::SpinnerBuilder;
use anyhow::{bail, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Locates `program` the way the launcher would: paths containing a separator
/// are taken as given, bare names are searched for on `path_var`.
pub fn resolve_program(program: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }
    std::env::split_paths(path_var?)
        .map(|dir| dir.join(program))
        .find(|path| is_executable(path))
}

/// Checks that `program` exists and is executable without running it, since
/// the analysis script has no side-effect free flag.
pub fn check_tool(program: &str) -> Result<PathBuf> {
    match resolve_program(program, std::env::var_os("PATH").as_deref()) {
        Some(path) => Ok(path),
        None => bail!(
            "{} not found. Install the SNP analysis scripts and ensure they're in your PATH, or set `tool` in the config",
            program
        ),
    }
}

/// Runs the tool as a child process. Stdin is closed, stdout and stderr are
/// inherited, and the environment and working directory are the caller's.
#[derive(Debug, Default, Clone)]
pub struct ProcessLauncher {
    show_progress: bool,
}

impl ProcessLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }
}

impl ToolLauncher for ProcessLauncher {
    fn launch(&self, invocation: &ToolInvocation) -> Result<ToolStatus> {
        let spinner = SpinnerBuilder::new(format!("Running {}", invocation.program()))
            .hidden(!self.show_progress)
            .build()?;

        // the child shares our stderr, so the spinner stays off screen until it exits
        let status = spinner.suspend(|| {
            Command::new(invocation.program())
                .args(invocation.args())
                .stdin(Stdio::null())
                .status()
        });

        match status {
            Ok(status) => {
                let status = ToolStatus::from(status);
                spinner.finish_with_message(format!("{} finished with {}", invocation.program(), status));
                Ok(status)
            }
            Err(e) => {
                spinner.abandon();
                Err(e.into())
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    fn script(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    // Scripts are written before anything is spawned; executing a freshly
    // written file while another thread forks can fail with ETXTBSY.
    #[test]
    fn test_process_launcher() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("args.txt");
        let echo_args = script(
            dir.path(),
            "echo_args.sh",
            &format!("printf '%s\\n' \"$@\" > '{}'", out.display()),
        );
        let failing = script(dir.path(), "failing.sh", "exit 3");

        let status = ProcessLauncher::new()
            .with_progress(true)
            .launch(&ToolInvocation::new(echo_args, "/data/T1", "-v   -x"))
            .unwrap();
        assert!(status.success());
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "-r\n/data/T1\n-v\n-x\n");

        let status = ProcessLauncher::new()
            .launch(&ToolInvocation::new(failing, "/data/T1", ""))
            .unwrap();
        assert_eq!(status.code, Some(3));

        let missing = "/nonexistent/web_flu_snp_analysis.pl";
        assert!(ProcessLauncher::new()
            .launch(&ToolInvocation::new(missing, "/tmp", ""))
            .is_err());
    }

    #[test]
    fn test_check_tool_does_not_run_the_program() {
        let dir = tempdir().unwrap();
        let marker = dir.path().join("ran");
        let tool = script(dir.path(), "web_flu_snp_analysis.pl", &format!("touch '{}'", marker.display()));

        assert_eq!(check_tool(&tool).unwrap(), PathBuf::from(&tool));
        assert!(!marker.exists());
        assert!(check_tool("/nonexistent/web_flu_snp_analysis.pl").is_err());
    }

    #[test]
    fn test_resolve_program_searches_path() {
        let bin = tempdir().unwrap();
        let other = tempdir().unwrap();
        script(bin.path(), "web_flu_snp_analysis.pl", "exit 0");
        std::fs::write(other.path().join("not_executable.pl"), "").unwrap();
        let path_var = std::env::join_paths([other.path(), bin.path()]).unwrap();

        assert_eq!(
            resolve_program("web_flu_snp_analysis.pl", Some(path_var.as_os_str())),
            Some(bin.path().join("web_flu_snp_analysis.pl"))
        );
        assert_eq!(resolve_program("not_executable.pl", Some(path_var.as_os_str())), None);
        assert_eq!(resolve_program("web_flu_snp_analysis.pl", None), None);
    }
}
