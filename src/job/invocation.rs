use anyhow::Result;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Command line of one external tool run: `<program> -r <job dir> <options>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    program: String,
    job_dir: PathBuf,
    options: String,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, job_dir: impl Into<PathBuf>, options: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            job_dir: job_dir.into(),
            options: options.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn job_dir(&self) -> &Path {
        &self.job_dir
    }

    pub fn options(&self) -> &str {
        &self.options
    }

    /// Arguments handed to the program. Options are split on whitespace and
    /// never passed through a shell.
    pub fn args(&self) -> Vec<OsString> {
        let mut args = vec![OsString::from("-r"), self.job_dir.clone().into_os_string()];
        args.extend(self.options.split_whitespace().map(OsString::from));
        args
    }

    /// The command as logged, with the option string kept verbatim.
    pub fn command_line(&self) -> String {
        format!("{} -r {} {}", self.program, self.job_dir.display(), self.options)
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Exit status of a finished tool run. `code` is `None` when the process was
/// terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    pub code: Option<i32>,
}

impl ToolStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ToolStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        ToolStatus { code: status.code() }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Starts the external tool and waits for it to finish.
pub trait ToolLauncher {
    fn launch(&self, invocation: &ToolInvocation) -> Result<ToolStatus>;
}
