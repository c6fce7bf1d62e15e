use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("Ticket number must not be empty")]
    EmptyTicket,

    #[error("Ticket number {0:?} cannot be used as a directory name")]
    UnsafeTicket(String),
}

/// Caller supplied job identifier. Always a single, non-special path segment,
/// so `<root>/<ticket>` can never point outside the analysis root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketNumber(String);

impl TicketNumber {
    pub fn new(ticket: impl Into<String>) -> Result<Self, JobError> {
        let ticket = ticket.into();
        if ticket.is_empty() {
            return Err(JobError::EmptyTicket);
        }
        let unsafe_char = |c: char| c == '/' || c == '\\' || c.is_control();
        if ticket == "." || ticket == ".." || ticket.contains(unsafe_char) {
            return Err(JobError::UnsafeTicket(ticket));
        }
        Ok(TicketNumber(ticket))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TicketNumber {
    type Err = JobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TicketNumber::new(s)
    }
}

impl AsRef<str> for TicketNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
