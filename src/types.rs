use serde::{Deserialize, Serialize};

/// How the `-x` (pre-aligned input) flag is recognised in a job's option string.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagMatch {
    /// The last occurrence of `-x` must start after the first byte of the
    /// option string. A leading `-x` on its own is not recognised.
    #[default]
    #[value(name = "legacy")]
    Legacy,
    /// `-x` must appear as a whitespace separated token.
    #[value(name = "token")]
    Token,
}

impl FlagMatch {
    pub fn contains(&self, options: &str, flag: &str) -> bool {
        match self {
            FlagMatch::Legacy => options.rfind(flag).is_some_and(|idx| idx > 0),
            FlagMatch::Token => options.split_whitespace().any(|token| token == flag),
        }
    }
}
