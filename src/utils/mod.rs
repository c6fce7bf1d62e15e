pub mod external_tools;
pub(crate) mod progress;
