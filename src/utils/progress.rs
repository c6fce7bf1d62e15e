use anyhow::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

pub(crate) struct SpinnerBuilder {
    template: &'static str,
    message: String,
    hidden: bool,
}

impl SpinnerBuilder {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            template: "{spinner:.green} {msg}",
            message: message.into(),
            hidden: false,
        }
    }

    pub(crate) fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub(crate) fn build(self) -> Result<ProgressBar> {
        let spinner = ProgressBar::new_spinner();
        if self.hidden {
            spinner.set_draw_target(ProgressDrawTarget::hidden());
        }
        spinner.set_style(ProgressStyle::default_spinner().template(self.template)?);
        spinner.set_message(self.message);
        Ok(spinner)
    }
}
