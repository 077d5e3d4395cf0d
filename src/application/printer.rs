use colored::{ColoredString, Colorize};
use supports_color::Stream;

use crate::scenario::{Outcome, Report};

/// Writes operation reports to stdout, colored when the terminal allows it.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new(color_requested: bool) -> Self {
        let color = color_requested && supports_color::on(Stream::Stdout).is_some();
        Self { color }
    }

    pub fn print_report(&self, report: &Report<'_>) {
        print!("{}", self.format_report(report));
    }

    pub fn format_report(&self, report: &Report<'_>) -> String {
        let header = format!("[{}] {}", report.index + 1, report.operation);
        match &report.outcome {
            Outcome::Listing(listing) => {
                format!("{}\n{}", self.paint(&header, |text| text.bold()), listing)
            }
            failure if failure.is_failure() => format!(
                "{} -> {}\n",
                header,
                self.paint(&failure.to_string(), |text| text.red())
            ),
            outcome => format!(
                "{} -> {}\n",
                header,
                self.paint(&outcome.to_string(), |text| text.green())
            ),
        }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}
