//! Output formatting for generation reports
//!
//! Reports can be printed as JSON, YAML or human-readable text. Logs go to
//! stderr, so stdout only ever carries the report.
//!
//! # Example
//!
//! ```ignore
//! use doxyplat::cli::output::{OutputFormat, OutputFormatter};
//!
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! println!("{}", formatter.format(&report)?);
//! ```

use anyhow::{Context, Result};

use crate::generator::GenerationReport;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Output formatter for generation reports
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Creates a new output formatter with the specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a report according to the configured format
    pub fn format(&self, report: &GenerationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(report)
                .context("Failed to serialize generation report to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(report)
                .context("Failed to serialize generation report to YAML"),
            OutputFormat::Human => Ok(self.format_human(report)),
        }
    }

    fn format_human(&self, report: &GenerationReport) -> String {
        let mut output = String::new();

        if report.written {
            output.push_str("\u{2713} Documentation Config Generated\n");
        } else {
            output.push_str("\u{2713} Documentation Inputs Resolved (dry run)\n");
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        output.push_str(&format!("Root Path:  {}\n", report.root_path.display()));
        output.push_str(&format!("Platform:   {}\n", report.platform.display()));
        output.push_str(&format!(
            "Entries:    {} ({} discovered, {} mandatory)\n",
            report.entries.len(),
            report.discovered,
            report.entries.len() - report.discovered
        ));

        if !report.written {
            output.push_str("\nInputs:\n");
            for (i, entry) in report.entries.iter().enumerate() {
                let connector = if i + 1 == report.entries.len() {
                    "\u{2514}"
                } else {
                    "\u{251C}"
                };
                output.push_str(&format!("{}\u{2500} {}\n", connector, entry));
            }
            return output;
        }

        output.push_str(&format!("Output:     {}\n", report.output.display()));
        output.push_str(&format!(
            "\nRun 'doxygen {}' to build the documentation.\n",
            report.output.display()
        ));
        output
    }
}
