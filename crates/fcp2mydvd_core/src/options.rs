//! Per-run options threaded through the pipeline.

use crate::config::Settings;

/// Options for a single conversion run.
///
/// Passed explicitly to every stage; nothing here is process-wide.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Emit per-node diagnostics at `info` instead of `debug`.
    pub verbose: bool,
    /// Reject time strings with characters around `NUM[/DEN]s`.
    pub strict_time_strings: bool,
    /// Emit an XML declaration in the output.
    pub xml_declaration: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            verbose: false,
            strict_time_strings: true,
            xml_declaration: true,
        }
    }
}

impl ConvertOptions {
    /// Build options from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            verbose: false,
            strict_time_strings: settings.parsing.strict_time_strings,
            xml_declaration: settings.output.xml_declaration,
        }
    }

    /// Builder: set verbose diagnostics.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
