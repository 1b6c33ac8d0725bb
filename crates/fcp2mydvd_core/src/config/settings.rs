//! Settings struct with TOML-based sections.

use serde::{Deserialize, Serialize};

use crate::logging::LogLevel;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Input parsing behaviour.
    #[serde(default)]
    pub parsing: ParsingSettings,

    /// Output rendering.
    #[serde(default)]
    pub output: OutputSettings,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default log level (overridden by RUST_LOG).
    #[serde(default)]
    pub level: LogLevel,
}

/// Parsing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsingSettings {
    /// Reject time strings with extra characters around `NUM[/DEN]s`.
    #[serde(default = "default_true")]
    pub strict_time_strings: bool,
}

impl Default for ParsingSettings {
    fn default() -> Self {
        Self {
            strict_time_strings: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Write an XML declaration before the MyDVD project root.
    #[serde(default = "default_true")]
    pub xml_declaration: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            xml_declaration: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Known top-level tables of the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Logging,
    Parsing,
    Output,
}

impl ConfigSection {
    /// Get the TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Logging => "logging",
            ConfigSection::Parsing => "parsing",
            ConfigSection::Output => "output",
        }
    }

    /// All sections in file order.
    pub fn all() -> [ConfigSection; 3] {
        [
            ConfigSection::Logging,
            ConfigSection::Parsing,
            ConfigSection::Output,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_serialize() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        assert!(toml_str.contains("[logging]"));
        assert!(toml_str.contains("[parsing]"));
        assert!(toml_str.contains("strict_time_strings = true"));
    }

    #[test]
    fn partial_config_uses_defaults() {
        let settings: Settings = toml::from_str("[output]\nxml_declaration = false\n").unwrap();
        assert!(!settings.output.xml_declaration);
        assert!(settings.parsing.strict_time_strings);
        assert_eq!(settings.logging.level, LogLevel::Info);
    }

    #[test]
    fn log_level_is_lowercase_in_toml() {
        let settings: Settings = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(settings.logging.level, LogLevel::Debug);
    }
}
