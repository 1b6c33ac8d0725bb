//! Config manager for loading and saving the settings file.
//!
//! - Atomic writes (write to temp file, then rename)
//! - Unknown sections are reported and dropped on the next save

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use toml_edit::DocumentMut;

use super::settings::{ConfigSection, Settings};
use crate::atomic::atomic_write;

/// Errors that can occur during config operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Failed to parse config for editing: {0}")]
    EditParseError(#[from] toml_edit::TomlError),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for config operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Manages the converter configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

impl ConfigManager {
    /// Create a manager for the given path. Nothing is read until `load()`.
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            settings: Settings::default(),
        }
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get a reference to the current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Load config from file. Returns error if the file doesn't exist.
    pub fn load(&mut self) -> ConfigResult<()> {
        if !self.config_path.exists() {
            return Err(ConfigError::NotFound(self.config_path.clone()));
        }

        let content = fs::read_to_string(&self.config_path)?;
        let (settings, unknown) = parse_and_validate(&content)?;
        for section in &unknown {
            tracing::warn!(
                "Ignoring unknown section [{}] in {}",
                section,
                self.config_path.display()
            );
        }
        self.settings = settings;
        Ok(())
    }

    /// Load config from file, creating it with defaults if it doesn't exist.
    ///
    /// A file with unknown sections is rewritten without them.
    pub fn load_or_create(&mut self) -> ConfigResult<()> {
        if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            let (settings, unknown) = parse_and_validate(&content)?;
            self.settings = settings;

            if !unknown.is_empty() {
                tracing::info!(
                    "Removing unknown sections {:?} from {}",
                    unknown,
                    self.config_path.display()
                );
                self.save()?;
            }
        } else {
            self.settings = Settings::default();
            self.save()?;
        }
        Ok(())
    }

    /// Save the entire config atomically.
    pub fn save(&self) -> ConfigResult<()> {
        let content = self.generate_config_with_comments()?;
        atomic_write(&self.config_path, &content)?;
        Ok(())
    }

    fn generate_config_with_comments(&self) -> ConfigResult<String> {
        let mut output = String::new();
        output.push_str("# fcp2mydvd configuration\n\n");

        for section in ConfigSection::all() {
            let (comment, body) = match section {
                ConfigSection::Logging => (
                    "# Default log level: trace, debug, info, warn, error",
                    toml::to_string_pretty(&self.settings.logging)?,
                ),
                ConfigSection::Parsing => (
                    "# strict_time_strings = false ignores extra text after NUM/DENs values",
                    toml::to_string_pretty(&self.settings.parsing)?,
                ),
                ConfigSection::Output => (
                    "# Rendering of the MyDVD project",
                    toml::to_string_pretty(&self.settings.output)?,
                ),
            };
            output.push_str(comment);
            output.push('\n');
            output.push_str(&format!("[{}]\n", section.table_name()));
            for line in body.lines() {
                output.push_str(line);
                output.push('\n');
            }
            output.push('\n');
        }

        Ok(output)
    }
}

/// Parse settings and list any top-level tables we don't know.
fn parse_and_validate(content: &str) -> ConfigResult<(Settings, Vec<String>)> {
    let doc: DocumentMut = content.parse()?;
    let settings: Settings = toml::from_str(content)?;

    let known: Vec<&str> = ConfigSection::all().iter().map(|s| s.table_name()).collect();
    let unknown = doc
        .iter()
        .map(|(key, _)| key.to_string())
        .filter(|key| !known.contains(&key.as_str()))
        .collect();

    Ok((settings, unknown))
}
