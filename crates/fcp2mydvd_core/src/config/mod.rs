//! Configuration for the converter.
//!
//! A small TOML file with three sections:
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [parsing]
//! strict_time_strings = true
//!
//! [output]
//! xml_declaration = true
//! ```
//!
//! # Example
//!
//! ```no_run
//! use fcp2mydvd_core::config::ConfigManager;
//!
//! let mut config = ConfigManager::new("fcp2mydvd.toml");
//! config.load_or_create().unwrap();
//! println!("Strict times: {}", config.settings().parsing.strict_time_strings);
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{ConfigSection, LoggingSettings, OutputSettings, ParsingSettings, Settings};
