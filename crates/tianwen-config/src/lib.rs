//! Configuration for the tianwen dashboard.
//!
//! Settings live in a TOML file under the platform configuration directory.
//! A missing file means defaults; a malformed or out-of-range value is an
//! error rather than a silent substitution.

mod config;
mod error;
mod paths;

pub use config::{Config, ObserverConfig};
pub use error::{ConfigError, Result};
pub use paths::{CONFIG_FILE_NAME, config_dir, config_path, data_dir};
