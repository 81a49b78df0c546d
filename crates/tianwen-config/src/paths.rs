//! Platform locations of the configuration file and the log directory.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::{ConfigError, Result};

const QUALIFIER: &str = "io.github";
const ORGANIZATION: &str = "am2rican5";
const APPLICATION: &str = "tianwen";

/// File name of the configuration inside [`config_dir`].
pub const CONFIG_FILE_NAME: &str = "config.toml";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).ok_or(ConfigError::NoProjectDirs)
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Where [`Config::load`](crate::Config::load) looks by default.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Directory for logs and other generated files.
pub fn data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().to_path_buf())
}
