//! File logging. The terminal belongs to the dashboard, so events go to
//! `tianwen.log` in the data directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "TIANWEN_LOG";

const LOG_FILE: &str = "tianwen.log";
const DEFAULT_DIRECTIVES: &str = "warn";

/// Install the global subscriber and return the log file path.
pub fn init() -> color_eyre::Result<PathBuf> {
    let dir = tianwen_config::data_dir()?;
    fs::create_dir_all(&dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter)
        .try_init()?;

    Ok(path)
}
