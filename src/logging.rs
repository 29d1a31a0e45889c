//! File logging. The terminal belongs to the TUI, so events go to
//! `~/.local/share/prodform/prodform.log` instead of stdout.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `prodform=debug`.
pub const LOG_FILTER_VAR: &str = "PRODFORM_LOG";

const LOG_FILE: &str = "prodform.log";
const DEFAULT_FILTER: &str = "info";

/// Errors that can occur while setting up logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The log directory or file could not be created.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,

    /// A global subscriber was already installed.
    #[error("could not install log subscriber: {0}")]
    Init(String),
}

/// Installs the global subscriber writing to the default log file.
///
/// Returns the path of the log file.
pub fn init() -> Result<PathBuf, LoggingError> {
    let dir = dirs::data_dir().ok_or(LoggingError::NoDataDir)?;
    init_in(&dir.join("prodform"))
}

/// Installs the global subscriber writing to `prodform.log` inside `dir`.
pub fn init_in(dir: &Path) -> Result<PathBuf, LoggingError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter =
        EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))?;

    Ok(path)
}
