use directories::ProjectDirs;
use log::LevelFilter;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SoloLevelError};

/// Tick rate for the event loop (100ms)
pub const TICK_RATE: Duration = Duration::from_millis(100);

/// How often the quick note is flushed to the database
pub const NOTE_SAVE_INTERVAL: Duration = Duration::from_secs(5);

/// Level written to the log file
pub const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Get the data directory, creating it if necessary.
///
/// - Linux: `~/.local/share/sololevel/`
/// - macOS: `~/Library/Application Support/sololevel/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\sololevel\`
fn data_dir() -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from("", "", "sololevel").ok_or(SoloLevelError::NoDataDirectory)?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;

    Ok(data_dir.to_path_buf())
}

/// Get the path to the database file (`sololevel.db` in the data directory).
pub fn get_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("sololevel.db"))
}

/// Get the path to the log file.
///
/// Returns the path to `sololevel.log` in the same data directory as the database.
pub fn get_log_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("sololevel.log"))
}
