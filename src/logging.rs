use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;

use crate::config::{LOG_LEVEL, get_log_path};
use crate::error::Result;

/// Route the `log` facade to `sololevel.log`.
///
/// The terminal belongs to the UI, so nothing is ever logged to stdout/stderr.
pub fn init_logging() -> Result<()> {
    let path = get_log_path()?;
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let config = ConfigBuilder::new()
        .add_filter_allow_str("sololevel")
        .build();
    WriteLogger::init(LOG_LEVEL, config, file)?;

    log::info!("logging to {}", path.display());
    Ok(())
}
