use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, OpenOptions};
use std::path::Path;

/// Sends `log` records to `path`. The terminal belongs to the UI, so nothing
/// is written to stderr. Calling it again after a logger is set is a no-op.
pub fn init(path: &Path) -> std::io::Result<()> {
    if log::max_level() != LevelFilter::Off {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    // another logger may already be installed (tests, embedding apps)
    let _ = WriteLogger::init(LevelFilter::Debug, config, file);
    Ok(())
}
