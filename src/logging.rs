//! File logging for the terminal binary.
//!
//! stdout belongs to the game screen, so log records go to a file.

use anyhow::Result;
use flexi_logger::{FileSpec, Logger, LoggerHandle, WriteMode};

use crate::options::Options;

/// Start the logger if `--log-level` was given.
///
/// The returned handle must stay alive for as long as records should be
/// written; dropping it flushes and stops the logger.
pub fn init(options: &Options) -> Result<Option<LoggerHandle>> {
    let Some(spec) = options.log_level.as_deref() else {
        return Ok(None);
    };

    let handle = Logger::try_with_env_or_str(spec)?
        .log_to_file(
            FileSpec::default()
                .directory(&options.log_dir)
                .basename("blockfall")
                .suppress_timestamp(),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .format(flexi_logger::detailed_format)
        .start()?;

    Ok(Some(handle))
}
