//! simplelog-backed file logging
//!
//! Stdout belongs to the feed, so logs go to a file:
//! - debug builds write into the current working directory
//! - release builds write into the cache directory (~/.cache/banter/ on Linux)

use std::fs::File;
use std::path::PathBuf;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

/// Pick the log file location for this build
fn log_file_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let filename = format!("banter-{}.log", timestamp);

    if cfg!(debug_assertions) {
        PathBuf::from(filename)
    } else {
        banter_session::paths::cache_dir()
            .map(|dir| dir.join(&filename))
            .unwrap_or_else(|_| PathBuf::from(filename))
    }
}

/// Set up the file logger
///
/// The level comes from `RUST_LOG` (debug by default in development,
/// info in release). Returns the log file path so the startup banner
/// can point at it.
pub fn init() -> PathBuf {
    let log_file = log_file_path();

    let fallback = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(fallback);

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // keep UTC when the local offset is unknown
        .build();

    let file = File::create(&log_file).expect("Failed to create log file");

    WriteLogger::init(level, config, file).expect("Failed to initialize logger");

    log_file
}
