// src/log.rs
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::fmt::{time, writer::BoxMakeWriter};
use tracing_subscriber::EnvFilter;

use crate::config::consts::{LOG_FILE, STORE_DIR};

pub fn log_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(LOG_FILE)
}

/// Map `-v` count to a default filter. `RUST_LOG` wins when set.
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "review_scrape=info",
        1 => "review_scrape=debug",
        _ => "review_scrape=trace",
    }
}

/// Install the global subscriber: plain text with elapsed-time stamps,
/// appended to `.store/debug.log`, stderr if that file can't be opened.
/// A second call is a no-op.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let path = log_path();
    let file = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&path));

    let writer = match file {
        Ok(f) => BoxMakeWriter::new(Mutex::new(f)),
        Err(e) => {
            eprintln!("Warning: cannot open {}: {e}; logging to stderr", path.display());
            BoxMakeWriter::new(std::io::stderr)
        }
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(time::uptime())
        .with_ansi(false)
        .with_target(false)
        .with_writer(writer)
        .try_init();
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
