// src/log.rs
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::fmt::time::Uptime;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::consts::{LOG_FILE, STORE_DIR};

fn log_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(LOG_FILE)
}

/// Install the global subscriber: human-readable lines on stderr plus an
/// appending plain-text copy in `.store/debug.log`. Both are stamped with
/// elapsed process time. `RUST_LOG` overrides the default `info` filter.
///
/// The file layer is best-effort; if the store directory can't be created the
/// run still logs to stderr. Calling this twice is harmless.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr = fmt::layer().with_timer(Uptime::default()).with_writer(std::io::stderr);

    let path = log_path();
    let file = fs::create_dir_all(STORE_DIR)
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&path))
        .ok()
        .map(|f| {
            fmt::layer()
                .with_timer(Uptime::default())
                .with_ansi(false)
                .with_writer(Mutex::new(f))
        });

    let _ = tracing_subscriber::registry().with(filter).with(stderr).with(file).try_init();
}
