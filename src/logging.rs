//! Process-wide logging setup.
//!
//! Each run appends to its own log file under the configured logs directory,
//! named after the run start time. The file stays open until process exit;
//! there is no teardown. A second layer mirrors output to stderr.

use crate::config::Settings;
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize tracing for the whole process. Called once from main before
/// any other work.
///
/// A failure to create the log directory or file degrades to stderr-only
/// logging rather than aborting the run.
pub fn init(settings: &Settings, verbose: u8) {
    let log_level = match verbose {
        0 => settings.general.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("avskrift={}", log_level)),
    );

    let file_layer = open_log_file(settings).map(|file| {
        tracing_subscriber::fmt::layer()
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(file_layer)
        .init();
}

fn open_log_file(settings: &Settings) -> Option<std::fs::File> {
    let logs_dir = settings.logs_dir();
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("warning: could not create {}: {}", logs_dir.display(), e);
        return None;
    }

    let filename = format!("{}.log", chrono::Local::now().format("%m_%d_%Y_%H_%M_%S"));
    let path = logs_dir.join(filename);
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("warning: could not open {}: {}", path.display(), e);
            None
        }
    }
}
