use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::formatter::BracketedFormatter;
use crate::config::LogConfig;

/// Install the global subscriber.
///
/// Events go to stderr and, when `log_to_file` is set, to a timestamped file
/// under the configured log directory. `RUST_LOG` overrides the configured level.
/// Returns the log file path when one was created.
pub fn setup_logging(config: &LogConfig) -> io::Result<Option<PathBuf>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Keep the crate at the configured level but quiet the image decoders
        let mut filter = EnvFilter::new(&config.level);
        for directive in ["png=warn", "image=warn"] {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }
        filter
    });

    let stderr_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(io::stderr);

    let (file_layer, log_path) = if config.log_to_file {
        let log_dir = match &config.log_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?.join("logs"),
        };
        fs::create_dir_all(&log_dir)?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!("nightowls_{}.log", timestamp));

        let file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_path)?;

        let layer = fmt::layer()
            .event_format(BracketedFormatter)
            .with_writer(Mutex::new(file))
            .with_ansi(false);
        (Some(layer), Some(log_path))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    if let Some(path) = &log_path {
        info!("Log file created at: {:?}", path);
    }

    Ok(log_path)
}
