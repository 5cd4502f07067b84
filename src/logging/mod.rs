//! Logging for the NightOwls loader and CLI
//!
//! This module provides:
//! - Custom log formatting with bracketed output
//! - Dual logging (optional file + stderr)
//! - Log file management with timestamps

mod formatter;
mod setup;

pub use formatter::BracketedFormatter;
pub use setup::setup_logging;
