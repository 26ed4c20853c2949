//! Error types for the monitor.
//!
//! Missing fields in a snapshot are not errors (they extract as zero), so
//! the taxonomy only covers the source, the drawing surface and settings.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a snapshot.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The snapshot path could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An in-memory source has nothing to hand out yet.
    #[error("no snapshot available from {0}")]
    Empty(String),

    /// A scripted failure injected by an in-memory source.
    #[error("{0}")]
    Injected(String),
}

/// Errors raised while laying out a frame.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The terminal is smaller than the dashboard needs.
    #[error("terminal too small: {width}x{height}, minimum {min_width}x{min_height}")]
    TooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
}

/// Invalid or unloadable settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}
