//! Snapshot source abstraction.
//!
//! The monitor consumes one blob of status text per tick. Where that text
//! comes from is hidden behind the [`DataSource`] trait so the tick driver
//! can be exercised without a real debugfs file.

mod file;
mod memory;

pub use file::{FileSource, DEFAULT_STATS_PATH};
pub use memory::MemorySource;

use std::fmt::Debug;

use crate::error::SourceError;

/// Trait for reading the current snapshot text.
///
/// # Example
///
/// ```
/// use egpu_perfmon::{DataSource, MemorySource};
///
/// let mut source = MemorySource::new("test");
/// source.push_text("Connections: 2");
/// assert_eq!(source.read().unwrap(), "Connections: 2");
/// ```
pub trait DataSource: Send + Debug {
    /// Read the full text of the current snapshot.
    ///
    /// Called once per tick. Implementations are expected to return promptly;
    /// a blocking source stalls the whole monitor.
    fn read(&mut self) -> Result<String, SourceError>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the dashboard header.
    fn description(&self) -> &str;
}
