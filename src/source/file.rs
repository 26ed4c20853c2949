//! File-based snapshot source.

use std::fs;
use std::path::{Path, PathBuf};

use super::DataSource;
use crate::error::SourceError;

/// Statistics file exported by the eGPU driver's debugfs tree.
pub const DEFAULT_STATS_PATH: &str = "/sys/kernel/debug/anarchy-egpu/performance/statistics";

/// A data source that reads the statistics text from a file.
///
/// The whole file is read on every call. Pseudo-files under debugfs do not
/// carry a useful modification time, so there is no change detection.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being monitored.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileSource {
    fn read(&mut self) -> Result<String, SourceError> {
        fs::read_to_string(&self.path).map_err(|source| SourceError::Unavailable {
            path: self.path.clone(),
            source,
        })
    }

    fn description(&self) -> &str {
        &self.description
    }
}
