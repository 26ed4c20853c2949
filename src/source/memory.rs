//! In-memory snapshot source.
//!
//! Useful when the statistics text arrives by some other route (a socket
//! read by the embedding program, a recorded trace) and for driving the
//! monitor in tests.

use std::collections::VecDeque;

use super::DataSource;
use crate::error::SourceError;

/// A scripted source that hands out queued results in order.
///
/// Once the queue is drained the last successfully returned text is repeated,
/// the way a statistics file keeps its contents until the producer rewrites it.
#[derive(Debug)]
pub struct MemorySource {
    queue: VecDeque<Result<String, String>>,
    last: Option<String>,
    description: String,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new(source_description: &str) -> Self {
        Self {
            queue: VecDeque::new(),
            last: None,
            description: format!("memory: {}", source_description),
        }
    }

    /// Queue a snapshot text.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.queue.push_back(Ok(text.into()));
    }

    /// Queue a read failure.
    pub fn push_failure(&mut self, message: impl Into<String>) {
        self.queue.push_back(Err(message.into()));
    }
}

impl DataSource for MemorySource {
    fn read(&mut self) -> Result<String, SourceError> {
        match self.queue.pop_front() {
            Some(Ok(text)) => {
                self.last = Some(text.clone());
                Ok(text)
            }
            Some(Err(message)) => Err(SourceError::Injected(message)),
            None => self.last.clone().ok_or_else(|| SourceError::Empty(self.description.clone())),
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}
