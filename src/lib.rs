//! # egpu-perfmon
//!
//! A live terminal dashboard for the Anarchy eGPU driver's performance
//! statistics.
//!
//! The driver publishes a human-readable statistics report (by default under
//! debugfs). On a fixed interval the monitor reads that report, pulls the
//! numeric fields out of it, keeps a bounded rolling history per metric and
//! redraws ASCII bar graphs of that history together with the current values.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐  │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│  │
//! │  │ (state) │    │(extract, │    │(graphs) │    │         │  │
//! │  └────┬────┘    │ history) │    └─────────┘    └─────────┘  │
//! │       │         └──────────┘                                │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── FileSource | MemorySource                   │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Run state machine, tick driver and control commands
//! - **[`source`]**: Snapshot source abstraction ([`DataSource`] trait)
//! - **[`data`]**: Field extraction, rolling windows and scale ceilings
//! - **[`ui`]**: Bar graph rendering and the dashboard frame
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Sample the driver's statistics every second
//! egpu-perfmon
//!
//! # Faster sampling from a captured file
//! egpu-perfmon --interval 0.25 --stats-file ./statistics.txt
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::time::Instant;
//! use egpu_perfmon::{App, MemorySource, Metric, Settings};
//!
//! let mut source = MemorySource::new("capture");
//! source.push_text("TX: 12 transfers (12.50 MB/s)\nAverage: 450 ns\n");
//!
//! let mut app = App::new(Box::new(source), &Settings::default());
//! app.tick(Instant::now());
//! assert_eq!(app.store.latest(Metric::Tx), Some(12.5));
//! ```
//!
//! ### Extraction only
//!
//! ```
//! use egpu_perfmon::extract;
//!
//! let record = extract("Connections: 2\nErrors: 0\n");
//! assert_eq!(record.connections, 2);
//! assert_eq!(record.tx_mbps, 0.0);
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Command, MonitorEvent, RunState};
pub use config::{Overrides, Settings};
pub use data::{apply_snapshot, extract, Metric, MetricStore, RollingWindow, Scale, SnapshotRecord};
pub use error::{ConfigError, RenderError, SourceError};
pub use source::{DataSource, FileSource, MemorySource};
