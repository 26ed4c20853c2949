//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`graph`]: Bar graph rendering ([`render`](graph::render) and [`GraphWidget`])
//! - [`dashboard`]: Full-frame layout and panels
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Frame Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (source, sample age / error)  │
//! ├──────────────────────────────────────┤
//! │ TX Throughput (MB/s) (max: ...)      │
//! │ || |||||                             │
//! ├──────────────────────────────────────┤
//! │ RX Throughput (MB/s) (max: ...)      │
//! ├──────────────────────────────────────┤
//! │ DMA Latency (ns) (max: ...)          │
//! ├──────────────────────────────────────┤
//! │ Thunderbolt Status                   │
//! │ Current Values                       │
//! ├──────────────────────────────────────┤
//! │ Footer hint                          │
//! └──────────────────────────────────────┘
//! ```

pub mod dashboard;
pub mod graph;
pub mod theme;

pub use dashboard::DashboardLayout;
pub use graph::{BarGraph, GraphWidget, Series};
pub use theme::Theme;
