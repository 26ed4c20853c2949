//! Sampling, extraction and windowing.
//!
//! ## Submodules
//!
//! - [`extract`]: Pattern-based field extraction ([`SnapshotRecord`])
//! - [`window`]: Capacity-bounded FIFO ([`RollingWindow`])
//! - [`store`]: Per-metric rolling history ([`MetricStore`])
//! - [`scale`]: Auto-growing graph ceilings ([`Scale`])
//!
//! ## Data Flow
//!
//! ```text
//! statistics text
//!        │
//!        ▼
//! extract::extract()
//!        │
//!        ▼
//! MetricStore::update() ──▶ Scale::grown()
//! ```

pub mod extract;
pub mod scale;
pub mod store;
pub mod window;

pub use extract::{extract, Field, FieldValue, SnapshotRecord};
pub use scale::{Scale, ScaleFloors};
pub use store::{Metric, MetricStore};
pub use window::{RollingWindow, DEFAULT_WINDOW_SIZE};

/// Apply one snapshot: extract its fields, record them and grow the scale.
///
/// The scale is passed in and returned rather than held globally so the
/// growth and reset rules can be driven deterministically.
pub fn apply_snapshot(store: &mut MetricStore, scale: Scale, text: &str) -> (SnapshotRecord, Scale) {
    let record = extract(text);
    store.update(&record);
    let scale = scale.grown(store);
    (record, scale)
}
