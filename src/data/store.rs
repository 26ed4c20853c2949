//! Rolling metric history.

use std::time::{Duration, SystemTime};

use super::extract::SnapshotRecord;
use super::window::{RollingWindow, DEFAULT_WINDOW_SIZE};

/// A continuous metric that keeps a rolling history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// DMA transmit throughput (MB/s).
    Tx,
    /// DMA receive throughput (MB/s).
    Rx,
    /// Average DMA latency (ns).
    Latency,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Tx, Metric::Rx, Metric::Latency];

    /// Graph title for this metric.
    pub fn title(&self) -> &'static str {
        match self {
            Metric::Tx => "TX Throughput (MB/s)",
            Metric::Rx => "RX Throughput (MB/s)",
            Metric::Latency => "DMA Latency (ns)",
        }
    }
}

/// Bounded history of the monitored metrics.
///
/// Throughput and latency are windowed; the Thunderbolt counters only keep
/// their last value. A timestamp window runs parallel to the metric windows:
/// the same index in every window refers to the same sample.
#[derive(Debug, Clone)]
pub struct MetricStore {
    tx: RollingWindow<f64>,
    rx: RollingWindow<f64>,
    latency: RollingWindow<f64>,
    timestamps: RollingWindow<SystemTime>,
    /// Last reported Thunderbolt connection count.
    pub connections: u64,
    /// Last reported Thunderbolt error count.
    pub errors: u64,
}

impl Default for MetricStore {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl MetricStore {
    /// Create an empty store keeping `window_size` samples per metric.
    pub fn new(window_size: usize) -> Self {
        Self {
            tx: RollingWindow::new(window_size),
            rx: RollingWindow::new(window_size),
            latency: RollingWindow::new(window_size),
            timestamps: RollingWindow::new(window_size),
            connections: 0,
            errors: 0,
        }
    }

    /// Record a snapshot taken now.
    pub fn update(&mut self, record: &SnapshotRecord) {
        self.update_at(record, SystemTime::now());
    }

    /// Record a snapshot taken at `time`.
    pub fn update_at(&mut self, record: &SnapshotRecord, time: SystemTime) {
        self.tx.push(record.tx_mbps);
        self.rx.push(record.rx_mbps);
        self.latency.push(record.latency_ns as f64);
        self.timestamps.push(time);
        self.connections = record.connections;
        self.errors = record.errors;
    }

    /// History of one metric, oldest first.
    pub fn window(&self, metric: Metric) -> &RollingWindow<f64> {
        match metric {
            Metric::Tx => &self.tx,
            Metric::Rx => &self.rx,
            Metric::Latency => &self.latency,
        }
    }

    /// Most recent value, or `None` before the first update.
    pub fn latest(&self, metric: Metric) -> Option<f64> {
        self.window(metric).latest().copied()
    }

    /// Maximum over the window, or 0 if it is empty.
    pub fn peak(&self, metric: Metric) -> f64 {
        self.window(metric).iter().copied().fold(0.0, f64::max)
    }

    /// Number of samples currently held.
    pub fn samples(&self) -> usize {
        self.timestamps.len()
    }

    /// Sample instants, oldest first, parallel to the metric windows.
    pub fn timestamps(&self) -> &RollingWindow<SystemTime> {
        &self.timestamps
    }

    /// When the newest sample was taken.
    pub fn last_sample_time(&self) -> Option<SystemTime> {
        self.timestamps.latest().copied()
    }

    /// Age of the newest sample relative to `now`.
    ///
    /// Clock steps backwards report zero rather than failing.
    pub fn sample_age(&self, now: SystemTime) -> Option<Duration> {
        let last = self.last_sample_time()?;
        Some(now.duration_since(last).unwrap_or_default())
    }
}
