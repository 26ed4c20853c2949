//! Graph scale ceilings.
//!
//! Each ceiling only grows while the monitor runs: after every sample it
//! becomes `max(ceiling, 1.1 * peak)`. An explicit reset drops it back to
//! its floor so the next sample rebuilds the scale from scratch.

use super::store::{Metric, MetricStore};

/// Headroom applied above the observed peak.
pub const HEADROOM: f64 = 1.1;

/// Lower bounds the ceilings start from and return to on reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFloors {
    /// Throughput floor in MB/s.
    pub throughput: f64,
    /// Latency floor in ns.
    pub latency: f64,
}

impl Default for ScaleFloors {
    fn default() -> Self {
        Self {
            throughput: 100.0,
            latency: 1000.0,
        }
    }
}

/// Current upper bounds used to scale bar heights.
///
/// TX and RX share the throughput ceiling so their graphs are comparable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub throughput: f64,
    pub latency: f64,
    floors: ScaleFloors,
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(ScaleFloors::default())
    }
}

impl Scale {
    /// Start at the given floors.
    pub fn new(floors: ScaleFloors) -> Self {
        Self {
            throughput: floors.throughput,
            latency: floors.latency,
            floors,
        }
    }

    pub fn floors(&self) -> ScaleFloors {
        self.floors
    }

    /// Grow the ceilings to cover the peaks currently held in `store`.
    pub fn grown(self, store: &MetricStore) -> Self {
        let throughput_peak = store.peak(Metric::Tx).max(store.peak(Metric::Rx));
        let latency_peak = store.peak(Metric::Latency);
        Self {
            throughput: self.throughput.max(throughput_peak * HEADROOM),
            latency: self.latency.max(latency_peak * HEADROOM),
            floors: self.floors,
        }
    }

    /// Drop both ceilings back to their floors.
    pub fn reset(self) -> Self {
        Self::new(self.floors)
    }

    /// Ceiling used to draw `metric`.
    pub fn ceiling(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Tx | Metric::Rx => self.throughput,
            Metric::Latency => self.latency,
        }
    }
}
