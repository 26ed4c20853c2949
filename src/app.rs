//! Application state and the tick driver.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::data::{apply_snapshot, MetricStore, Scale, SnapshotRecord};
use crate::source::DataSource;
use crate::ui::Theme;

/// A control command from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Stop the monitor.
    Quit,
    /// Drop both scale ceilings back to their floors.
    ResetScale,
}

/// Something that moves the run state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    /// A tick completed with a fresh snapshot.
    TickElapsed,
    /// The user issued a command.
    Command(Command),
    /// Reading the snapshot source failed.
    SourceReadFailed(String),
    /// Drawing the frame or polling for input failed.
    FrameFailed(String),
}

/// Lifecycle of the monitor loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    /// Sampling normally.
    Running,
    /// The last read or frame failed; the next attempt happens at `retry_at`.
    Paused { reason: String, retry_at: Instant },
    /// Quit was requested. Terminal.
    Terminating,
}

impl RunState {
    /// Apply an event and return the next state.
    pub fn on_event(self, event: MonitorEvent, now: Instant, retry_delay: Duration) -> RunState {
        match (self, event) {
            (RunState::Terminating, _) => RunState::Terminating,
            (_, MonitorEvent::Command(Command::Quit)) => RunState::Terminating,
            (state, MonitorEvent::Command(Command::ResetScale)) => state,
            (_, MonitorEvent::TickElapsed) => RunState::Running,
            (_, MonitorEvent::SourceReadFailed(reason) | MonitorEvent::FrameFailed(reason)) => {
                RunState::Paused {
                    reason,
                    retry_at: now + retry_delay,
                }
            }
        }
    }
}

/// Main application state.
pub struct App {
    source: Box<dyn DataSource>,
    pub store: MetricStore,
    pub scale: Scale,
    pub state: RunState,
    /// Record extracted from the most recent snapshot.
    pub last_record: Option<SnapshotRecord>,
    pub theme: Theme,
    /// Drawing rows per graph.
    pub graph_height: u16,
    interval: Duration,
    retry_delay: Duration,
    next_tick: Instant,
}

impl App {
    /// Create a new App sampling `source` with the given settings.
    ///
    /// The first tick is due immediately.
    pub fn new(source: Box<dyn DataSource>, settings: &Settings) -> Self {
        Self {
            source,
            store: MetricStore::new(settings.window_size),
            scale: Scale::new(settings.floors()),
            state: RunState::Running,
            last_record: None,
            theme: Theme::default(),
            graph_height: settings.graph_height,
            interval: settings.interval(),
            retry_delay: settings.retry_delay(),
            next_tick: Instant::now(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    pub fn is_running(&self) -> bool {
        self.state != RunState::Terminating
    }

    /// The current read or frame error, if the loop is paused on one.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RunState::Paused { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn tick_due(&self, now: Instant) -> bool {
        now >= self.next_tick
    }

    /// How long the input poll may wait before the next tick is due.
    ///
    /// Never longer than the sampling interval.
    pub fn time_until_next_tick(&self, now: Instant) -> Duration {
        self.next_tick.saturating_duration_since(now).min(self.interval)
    }

    /// Record a snapshot text and schedule the next tick one interval later.
    pub fn record_snapshot(&mut self, text: &str, now: Instant) {
        let (record, scale) = apply_snapshot(&mut self.store, self.scale, text);
        debug!(
            tx_mbps = record.tx_mbps,
            rx_mbps = record.rx_mbps,
            latency_ns = record.latency_ns,
            connections = record.connections,
            errors = record.errors,
            "sample recorded"
        );
        if scale != self.scale {
            debug!(throughput = scale.throughput, latency = scale.latency, "scale grew");
        }
        self.scale = scale;
        self.last_record = Some(record);
        self.next_tick = now + self.interval;
        self.dispatch(MonitorEvent::TickElapsed, now);
    }

    /// Run one tick: read the source and record the snapshot.
    ///
    /// A failed read pauses the loop and schedules a retry after the retry
    /// delay; it never propagates.
    pub fn tick(&mut self, now: Instant) {
        match self.source.read() {
            Ok(text) => {
                if let RunState::Paused { .. } = self.state {
                    info!("snapshot source recovered");
                }
                self.record_snapshot(&text, now);
            }
            Err(err) => {
                warn!(error = %err, "snapshot read failed");
                self.next_tick = now + self.retry_delay;
                self.dispatch(MonitorEvent::SourceReadFailed(err.to_string()), now);
            }
        }
    }

    /// Record a failure while drawing or polling the terminal.
    ///
    /// The loop pauses like it does for a failed read and the next tick is
    /// pushed back by the retry delay. Returns how long the caller should
    /// wait before drawing again.
    pub fn frame_failed(&mut self, reason: String, now: Instant) -> Duration {
        warn!(error = %reason, "frame failed");
        self.next_tick = now + self.retry_delay;
        self.dispatch(MonitorEvent::FrameFailed(reason), now);
        self.retry_delay
    }

    /// Handle a control command.
    pub fn handle_command(&mut self, command: Command, now: Instant) {
        match command {
            Command::ResetScale => {
                self.scale = self.scale.reset();
                info!(
                    throughput = self.scale.throughput,
                    latency = self.scale.latency,
                    "scale reset"
                );
            }
            Command::Quit => info!("quit requested"),
        }
        self.dispatch(MonitorEvent::Command(command), now);
    }

    fn dispatch(&mut self, event: MonitorEvent, now: Instant) {
        let state = std::mem::replace(&mut self.state, RunState::Terminating);
        self.state = state.on_event(event, now, self.retry_delay);
    }
}
