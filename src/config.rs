//! Runtime settings.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `PERFMON_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::{ScaleFloors, DEFAULT_WINDOW_SIZE};
use crate::error::ConfigError;
use crate::source::DEFAULT_STATS_PATH;

/// Prefix for environment overrides, e.g. `PERFMON_INTERVAL_SECS=0.5`.
pub const ENV_PREFIX: &str = "PERFMON";

/// Drawing rows per graph, not counting its title line.
pub const DEFAULT_GRAPH_HEIGHT: u16 = 8;

/// Resolved monitor settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Seconds between samples.
    pub interval_secs: f64,
    /// Statistics file to sample.
    pub stats_file: PathBuf,
    /// Samples kept per metric.
    pub window_size: usize,
    /// Drawing rows per graph.
    pub graph_height: u16,
    /// Pause after a failed read before retrying.
    pub retry_delay_ms: u64,
    /// Throughput ceiling floor (MB/s).
    pub throughput_floor: f64,
    /// Latency ceiling floor (ns).
    pub latency_floor: f64,
}

impl Default for Settings {
    fn default() -> Self {
        let floors = ScaleFloors::default();
        Self {
            interval_secs: 1.0,
            stats_file: PathBuf::from(DEFAULT_STATS_PATH),
            window_size: DEFAULT_WINDOW_SIZE,
            graph_height: DEFAULT_GRAPH_HEIGHT,
            retry_delay_ms: 1000,
            throughput_floor: floors.throughput,
            latency_floor: floors.latency,
        }
    }
}

/// Values given on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub interval_secs: Option<f64>,
    pub stats_file: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from all layers and validate them.
    pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("interval_secs", defaults.interval_secs)?
            .set_default("stats_file", defaults.stats_file.display().to_string())?
            .set_default("window_size", defaults.window_size as i64)?
            .set_default("graph_height", i64::from(defaults.graph_height))?
            .set_default("retry_delay_ms", defaults.retry_delay_ms as i64)?
            .set_default("throughput_floor", defaults.throughput_floor)?
            .set_default("latency_floor", defaults.latency_floor)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("interval_secs", overrides.interval_secs)?
            .set_override_option(
                "stats_file",
                overrides.stats_file.as_ref().map(|p| p.display().to_string()),
            )?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the monitor cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.interval_secs.is_finite() || self.interval_secs <= 0.0 {
            return Err(ConfigError::Invalid {
                key: "interval_secs",
                reason: format!("must be a positive number of seconds, got {}", self.interval_secs),
            });
        }
        if self.window_size == 0 {
            return Err(ConfigError::Invalid {
                key: "window_size",
                reason: "must keep at least one sample".to_string(),
            });
        }
        if self.graph_height < 2 {
            return Err(ConfigError::Invalid {
                key: "graph_height",
                reason: format!("must be at least 2 rows, got {}", self.graph_height),
            });
        }
        for (key, floor) in [
            ("throughput_floor", self.throughput_floor),
            ("latency_floor", self.latency_floor),
        ] {
            if !floor.is_finite() || floor <= 0.0 {
                return Err(ConfigError::Invalid {
                    key,
                    reason: format!("must be positive, got {}", floor),
                });
            }
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.interval_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn floors(&self) -> ScaleFloors {
        ScaleFloors {
            throughput: self.throughput_floor,
            latency: self.latency_floor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None, &Overrides::default()).unwrap();
        assert_eq!(settings.interval(), Duration::from_secs(1));
        assert_eq!(settings.window_size, 60);
        assert_eq!(settings.graph_height, 8);
        assert_eq!(settings.floors(), ScaleFloors::default());
        assert_eq!(settings.retry_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_file_layer() {
        let file = toml_file("interval_secs = 0.25\nwindow_size = 120\nlatency_floor = 500.0\n");
        let settings = Settings::load(Some(file.path()), &Overrides::default()).unwrap();
        assert_eq!(settings.interval(), Duration::from_millis(250));
        assert_eq!(settings.window_size, 120);
        assert_eq!(settings.latency_floor, 500.0);
        assert_eq!(settings.throughput_floor, 100.0);
    }

    #[test]
    fn test_cli_overrides_win() {
        let file = toml_file("interval_secs = 5.0\nstats_file = \"/from/file\"\n");
        let overrides = Overrides {
            interval_secs: Some(0.5),
            stats_file: Some(PathBuf::from("/from/cli")),
        };
        let settings = Settings::load(Some(file.path()), &overrides).unwrap();
        assert_eq!(settings.interval_secs, 0.5);
        assert_eq!(settings.stats_file, PathBuf::from("/from/cli"));
    }

    #[test]
    fn test_rejects_bad_interval() {
        let overrides = Overrides {
            interval_secs: Some(0.0),
            ..Default::default()
        };
        let err = Settings::load(None, &overrides).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "interval_secs", .. }));
    }

    #[test]
    fn test_rejects_tiny_graph() {
        let settings = Settings {
            graph_height: 1,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let result = Settings::load(Some(Path::new("/nonexistent/perfmon.toml")), &Overrides::default());
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
