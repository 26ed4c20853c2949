//! Field extraction from the driver's statistics text.
//!
//! The statistics file is free-form diagnostic text. Each field has its own
//! pattern and is searched for independently, so reordered sections, extra
//! lines or a missing block never spoil the rest of the record. A field
//! that cannot be found reads as zero.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// One tick's worth of numeric fields pulled from the statistics text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SnapshotRecord {
    /// DMA transmit throughput in MB/s.
    pub tx_mbps: f64,
    /// DMA receive throughput in MB/s.
    pub rx_mbps: f64,
    /// Average DMA latency in nanoseconds.
    pub latency_ns: u64,
    /// Thunderbolt connection count.
    pub connections: u64,
    /// Thunderbolt error count.
    pub errors: u64,
}

/// A field of [`SnapshotRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    TxMbps,
    RxMbps,
    LatencyNs,
    Connections,
    Errors,
}

/// A parsed field value, typed by the rule that produced it.
///
/// Counters stay integral end to end so large `u64` values survive intact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Integer(u64),
}

/// How the captured text of a field is turned into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Float,
    Integer,
}

/// A single extraction rule: the field it fills and the pattern whose first
/// capture group holds the value.
struct FieldRule {
    field: Field,
    pattern: &'static str,
    kind: ValueKind,
}

/// Extraction rules, evaluated in order.
///
/// The throughput patterns are non-greedy so the first `(n MB/s)` after the
/// prefix is taken when both directions share a line.
const RULES: &[FieldRule] = &[
    FieldRule {
        field: Field::TxMbps,
        pattern: r"TX:.*?\(([\d.]+) MB/s\)",
        kind: ValueKind::Float,
    },
    FieldRule {
        field: Field::RxMbps,
        pattern: r"RX:.*?\(([\d.]+) MB/s\)",
        kind: ValueKind::Float,
    },
    FieldRule {
        field: Field::LatencyNs,
        pattern: r"Average:\s+(\d+)\s+ns",
        kind: ValueKind::Integer,
    },
    FieldRule {
        field: Field::Connections,
        pattern: r"Connections:\s+(\d+)",
        kind: ValueKind::Integer,
    },
    FieldRule {
        field: Field::Errors,
        pattern: r"Errors:\s+(\d+)",
        kind: ValueKind::Integer,
    },
];

struct CompiledRule {
    field: Field,
    regex: Regex,
    kind: ValueKind,
}

// The patterns are literals covered by tests; a failure here is a build defect.
static COMPILED: LazyLock<Vec<CompiledRule>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|rule| CompiledRule {
            field: rule.field,
            regex: Regex::new(rule.pattern).expect("extraction pattern must compile"),
            kind: rule.kind,
        })
        .collect()
});

impl CompiledRule {
    fn apply(&self, text: &str) -> Option<FieldValue> {
        let captured = self.regex.captures(text)?.get(1)?.as_str();
        match self.kind {
            ValueKind::Float => captured
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(FieldValue::Float),
            ValueKind::Integer => captured.parse::<u64>().ok().map(FieldValue::Integer),
        }
    }
}

/// Extract a single field, or `None` if its pattern does not match or the
/// captured number is malformed.
pub fn extract_field(field: Field, text: &str) -> Option<FieldValue> {
    COMPILED.iter().find(|rule| rule.field == field)?.apply(text)
}

/// Extract every known field from a statistics snapshot.
///
/// Never fails: absent or malformed fields are reported as zero.
pub fn extract(text: &str) -> SnapshotRecord {
    let mut record = SnapshotRecord::default();

    for rule in COMPILED.iter() {
        let Some(value) = rule.apply(text) else {
            continue;
        };
        match (rule.field, value) {
            (Field::TxMbps, FieldValue::Float(v)) => record.tx_mbps = v,
            (Field::RxMbps, FieldValue::Float(v)) => record.rx_mbps = v,
            (Field::LatencyNs, FieldValue::Integer(v)) => record.latency_ns = v,
            (Field::Connections, FieldValue::Integer(v)) => record.connections = v,
            (Field::Errors, FieldValue::Integer(v)) => record.errors = v,
            // RULES pairs every field with its value kind
            _ => {}
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRIVER_OUTPUT: &str = "\
Anarchy eGPU Performance Statistics
DMA Transfers:
  TX: 18234 transfers, 734003200 bytes (1523.75 MB/s)
  RX: 9120 transfers, 367001600 bytes (761.20 MB/s)
DMA Latency:
  Minimum: 120 ns
  Average: 845 ns
  Maximum: 4410 ns
Thunderbolt:
  Connections: 3
  Errors: 1
";

    #[test]
    fn test_extract_single_line() {
        let text =
            "TX: foo (12.50 MB/s) RX: bar (3.00 MB/s) Average: 450 ns Connections: 2 Errors: 0";
        let record = extract(text);
        assert_eq!(
            record,
            SnapshotRecord {
                tx_mbps: 12.5,
                rx_mbps: 3.0,
                latency_ns: 450,
                connections: 2,
                errors: 0,
            }
        );
    }

    #[test]
    fn test_extract_driver_output() {
        let record = extract(DRIVER_OUTPUT);
        assert_eq!(record.tx_mbps, 1523.75);
        assert_eq!(record.rx_mbps, 761.20);
        assert_eq!(record.latency_ns, 845);
        assert_eq!(record.connections, 3);
        assert_eq!(record.errors, 1);
    }

    #[test]
    fn test_extract_nothing_recognisable() {
        assert_eq!(extract("driver not loaded"), SnapshotRecord::default());
        assert_eq!(extract(""), SnapshotRecord::default());
    }

    #[test]
    fn test_missing_fields_are_zero_others_intact() {
        let text = "RX: x (8.25 MB/s)\nErrors: 4\n";
        let record = extract(text);
        assert_eq!(record.tx_mbps, 0.0);
        assert_eq!(record.rx_mbps, 8.25);
        assert_eq!(record.latency_ns, 0);
        assert_eq!(record.connections, 0);
        assert_eq!(record.errors, 4);
    }

    #[test]
    fn test_fields_in_any_order() {
        let text = "Errors: 9\nConnections: 5\nAverage:  77  ns\nRX: (1.5 MB/s)\nTX: (2.5 MB/s)";
        let record = extract(text);
        assert_eq!(record.tx_mbps, 2.5);
        assert_eq!(record.rx_mbps, 1.5);
        assert_eq!(record.latency_ns, 77);
        assert_eq!(record.connections, 5);
        assert_eq!(record.errors, 9);
    }

    #[test]
    fn test_throughput_does_not_span_lines() {
        // TX line lacks a rate; the RX rate on the next line must not leak into TX
        let text = "TX: idle\nRX: busy (42.00 MB/s)";
        assert_eq!(extract_field(Field::TxMbps, text), None);
        assert_eq!(extract_field(Field::RxMbps, text), Some(FieldValue::Float(42.0)));
    }

    #[test]
    fn test_malformed_number_is_absent() {
        assert_eq!(extract_field(Field::TxMbps, "TX: (1.2.3 MB/s)"), None);
        assert_eq!(extract("TX: (1.2.3 MB/s)").tx_mbps, 0.0);
        assert_eq!(extract("Errors: 99999999999999999999999").errors, 0);
    }

    #[test]
    fn test_latency_requires_ns_unit() {
        assert_eq!(extract_field(Field::LatencyNs, "Average: 450 us"), None);
        assert_eq!(
            extract_field(Field::LatencyNs, "Average:\t450\tns"),
            Some(FieldValue::Integer(450))
        );
        // At least one whitespace is required after the colon
        assert_eq!(extract_field(Field::LatencyNs, "Average:450 ns"), None);
    }

    #[test]
    fn test_large_counters_keep_full_precision() {
        // 2^53 + 1 is not representable as f64
        let record = extract("Errors: 9007199254740993\nAverage: 18446744073709551615 ns\n");
        assert_eq!(record.errors, 9_007_199_254_740_993);
        assert_eq!(record.latency_ns, u64::MAX);
        assert_eq!(
            extract_field(Field::Connections, "Connections: 9007199254740993"),
            Some(FieldValue::Integer(9_007_199_254_740_993))
        );
    }

    #[test]
    fn test_every_rule_compiles() {
        assert_eq!(COMPILED.len(), RULES.len());
    }
}
