//! Metric names and recording helpers for the emoji scraper.
//!
//! Everything goes through the `metrics` facade; without an installed
//! recorder the calls are no-ops.

use std::fmt;

/// Enum representing all metric names used in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Source fetches (catalog and name table)
    SourcesFetchSuccess,
    SourcesFetchError,
    SourcesPayloadBytes,

    // Image host probes
    ProbeExists,
    ProbeMissing,
    ProbeUnreachable,
    ProbeDuration,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::SourcesFetchSuccess => "emoji_source_fetch_success_total",
            MetricName::SourcesFetchError => "emoji_source_fetch_error_total",
            MetricName::SourcesPayloadBytes => "emoji_source_payload_bytes",
            MetricName::ProbeExists => "emoji_probe_exists_total",
            MetricName::ProbeMissing => "emoji_probe_missing_total",
            MetricName::ProbeUnreachable => "emoji_probe_unreachable_total",
            MetricName::ProbeDuration => "emoji_probe_duration_seconds",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub mod sources {
    use super::MetricName;

    pub fn fetch_success(source: &'static str) {
        ::metrics::counter!(MetricName::SourcesFetchSuccess.as_str(), "source" => source).increment(1);
    }

    pub fn fetch_error(source: &'static str) {
        ::metrics::counter!(MetricName::SourcesFetchError.as_str(), "source" => source).increment(1);
    }

    pub fn payload_bytes(source: &'static str, bytes: usize) {
        ::metrics::histogram!(MetricName::SourcesPayloadBytes.as_str(), "source" => source)
            .record(bytes as f64);
    }
}

pub mod probes {
    use super::MetricName;
    use crate::app::ports::ProbeOutcome;
    use crate::common::constants::TWEMOJI_SOURCE;

    /// Count one probe by outcome and record how long it took
    pub fn record(outcome: &ProbeOutcome, secs: f64) {
        let name = match outcome {
            ProbeOutcome::Exists => MetricName::ProbeExists,
            ProbeOutcome::Missing { .. } => MetricName::ProbeMissing,
            ProbeOutcome::Unreachable { .. } => MetricName::ProbeUnreachable,
        };
        ::metrics::counter!(name.as_str(), "source" => TWEMOJI_SOURCE).increment(1);
        ::metrics::histogram!(MetricName::ProbeDuration.as_str(), "source" => TWEMOJI_SOURCE)
            .record(secs);
    }
}
