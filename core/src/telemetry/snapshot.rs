//! telemetry/snapshot.rs
//!
//! Immutable report of one serializer run.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::SerializerCounters;
use crate::telemetry::timers::{StageTimes, TelemetryTimer};

/// Core serializer report.
/// Captures counters, throughput, stage timings and elapsed duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializeReport {
    pub records_pulled: u64,
    pub records_encoded: u64,
    pub records_skipped: u64,
    pub separators: u64,
    pub bytes_head: u64,
    pub bytes_records: u64,
    pub bytes_tail: u64,
    pub bytes_delivered: u64,
    pub fill_calls: u64,
    /// Whether the tail was fully delivered.
    pub completed: bool,
    pub throughput_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
    /// Captured output for in-memory sinks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Vec<u8>>,
}

impl SerializeReport {
    pub fn from(counters: &SerializerCounters, timer: &TelemetryTimer, completed: bool) -> Self {
        let elapsed = timer.elapsed();

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_delivered as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            records_pulled: counters.records_pulled,
            records_encoded: counters.records_encoded,
            records_skipped: counters.records_skipped,
            separators: counters.separators,
            bytes_head: counters.bytes_head,
            bytes_records: counters.bytes_records,
            bytes_tail: counters.bytes_tail,
            bytes_delivered: counters.bytes_delivered,
            fill_calls: counters.fill_calls,
            completed,
            throughput_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times().clone(),
            output: None,
        }
    }

    pub fn attach_output(&mut self, output: Vec<u8>) {
        self.output = Some(output);
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    /// Every pulled record was either encoded or skipped.
    ///
    /// A stream aborted by an encode failure pulls one record that is neither.
    pub fn accounts_for_all_records(&self) -> bool {
        self.records_pulled == self.records_encoded + self.records_skipped
    }

    /// Invariants of a completed run:
    /// - delivered bytes match staged head + records + separators + tail
    /// - one separator between each pair of encoded records (skip policy can add one)
    /// - stage time never exceeds elapsed time
    pub fn sanity_check(&self) -> bool {
        let staged = self.bytes_head + self.bytes_records + self.separators + self.bytes_tail;
        let max_separators = self.records_encoded.saturating_sub(1) + self.records_skipped.min(1);
        self.completed
            && self.bytes_delivered == staged
            && self.separators <= max_separators
            && self.total_stage_time() <= self.elapsed
    }

    pub fn output_bytes(&self) -> u64 {
        self.bytes_delivered
    }
}
