//! telemetry/counters.rs
//! Mutable counters updated while a serializer runs.
//!
//! Summary: staged bytes are counted per frame part when a chunk is staged,
//! delivered bytes when the consumer takes them. Converted into an immutable
//! SerializeReport on demand.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Deterministic counters collected during serialization
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SerializerCounters {
    pub records_pulled: u64,
    pub records_encoded: u64,
    pub records_skipped: u64,
    pub separators: u64,
    pub bytes_head: u64,
    pub bytes_records: u64,
    pub bytes_tail: u64,
    pub bytes_delivered: u64,
    pub fill_calls: u64,
}

impl SerializerCounters {
    /// Record the head span being staged.
    pub fn add_head(&mut self, head_len: usize) {
        self.bytes_head += head_len as u64;
    }

    /// Record one successfully encoded record.
    ///
    /// - `encoded_len`: encoder output, separator excluded
    /// - `with_separator`: whether a separator byte was appended
    pub fn add_record(&mut self, encoded_len: usize, with_separator: bool) {
        self.records_encoded += 1;
        self.bytes_records += encoded_len as u64;
        if with_separator {
            self.separators += 1;
        }
    }

    /// Mark a record pulled from the source (encoded or not).
    pub fn add_pulled(&mut self) {
        self.records_pulled += 1;
    }

    /// Mark a record dropped by the skip policy.
    pub fn add_skipped(&mut self) {
        self.records_skipped += 1;
    }

    /// Record the tail span being staged.
    pub fn add_tail(&mut self, tail_len: usize) {
        self.bytes_tail += tail_len as u64;
    }

    pub fn add_delivered(&mut self, n: usize) {
        self.bytes_delivered += n as u64;
    }

    pub fn add_fill_call(&mut self) {
        self.fill_calls += 1;
    }

    /// Bytes staged so far: head + records + separators + tail.
    pub fn bytes_staged(&self) -> u64 {
        self.bytes_head + self.bytes_records + self.separators + self.bytes_tail
    }

    /// Framing overhead (everything that is not encoder output).
    pub fn framing_overhead_bytes(&self) -> u64 {
        self.bytes_head + self.separators + self.bytes_tail
    }

    pub fn merge(&mut self, other: &SerializerCounters) {
        *self += other.clone();
    }
}

impl AddAssign for SerializerCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.records_pulled  += rhs.records_pulled;
        self.records_encoded += rhs.records_encoded;
        self.records_skipped += rhs.records_skipped;
        self.separators      += rhs.separators;

        self.bytes_head      += rhs.bytes_head;
        self.bytes_records   += rhs.bytes_records;
        self.bytes_tail      += rhs.bytes_tail;
        self.bytes_delivered += rhs.bytes_delivered;
        self.fill_calls      += rhs.fill_calls;
    }
}
