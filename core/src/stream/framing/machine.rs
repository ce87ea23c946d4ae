//! stream/framing/machine.rs
//! Walks head → records → tail, staging one span at a time.
//!
//! Summary: `next_chunk` is the only producer both adapters use. A record is
//! pulled from the source only when nothing is staged, so the serializer
//! never runs more than one encoded record ahead of the consumer.

use std::time::Instant;

use bytes::Bytes;

use crate::constants::SEPARATOR;
use crate::encoder::RecordEncoder;
use crate::source::RecordSource;
use crate::stream::config::EncodeFailurePolicy;
use crate::stream::framing::types::{ChunkKind, Frame, FrameState, StagedChunk};
use crate::telemetry::{SerializerCounters, Stage, TelemetryTimer};
use crate::types::SerializeError;

pub struct FrameMachine<S: RecordSource, E> {
    frame: Frame,
    state: FrameState,
    staged: Option<StagedChunk>,
    source: S,
    encoder: E,
    policy: EncodeFailurePolicy,
    /// Capacity for the next encode buffer (last staged record length).
    size_hint: usize,
    source_closed: bool,
    completed: bool,
    counters: SerializerCounters,
    timer: TelemetryTimer,
}

impl<S: RecordSource, E> FrameMachine<S, E> {
    pub fn new(frame: Frame, source: S, encoder: E, policy: EncodeFailurePolicy) -> Self {
        Self {
            frame,
            state: FrameState::InHead,
            staged: None,
            source,
            encoder,
            policy,
            size_hint: 0,
            source_closed: false,
            completed: false,
            counters: SerializerCounters::default(),
            timer: TelemetryTimer::new(),
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn is_done(&self) -> bool {
        self.state == FrameState::Done
    }

    /// True only when the tail was fully delivered.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn staged(&self) -> Option<&StagedChunk> {
        self.staged.as_ref()
    }

    pub fn counters(&self) -> &SerializerCounters {
        &self.counters
    }

    pub(crate) fn counters_mut(&mut self) -> &mut SerializerCounters {
        &mut self.counters
    }

    pub fn timer(&self) -> &TelemetryTimer {
        &self.timer
    }

    pub(crate) fn timer_mut(&mut self) -> &mut TelemetryTimer {
        &mut self.timer
    }

    /// Mark `n` bytes of the staged chunk as delivered.
    ///
    /// A chunk is retired as soon as its last byte is taken, so the head
    /// hands over to the records and a delivered tail ends the frame without
    /// another call.
    pub fn consume(&mut self, n: usize) {
        let Some(chunk) = self.staged.as_mut() else {
            return;
        };
        let taken = chunk.advance(n);
        self.counters.add_delivered(taken);
        if chunk.is_exhausted() {
            self.retire();
        }
    }

    /// Stop the stream where it is. Nothing more is produced and the source
    /// is released.
    pub fn terminate(&mut self) {
        if self.state != FrameState::Done {
            tracing::debug!(state = ?self.state, "frame terminated early");
        }
        self.state = FrameState::Done;
        self.staged = None;
        self.close_source();
        self.timer.finish();
    }

    fn retire(&mut self) {
        let Some(chunk) = self.staged.take() else {
            return;
        };
        match chunk.kind() {
            ChunkKind::Head => self.state = FrameState::InRecord,
            ChunkKind::Record => {}
            ChunkKind::Tail => self.finish(),
        }
    }

    fn finish(&mut self) {
        self.completed = true;
        self.state = FrameState::Done;
        self.staged = None;
        self.close_source();
        tracing::debug!(
            records = self.counters.records_encoded,
            skipped = self.counters.records_skipped,
            bytes = self.counters.bytes_delivered,
            "frame complete"
        );
    }

    fn close_source(&mut self) {
        if !self.source_closed {
            self.source_closed = true;
            self.source.close();
        }
    }
}

impl<S, E> FrameMachine<S, E>
where
    S: RecordSource,
    E: RecordEncoder<S::Record>,
{
    /// Remaining bytes of the current span, staging the next one if needed.
    ///
    /// `Ok(None)` once the frame is done, on every later call too, without
    /// touching the source. An error ends the frame.
    pub fn next_chunk(&mut self) -> Result<Option<&[u8]>, SerializeError> {
        self.timer.start();
        match self.ensure_staged() {
            Ok(true) => Ok(self.staged.as_ref().map(StagedChunk::remaining)),
            Ok(false) => Ok(None),
            Err(e) => {
                tracing::warn!(error = %e, "stream terminated");
                self.terminate();
                Err(e)
            }
        }
    }

    fn ensure_staged(&mut self) -> Result<bool, SerializeError> {
        loop {
            // Exhausted chunks are retired in `consume`, so a staged chunk always has bytes left.
            if self.staged.is_some() {
                return Ok(true);
            }

            match self.state {
                FrameState::InHead => {
                    if self.frame.head().is_empty() {
                        self.state = FrameState::InRecord;
                    } else {
                        self.counters.add_head(self.frame.head().len());
                        self.staged = Some(StagedChunk::new(ChunkKind::Head, self.frame.head().clone()));
                    }
                }
                FrameState::InRecord => match self.stage_record()? {
                    Some(chunk) => self.staged = Some(chunk),
                    None => {
                        tracing::debug!(records = self.counters.records_pulled, "record source exhausted");
                        self.state = FrameState::InTail;
                    }
                },
                FrameState::InTail => {
                    if self.frame.tail().is_empty() {
                        self.finish();
                    } else {
                        self.counters.add_tail(self.frame.tail().len());
                        self.staged = Some(StagedChunk::new(ChunkKind::Tail, self.frame.tail().clone()));
                    }
                }
                FrameState::Done => return Ok(false),
            }
        }
    }

    /// Pull, encode and stage the next record. `Ok(None)` when the source is exhausted.
    fn stage_record(&mut self) -> Result<Option<StagedChunk>, SerializeError> {
        loop {
            let started = Instant::now();
            let next = self.source.next_record();
            self.timer.add_stage_time(Stage::Source, started.elapsed());
            let Some(record) = next? else {
                return Ok(None);
            };

            let index = self.counters.records_pulled;
            self.counters.add_pulled();

            let mut buf = Vec::with_capacity(self.size_hint);
            let started = Instant::now();
            let encoded = self.encoder.encode(&record, &mut buf);
            self.timer.add_stage_time(Stage::Encode, started.elapsed());

            match encoded {
                Ok(()) => {
                    let encoded_len = buf.len();

                    // Separator is decided now and never taken back.
                    let started = Instant::now();
                    let more = self.source.has_next();
                    self.timer.add_stage_time(Stage::Source, started.elapsed());
                    let more = more?;
                    if more {
                        buf.push(SEPARATOR);
                    }
                    self.counters.add_record(encoded_len, more);

                    // An encoder may legitimately emit nothing for the last record.
                    if buf.is_empty() {
                        continue;
                    }
                    self.size_hint = buf.len();
                    return Ok(Some(StagedChunk::new(ChunkKind::Record, Bytes::from(buf))));
                }
                Err(source) => match self.policy {
                    EncodeFailurePolicy::Skip => {
                        tracing::warn!(record = index, error = %source, "skipping record that failed to encode");
                        self.counters.add_skipped();
                    }
                    EncodeFailurePolicy::Abort => {
                        return Err(SerializeError::Encode { index, source });
                    }
                },
            }
        }
    }
}

impl<S: RecordSource, E> Drop for FrameMachine<S, E> {
    fn drop(&mut self) {
        if !self.source_closed {
            tracing::debug!(state = ?self.state, "serializer dropped, closing record source");
        }
        self.close_source();
    }
}
