//! The single-use serializer owning one frame walk over one record source.

use crate::source::RecordSource;
use crate::stream::config::{SerializerBuilder, SerializerConfig, SerializerOptions};
use crate::stream::framing::{FrameMachine, FrameState};
use crate::telemetry::{SerializeReport, SerializerCounters};
use crate::types::SerializeError;

/// Streams `head + record₁ + "," + … + recordₙ + tail`.
///
/// Consumed either by pulling (`fill`, `Read`, `BufRead`) or by pushing into
/// a sink (`drain_into`). Both go through the same frame machine, so they
/// produce the same bytes and may be mixed on one instance.
///
/// Dropping the serializer before the end releases the record source.
pub struct CollectionSerializer<S: RecordSource, E> {
    pub(crate) machine: FrameMachine<S, E>,
    pub(crate) options: SerializerOptions,
    /// Error found after some bytes were already copied by `fill`; reported on the next call.
    pub(crate) pending_error: Option<SerializeError>,
}

impl<S: RecordSource, E> CollectionSerializer<S, E> {
    pub fn new(config: SerializerConfig, source: S, encoder: E) -> Result<Self, SerializeError> {
        config.validate()?;
        let SerializerConfig { frame, options } = config;
        let machine = FrameMachine::new(frame, source, encoder, options.on_encode_error);
        Ok(Self {
            machine,
            options,
            pending_error: None,
        })
    }

    pub fn builder(source: S, encoder: E) -> SerializerBuilder<S, E> {
        SerializerBuilder::new(source, encoder)
    }

    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    pub fn state(&self) -> FrameState {
        self.machine.state()
    }

    /// Nothing more will be produced (end of frame, error, or sink failure).
    pub fn is_done(&self) -> bool {
        self.machine.is_done() && self.pending_error.is_none()
    }

    pub fn counters(&self) -> &SerializerCounters {
        self.machine.counters()
    }

    /// Records dropped by the skip policy so far.
    pub fn skipped(&self) -> u64 {
        self.machine.counters().records_skipped
    }

    /// Snapshot of counters and timings at this point of the stream.
    pub fn report(&self) -> SerializeReport {
        SerializeReport::from(self.machine.counters(), self.machine.timer(), self.machine.is_completed())
    }
}
