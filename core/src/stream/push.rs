//! Push adapter: drain the stream into a sink through the pull adapter.

use std::io::Write;
use std::time::Instant;

use crate::encoder::RecordEncoder;
use crate::source::RecordSource;
use crate::stream::serializer::CollectionSerializer;
use crate::telemetry::Stage;
use crate::types::SerializeError;

impl<S, E> CollectionSerializer<S, E>
where
    S: RecordSource,
    E: RecordEncoder<S::Record>,
{
    /// Write everything that is left into `sink`, then flush it.
    ///
    /// Returns the number of bytes written by this call. A failed write ends
    /// the stream immediately; the serializer is done afterwards and the
    /// error is not retried.
    pub fn drain_into<W: Write + ?Sized>(&mut self, sink: &mut W) -> Result<u64, SerializeError> {
        let mut buf = vec![0u8; self.options.drain_buffer_size];
        let mut total = 0u64;

        loop {
            let n = self.fill(&mut buf)?;
            if n == 0 {
                break;
            }

            let started = Instant::now();
            let written = sink.write_all(&buf[..n]);
            self.machine.timer_mut().add_stage_time(Stage::Write, started.elapsed());
            if let Err(e) = written {
                tracing::error!(error = %e, written = total, "sink write failed");
                self.machine.terminate();
                return Err(SerializeError::Sink(e));
            }
            total += n as u64;
        }

        sink.flush().map_err(SerializeError::Sink)?;
        Ok(total)
    }
}
