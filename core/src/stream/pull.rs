//! Pull adapter: copy staged bytes into caller buffers of any size.

use std::io::{self, BufRead, Read};

use crate::encoder::RecordEncoder;
use crate::source::RecordSource;
use crate::stream::serializer::CollectionSerializer;
use crate::types::SerializeError;

impl<S, E> CollectionSerializer<S, E>
where
    S: RecordSource,
    E: RecordEncoder<S::Record>,
{
    /// Fill `buf` with up to `buf.len()` bytes of the stream.
    ///
    /// Coalesces across head, record and tail boundaries until the buffer is
    /// full or the frame ends; a partially copied chunk is kept for the next
    /// call. Returns `Ok(0)` at end of stream, and on every call after it,
    /// without touching the record source. An empty `buf` also yields `Ok(0)`.
    ///
    /// If an error is hit after bytes were already copied, those bytes are
    /// returned and the error is reported by the next call.
    pub fn fill(&mut self, buf: &mut [u8]) -> Result<usize, SerializeError> {
        if let Some(err) = self.pending_error.take() {
            return Err(err);
        }
        self.machine.counters_mut().add_fill_call();

        let mut written = 0;
        while written < buf.len() {
            let chunk = match self.machine.next_chunk() {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(err) if written == 0 => return Err(err),
                Err(err) => {
                    self.pending_error = Some(err);
                    break;
                }
            };

            let n = chunk.len().min(buf.len() - written);
            buf[written..written + n].copy_from_slice(&chunk[..n]);
            written += n;
            self.machine.consume(n);
        }

        // The consumer has now seen the end; stop the clock here so push
        // writes of the last chunk fall inside the elapsed time.
        if written == 0 && self.machine.is_done() {
            self.machine.timer_mut().finish();
        }
        Ok(written)
    }
}

impl<S, E> Read for CollectionSerializer<S, E>
where
    S: RecordSource,
    E: RecordEncoder<S::Record>,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.fill(buf)?)
    }
}

/// Zero-copy view of the staged chunk: `fill_buf` exposes it, `consume` moves the cursor.
impl<S, E> BufRead for CollectionSerializer<S, E>
where
    S: RecordSource,
    E: RecordEncoder<S::Record>,
{
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if let Some(err) = self.pending_error.take() {
            return Err(err.into());
        }
        match self.machine.next_chunk() {
            Ok(Some(chunk)) => Ok(chunk),
            Ok(None) => Ok(&[]),
            Err(err) => Err(err.into()),
        }
    }

    fn consume(&mut self, amt: usize) {
        self.machine.consume(amt);
    }
}
