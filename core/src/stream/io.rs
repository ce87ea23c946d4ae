//! stream/io.rs
//! Normalized output sinks for push drains.

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use crate::types::SerializeError;

/// Canonical output abstraction
pub enum OutputSink {
    Writer(Box<dyn Write + Send>),
    File(PathBuf),
    /// Capture into memory; the bytes come back in the report.
    Memory,
}

/// Buffer a memory sink appends to, shared with whoever collects the output.
pub type SharedBuffer = Arc<Mutex<Vec<u8>>>;

/// Normalize an output sink into a boxed writer.
///
/// `Memory` sinks also return the shared buffer the writer appends to.
pub fn open_output(sink: OutputSink) -> Result<(Box<dyn Write + Send>, Option<SharedBuffer>), SerializeError> {
    match sink {
        OutputSink::Writer(w) => Ok((w, None)),
        OutputSink::File(p) => {
            let file = std::fs::File::create(&p).map_err(SerializeError::Sink)?;
            tracing::debug!(path = %p.display(), "opened output file");
            Ok((Box::new(std::io::BufWriter::new(file)), None))
        }
        OutputSink::Memory => {
            let buf = SharedBuffer::default();
            let writer = SharedBufferWriter { buf: buf.clone() };
            Ok((Box::new(writer), Some(buf)))
        }
    }
}

struct SharedBufferWriter {
    buf: SharedBuffer,
}

impl Write for SharedBufferWriter {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        let mut guard = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
