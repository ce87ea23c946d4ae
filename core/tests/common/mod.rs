#![allow(dead_code)]

use std::cell::Cell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

use framed_stream::encoder::RecordEncoder;
use framed_stream::source::RecordSource;
use framed_stream::stream::CollectionSerializer;
use framed_stream::types::{EncodeError, SourceError};

/// Call counts observed on a `CountingSource`, shared with the test after the
/// source has moved into a serializer.
#[derive(Debug, Default)]
pub struct SourceStats {
    pub has_next_calls: Cell<usize>,
    pub next_calls: Cell<usize>,
    pub closed: Cell<usize>,
}

impl SourceStats {
    pub fn touches(&self) -> usize {
        self.has_next_calls.get() + self.next_calls.get()
    }
}

/// In-memory source that counts every call and can fail on a given `next_record` call.
pub struct CountingSource {
    records: VecDeque<String>,
    stats: Rc<SourceStats>,
    fail_on_next_call: Option<usize>,
}

impl CountingSource {
    pub fn new(records: &[&str]) -> (Self, Rc<SourceStats>) {
        let stats = Rc::new(SourceStats::default());
        let source = Self {
            records: records.iter().map(|r| r.to_string()).collect(),
            stats: stats.clone(),
            fail_on_next_call: None,
        };
        (source, stats)
    }

    /// `next_record` call number `call` (0-based) fails.
    pub fn failing_at(records: &[&str], call: usize) -> (Self, Rc<SourceStats>) {
        let (mut source, stats) = Self::new(records);
        source.fail_on_next_call = Some(call);
        (source, stats)
    }
}

impl RecordSource for CountingSource {
    type Record = String;

    fn has_next(&mut self) -> Result<bool, SourceError> {
        self.stats.has_next_calls.set(self.stats.has_next_calls.get() + 1);
        Ok(!self.records.is_empty())
    }

    fn next_record(&mut self) -> Result<Option<String>, SourceError> {
        let call = self.stats.next_calls.get();
        self.stats.next_calls.set(call + 1);
        if self.fail_on_next_call == Some(call) {
            return Err(SourceError::new("cursor lost"));
        }
        Ok(self.records.pop_front())
    }

    fn close(&mut self) {
        self.stats.closed.set(self.stats.closed.get() + 1);
    }
}

/// Raw bytes of the record; anything starting with "bad" is rejected.
pub fn raw_encoder(record: &String, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    if record.starts_with("bad") {
        return Err(EncodeError::new(format!("cannot encode {record}")));
    }
    out.extend_from_slice(record.as_bytes());
    Ok(())
}

pub type RawEncoder = fn(&String, &mut Vec<u8>) -> Result<(), EncodeError>;

pub fn raw_serializer(records: &[&str]) -> (CollectionSerializer<CountingSource, RawEncoder>, Rc<SourceStats>) {
    let (source, stats) = CountingSource::new(records);
    let serializer = CollectionSerializer::builder(source, raw_encoder as RawEncoder)
        .head("[")
        .tail("]")
        .build()
        .expect("valid config");
    (serializer, stats)
}

/// Pull until end of stream with a fixed buffer size.
pub fn pull_all<S, E>(serializer: &mut CollectionSerializer<S, E>, buf_size: usize) -> Vec<u8>
where
    S: RecordSource,
    E: RecordEncoder<S::Record>,
{
    let mut out = Vec::new();
    let mut buf = vec![0u8; buf_size];
    loop {
        let n = serializer.fill(&mut buf).expect("fill should succeed");
        if n == 0 {
            break;
        }
        assert!(n <= buf_size);
        out.extend_from_slice(&buf[..n]);
    }
    out
}

/// Writer that accepts `limit` bytes and then fails every write.
pub struct FailingWriter {
    pub accepted: Vec<u8>,
    pub limit: usize,
}

impl FailingWriter {
    pub fn new(limit: usize) -> Self {
        Self { accepted: Vec::new(), limit }
    }
}

impl Write for FailingWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let room = self.limit - self.accepted.len();
        if room == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "peer went away"));
        }
        let n = room.min(data.len());
        self.accepted.extend_from_slice(&data[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
