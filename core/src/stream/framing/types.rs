use bytes::Bytes;
use serde_json::{Map, Value};

use crate::constants::{JSON_ARRAY_HEAD, JSON_ARRAY_TAIL};
use crate::types::SerializeError;

/// Fixed shape of the output: `head + records + tail`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    head: Bytes,
    tail: Bytes,
}

impl Frame {
    pub fn new(head: impl Into<Bytes>, tail: impl Into<Bytes>) -> Self {
        Self { head: head.into(), tail: tail.into() }
    }

    /// `[` ... `]`
    pub fn json_array() -> Self {
        Self::new(Bytes::from_static(JSON_ARRAY_HEAD), Bytes::from_static(JSON_ARRAY_TAIL))
    }

    /// Records wrapped as an array member of a JSON object:
    ///
    /// ```text
    /// {<preamble members>,"<key>":[ ... ]}
    /// ```
    ///
    /// Preamble members keep their map order. `key` must not already be a
    /// preamble member.
    pub fn json_envelope(preamble: &Map<String, Value>, key: &str) -> Result<Self, SerializeError> {
        if preamble.contains_key(key) {
            return Err(SerializeError::Validation(format!(
                "envelope key {key:?} collides with a preamble member"
            )));
        }

        let invalid = |e: serde_json::Error| SerializeError::Validation(e.to_string());

        let mut head = serde_json::to_vec(preamble).map_err(invalid)?;
        // Reopen the serialized object: drop the closing brace.
        head.pop();
        if !preamble.is_empty() {
            head.push(b',');
        }
        serde_json::to_writer(&mut head, key).map_err(invalid)?;
        head.extend_from_slice(b":[");

        Ok(Self::new(head, Bytes::from_static(b"]}")))
    }

    pub fn with_head(self, head: impl Into<Bytes>) -> Self {
        Self { head: head.into(), ..self }
    }

    pub fn with_tail(self, tail: impl Into<Bytes>) -> Self {
        Self { tail: tail.into(), ..self }
    }

    pub fn head(&self) -> &Bytes {
        &self.head
    }

    pub fn tail(&self) -> &Bytes {
        &self.tail
    }

    /// Head + tail length.
    pub fn overhead_len(&self) -> usize {
        self.head.len() + self.tail.len()
    }
}

/// Progress through the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    InHead,
    InRecord,
    InTail,
    Done,
}

/// Which part of the frame a staged chunk came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    Head,
    Record,
    Tail,
}

/// The single in-flight span plus how much of it was delivered.
#[derive(Debug, Clone)]
pub struct StagedChunk {
    kind: ChunkKind,
    bytes: Bytes,
    cursor: usize,
}

impl StagedChunk {
    pub fn new(kind: ChunkKind, bytes: Bytes) -> Self {
        Self { kind, bytes, cursor: 0 }
    }

    pub fn kind(&self) -> ChunkKind {
        self.kind
    }

    /// Bytes not yet delivered.
    #[inline]
    pub fn remaining(&self) -> &[u8] {
        &self.bytes[self.cursor..]
    }

    /// Advance the cursor, clamped to the span length. Returns the amount advanced.
    #[inline]
    pub fn advance(&mut self, n: usize) -> usize {
        let n = n.min(self.bytes.len() - self.cursor);
        self.cursor += n;
        n
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.bytes.len()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn delivered(&self) -> usize {
        self.cursor
    }
}
