//! Construction parameters: the frame plus the two recognized options.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DRAIN_BUFFER_SIZE, MAX_DRAIN_BUFFER_SIZE, MIN_DRAIN_BUFFER_SIZE};
use crate::source::RecordSource;
use crate::stream::framing::Frame;
use crate::stream::serializer::CollectionSerializer;
use crate::types::SerializeError;

/// What happens when the encoder rejects a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodeFailurePolicy {
    /// Drop the record, count it in `records_skipped`, keep going.
    #[default]
    Skip,
    /// End the stream with `SerializeError::Encode`.
    Abort,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerializerOptions {
    pub on_encode_error: EncodeFailurePolicy,
    /// Size of the reusable buffer `drain_into` fills before each sink write.
    pub drain_buffer_size: usize,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            on_encode_error: EncodeFailurePolicy::Skip,
            drain_buffer_size: DEFAULT_DRAIN_BUFFER_SIZE,
        }
    }
}

impl SerializerOptions {
    pub fn validate(&self) -> Result<(), SerializeError> {
        if !(MIN_DRAIN_BUFFER_SIZE..=MAX_DRAIN_BUFFER_SIZE).contains(&self.drain_buffer_size) {
            return Err(SerializeError::Validation(format!(
                "drain_buffer_size {} outside {}..={}",
                self.drain_buffer_size, MIN_DRAIN_BUFFER_SIZE, MAX_DRAIN_BUFFER_SIZE
            )));
        }
        Ok(())
    }

    /// Parse and validate options from JSON. Missing fields take defaults,
    /// unknown fields are an error.
    pub fn from_json(raw: &str) -> Result<Self, SerializeError> {
        let options: Self = serde_json::from_str(raw)
            .map_err(|e| SerializeError::Validation(format!("invalid serializer options: {e}")))?;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializerConfig {
    pub frame: Frame,
    pub options: SerializerOptions,
}

impl SerializerConfig {
    pub fn new(frame: Frame) -> Self {
        Self { frame, options: SerializerOptions::default() }
    }

    pub fn json_array() -> Self {
        Self::new(Frame::json_array())
    }

    pub fn validate(&self) -> Result<(), SerializeError> {
        self.options.validate()
    }
}

/// Step-by-step construction. The frame defaults to a JSON array.
pub struct SerializerBuilder<S, E> {
    source: S,
    encoder: E,
    config: SerializerConfig,
}

impl<S: RecordSource, E> SerializerBuilder<S, E> {
    pub fn new(source: S, encoder: E) -> Self {
        Self { source, encoder, config: SerializerConfig::json_array() }
    }

    pub fn head(mut self, head: impl Into<Bytes>) -> Self {
        self.config.frame = self.config.frame.with_head(head);
        self
    }

    pub fn tail(mut self, tail: impl Into<Bytes>) -> Self {
        self.config.frame = self.config.frame.with_tail(tail);
        self
    }

    pub fn frame(mut self, frame: Frame) -> Self {
        self.config.frame = frame;
        self
    }

    pub fn on_encode_error(mut self, policy: EncodeFailurePolicy) -> Self {
        self.config.options.on_encode_error = policy;
        self
    }

    pub fn drain_buffer_size(mut self, size: usize) -> Self {
        self.config.options.drain_buffer_size = size;
        self
    }

    pub fn options(mut self, options: SerializerOptions) -> Self {
        self.config.options = options;
        self
    }

    pub fn build(self) -> Result<CollectionSerializer<S, E>, SerializeError> {
        CollectionSerializer::new(self.config, self.source, self.encoder)
    }
}
