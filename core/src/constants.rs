//! constants.rs
//! Framing bytes and buffer bounds shared by the serializer and its adapters.

/// Byte placed between two encoded records.
pub const SEPARATOR: u8 = b',';

/// Default JSON array frame.
pub const JSON_ARRAY_HEAD: &[u8] = b"[";
pub const JSON_ARRAY_TAIL: &[u8] = b"]";

/// Push buffer used by `drain_into` when the options do not override it.
pub const DEFAULT_DRAIN_BUFFER_SIZE: usize = 8 * 1024; // 8 KiB

/// Smallest push buffer accepted. One byte is slow but valid.
pub const MIN_DRAIN_BUFFER_SIZE: usize = 1;
/// Max push buffer sanity bound (16 MiB).
pub const MAX_DRAIN_BUFFER_SIZE: usize = 16 * 1024 * 1024;
