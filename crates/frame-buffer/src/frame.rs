//! CAN Frame Definition

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum payload bytes of a classic CAN frame
pub const MAX_DLC: usize = 8;

/// A single CAN bus frame: identifier plus a fixed 8-byte payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Frame {
    /// Frame identifier
    pub id: u32,
    /// Number of valid payload bytes (`MAX_DLC` unless a sender trims it)
    pub length: u8,
    /// Payload bytes, zero beyond the copied data
    pub payload: [u8; MAX_DLC],
}

impl Frame {
    /// The reserved "nothing available" frame: id 0, full length, zero payload
    pub const EMPTY: Frame = Frame {
        id: 0,
        length: MAX_DLC as u8,
        payload: [0; MAX_DLC],
    };

    /// Build a frame from up to 8 payload bytes
    pub fn new(id: u32, payload: &[u8]) -> Self {
        Self::with_length(id, payload, MAX_DLC)
    }

    /// Build a frame copying at most `length` bytes of `payload`
    ///
    /// Bytes past the copied prefix are zeroed. The frame layout stays
    /// fixed, so `length` on the resulting frame is always `MAX_DLC`.
    pub fn with_length(id: u32, payload: &[u8], length: usize) -> Self {
        let n = length.min(payload.len()).min(MAX_DLC);
        let mut bytes = [0u8; MAX_DLC];
        bytes[..n].copy_from_slice(&payload[..n]);

        Self {
            id,
            length: MAX_DLC as u8,
            payload: bytes,
        }
    }

    /// Valid payload bytes
    pub fn data(&self) -> &[u8] {
        let n = (self.length as usize).min(MAX_DLC);
        &self.payload[..n]
    }

    /// Whether this frame is bit-identical to the sentinel
    pub fn is_sentinel(&self) -> bool {
        *self == Self::EMPTY
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.id)?;
        for byte in self.data() {
            write!(f, " {}", byte)?;
        }
        Ok(())
    }
}
