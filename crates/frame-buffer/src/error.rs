//! Frame Buffer Error Types

use crate::Frame;
use thiserror::Error;

/// Push rejected because every live slot holds an unread frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("frame buffer full, dropped frame {0}")]
pub struct BufferFull(pub Frame);
