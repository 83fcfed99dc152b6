//! Value-sink capability — the engine's only view of a destination.

use std::fmt;

use thiserror::Error;

/// A destination's refusal of one token.
///
/// Produced by the caller-supplied sink closure when a token cannot be
/// converted into the field's native type; the resolver wraps it with the
/// slot name and offending value.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SinkRejection {
    message: String,
}

impl SinkRejection {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Closure signature for accepting one matched token.
pub type SinkFn = Box<dyn FnMut(&str) -> Result<(), SinkRejection> + Send>;

/// The capability a slot writes matched tokens into.
///
/// The engine never sees type metadata — only whether the destination holds
/// a single value or appends every accepted token.
pub enum SlotSink {
    /// Single-value destination. Repeated writes are the closure's business.
    Scalar(SinkFn),
    /// Collection destination — appends every accepted token.
    Container(SinkFn),
}

impl SlotSink {
    pub(crate) fn accept(&mut self, token: &str) -> Result<(), SinkRejection> {
        match self {
            Self::Scalar(sink) | Self::Container(sink) => sink(token),
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Self::Container(_))
    }
}

impl fmt::Debug for SlotSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(_) => f.write_str("SlotSink::Scalar"),
            Self::Container(_) => f.write_str("SlotSink::Container"),
        }
    }
}
