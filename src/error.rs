use thiserror::Error;

/// Terminal failures for a decode attempt. Decoding is one-shot: every
/// variant aborts the attempt, nothing is retried.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Stream byte length does not divide into whole elements.
    #[error("stream of {len} bytes is not a multiple of the {element_size}-byte element size")]
    MalformedStream { len: usize, element_size: usize },

    /// No full-width column found while scanning for the trim point.
    #[error("no full-width column among {columns} demultiplexed columns; stream too short for this configuration")]
    InsufficientData { columns: usize },

    /// Coefficient and metadata matrices disagree after independent decodes.
    #[error("coefficient matrix shape {coefficients:?} does not match metadata shape {metadata:?}")]
    ShapeMismatch {
        coefficients: (usize, usize),
        metadata: (usize, usize),
    },

    #[error("invalid decoder configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
