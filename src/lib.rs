//! Decoder for interleaved Constant-Q transform streams.
//!
//! A constant-Q analysis emits one column of complex coefficients per octave,
//! at a rate that halves with each octave. The analysis engine flattens this
//! into a single headerless stream by round-robining octaves on a
//! binary-counter schedule and writing only the octaves due at each step.
//! This crate runs that schedule in reverse: it demultiplexes the flat
//! stream, trims the in-progress tail, reconstructs a dense per-bin matrix
//! with zero-order hold, and exposes native-rate row extraction plus phase
//! unwrapping for cross-octave comparison. An optional per-coefficient
//! metadata stream decodes through the identical path and is shape-checked
//! against the coefficient matrix.
//!
//! The transform itself, plotting, and CLI handling live elsewhere; this
//! crate only decodes.

pub mod companion;
pub mod config;
pub mod decode;
pub mod error;
pub mod phase;
pub mod stream;

pub use companion::{AlignedDecode, decode_aligned, decode_metadata};
pub use config::DecoderConfig;
pub use decode::matrix::DenseMatrix;
pub use error::DecodeError;

use num_complex::Complex32;
use std::fs;
use std::path::Path;
use tracing::info;

/// Decode the raw coefficient stream into a dense matrix.
pub fn decode_coefficients(
    bytes: &[u8],
    config: &DecoderConfig,
) -> Result<DenseMatrix<Complex32>, DecodeError> {
    config.validate()?;
    let elements = stream::coefficients_from_bytes(bytes)?;
    let columns = decode::demux::split_columns(&elements, config);
    let matrix = DenseMatrix::from_columns(&columns, config)?;
    info!(
        "[decode] coefficient matrix {}x{}",
        matrix.rows(),
        matrix.cols()
    );
    Ok(matrix)
}

/// Bulk-read a coefficient capture and decode it.
pub fn decode_coefficient_file(
    path: &Path,
    config: &DecoderConfig,
) -> Result<DenseMatrix<Complex32>, DecodeError> {
    let bytes = fs::read(path)?;
    decode_coefficients(&bytes, config)
}

/// Bulk-read a coefficient/metadata capture pair and decode both, verifying
/// that their shapes agree.
pub fn decode_file_pair(
    coefficient_path: &Path,
    metadata_path: &Path,
    config: &DecoderConfig,
) -> Result<AlignedDecode, DecodeError> {
    let coefficient_bytes = fs::read(coefficient_path)?;
    let metadata_bytes = fs::read(metadata_path)?;
    decode_aligned(&coefficient_bytes, &metadata_bytes, config)
}
