//! Raw stream parsing: byte buffers into typed element slices.
//!
//! Both streams are headerless. Coefficients are stored as consecutive
//! little-endian `f32` pairs (real, imaginary); metadata is one signed byte
//! per coefficient.

use crate::error::DecodeError;
use num_complex::Complex32;

/// Wire size of one complex coefficient: two little-endian `f32`s.
pub const COEFFICIENT_SIZE: usize = 8;

/// Parse the coefficient stream. The byte length must divide into whole
/// coefficients; anything else means a truncated or corrupted capture.
pub fn coefficients_from_bytes(bytes: &[u8]) -> Result<Vec<Complex32>, DecodeError> {
    if bytes.len() % COEFFICIENT_SIZE != 0 {
        return Err(DecodeError::MalformedStream {
            len: bytes.len(),
            element_size: COEFFICIENT_SIZE,
        });
    }

    Ok(bytes
        .chunks_exact(COEFFICIENT_SIZE)
        .map(|chunk| {
            let re = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            let im = f32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]);
            Complex32::new(re, im)
        })
        .collect())
}

/// View the metadata stream as signed scalars. One byte per element, so any
/// length is aligned.
pub fn metadata_from_bytes(bytes: &[u8]) -> &[i8] {
    bytemuck::cast_slice(bytes)
}
