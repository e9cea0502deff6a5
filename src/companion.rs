//! Companion metadata stream: decoded through the identical schedule and
//! cross-checked against the coefficient matrix.
//!
//! The analysis engine writes the metadata stream in lockstep with the
//! coefficient stream, one byte per coefficient. After both decode
//! independently, their shapes must agree exactly; divergence means a
//! corrupted capture or a producer/decoder configuration mismatch.

use crate::config::DecoderConfig;
use crate::decode::{demux, matrix::DenseMatrix};
use crate::error::DecodeError;
use crate::stream;
use num_complex::Complex32;
use tracing::info;

/// Coefficient matrix plus its shape-verified metadata companion.
#[derive(Debug, Clone)]
pub struct AlignedDecode {
    pub coefficients: DenseMatrix<Complex32>,
    pub metadata: DenseMatrix<i8>,
}

/// Decode the scalar metadata stream alone.
pub fn decode_metadata(
    bytes: &[u8],
    config: &DecoderConfig,
) -> Result<DenseMatrix<i8>, DecodeError> {
    config.validate()?;
    let elements = stream::metadata_from_bytes(bytes);
    let columns = demux::split_columns(elements, config);
    let matrix = DenseMatrix::from_columns(&columns, config)?;
    info!(
        "[decode] metadata matrix {}x{}",
        matrix.rows(),
        matrix.cols()
    );
    Ok(matrix)
}

/// Decode both streams and verify they landed on the same shape.
pub fn decode_aligned(
    coefficient_bytes: &[u8],
    metadata_bytes: &[u8],
    config: &DecoderConfig,
) -> Result<AlignedDecode, DecodeError> {
    let coefficients = crate::decode_coefficients(coefficient_bytes, config)?;
    let metadata = decode_metadata(metadata_bytes, config)?;
    align(coefficients, metadata)
}

pub(crate) fn align(
    coefficients: DenseMatrix<Complex32>,
    metadata: DenseMatrix<i8>,
) -> Result<AlignedDecode, DecodeError> {
    if coefficients.shape() != metadata.shape() {
        return Err(DecodeError::ShapeMismatch {
            coefficients: coefficients.shape(),
            metadata: metadata.shape(),
        });
    }
    Ok(AlignedDecode {
        coefficients,
        metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // octaves=3, bins_per_octave=2: column widths cycle 6, 2, 4, 2.
    fn small_config() -> DecoderConfig {
        DecoderConfig::new(3, 2).unwrap()
    }

    fn coefficient_bytes(elements: usize) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(elements * 8);
        for i in 0..elements {
            bytes.extend_from_slice(&(i as f32).to_le_bytes());
            bytes.extend_from_slice(&(-(i as f32)).to_le_bytes());
        }
        bytes
    }

    #[test]
    fn matched_streams_align() {
        let config = small_config();
        // Five steps ending on a full-width column: 6+2+4+2+6 elements.
        let coeff = coefficient_bytes(20);
        let meta = vec![1u8; 20];

        let aligned = decode_aligned(&coeff, &meta, &config).unwrap();
        assert_eq!(aligned.coefficients.shape(), (6, 5));
        assert_eq!(aligned.metadata.shape(), (6, 5));
        assert!(aligned.metadata.as_slice().iter().all(|&m| m == 1));
    }

    #[test]
    fn truncated_metadata_is_a_shape_mismatch() {
        let config = small_config();
        let coeff = coefficient_bytes(20);
        // One element short: the final metadata column is no longer full
        // width, so its trim point moves all the way back to the first.
        let meta = vec![0u8; 19];

        match decode_aligned(&coeff, &meta, &config) {
            Err(DecodeError::ShapeMismatch {
                coefficients,
                metadata,
            }) => {
                assert_eq!(coefficients, (6, 5));
                assert_eq!(metadata, (6, 1));
            }
            other => panic!("expected ShapeMismatch, got {other:?}"),
        }
    }

    #[test]
    fn metadata_survives_as_signed_bytes() {
        let config = small_config();
        let mut meta = vec![0u8; 20];
        meta[0] = 0xff;
        meta[6] = 2;

        let matrix = decode_metadata(&meta, &config).unwrap();
        assert_eq!(matrix.value(0, 0), -1);
        // Element 6 opens the second column, octave 0 bin 0 at step 1.
        assert_eq!(matrix.value(0, 1), 2);
    }
}
