//! Dense matrix reconstruction from demultiplexed columns.

use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::phase;
use num_complex::Complex32;

/// Rectangular decode result: one row per flat bin index
/// (`octave * bins_per_octave + bin`), one column per retained step. Every
/// cell is populated; octaves that were not updated at a step hold their
/// previous value.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix<T> {
    config: DecoderConfig,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> DenseMatrix<T> {
    /// Trim the column sequence to the last full-width column and expand it
    /// into a dense matrix with zero-order hold.
    ///
    /// Columns after the last full-width one belong to an in-progress
    /// rollover and are dropped. A sequence with no full-width column at all
    /// cannot seed the hold and fails with `InsufficientData`.
    pub(crate) fn from_columns(
        columns: &[&[T]],
        config: &DecoderConfig,
    ) -> Result<Self, DecodeError> {
        let rows = config.bin_count();
        let last_full = columns
            .iter()
            .rposition(|column| column.len() == rows)
            .ok_or(DecodeError::InsufficientData {
                columns: columns.len(),
            })?;
        let trimmed = &columns[..=last_full];

        // The demultiplexer seeds its counter at the maximum, so whenever a
        // full-width column exists the first column is one. Rely on that:
        // the hold below only ever reads the previous step.
        debug_assert_eq!(trimmed[0].len(), rows);

        let cols = trimmed.len();
        let mut data = vec![T::default(); rows * cols];
        for (c, column) in trimmed.iter().enumerate() {
            for r in 0..rows {
                data[r * cols + c] = if r < column.len() {
                    column[r]
                } else {
                    data[r * cols + (c - 1)]
                };
            }
        }

        Ok(Self {
            config: *config,
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.config.bin_count()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols)
    }

    /// Row-major cell storage, for callers that render or export the whole
    /// matrix at once.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Row index for an (octave, bin) pair.
    pub fn flat_bin(&self, octave: usize, bin: usize) -> usize {
        assert!(octave < self.config.octaves, "octave {octave} out of range");
        assert!(
            bin < self.config.bins_per_octave,
            "bin {bin} out of range"
        );
        octave * self.config.bins_per_octave + bin
    }

    pub fn value(&self, row: usize, col: usize) -> T {
        assert!(row < self.rows() && col < self.cols);
        self.data[row * self.cols + col]
    }

    /// Full upsampled row for a flat bin index, one value per step.
    pub fn row(&self, flat_bin: usize) -> &[T] {
        assert!(flat_bin < self.rows());
        &self.data[flat_bin * self.cols..(flat_bin + 1) * self.cols]
    }

    /// Row for (octave, bin) sampled at that octave's native rate: every
    /// `2^octave`-th step, exactly the values the encoder actually wrote.
    pub fn native_rate_row(&self, octave: usize, bin: usize) -> Vec<T> {
        let spacing = 1usize << octave;
        self.row(self.flat_bin(octave, bin))
            .iter()
            .step_by(spacing)
            .copied()
            .collect()
    }

    /// Two rows sampled at one shared rate (the slower of the two octaves),
    /// for element-for-element cross-bin comparison.
    pub fn paired_native_rows(
        &self,
        (octave1, bin1): (usize, usize),
        (octave2, bin2): (usize, usize),
    ) -> (Vec<T>, Vec<T>) {
        let spacing = 1usize << octave1.max(octave2);
        let first = self.row(self.flat_bin(octave1, bin1));
        let second = self.row(self.flat_bin(octave2, bin2));
        (
            first.iter().step_by(spacing).copied().collect(),
            second.iter().step_by(spacing).copied().collect(),
        )
    }
}

impl DenseMatrix<Complex32> {
    /// Continuous phase trajectory for (octave, bin): native-rate samples,
    /// principal-value phase, then unwrapped. Extraction happens at the
    /// native rate first; held repeats are lossy for phase and must not
    /// reach the unwrapper.
    pub fn unwrapped_phase(&self, octave: usize, bin: usize) -> Vec<f32> {
        let mut phases: Vec<f32> = self
            .native_rate_row(octave, bin)
            .iter()
            .map(|c| c.arg())
            .collect();
        phase::unwrap_in_place(&mut phases);
        phases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::demux::split_columns;

    fn small_config() -> DecoderConfig {
        DecoderConfig::new(3, 2).unwrap()
    }

    // Sequential element values: every fresh write is globally unique, so a
    // held cell is detectable as an exact repeat of its left neighbor.
    fn sequential_matrix(len: usize) -> DenseMatrix<u32> {
        let config = small_config();
        let elements: Vec<u32> = (0..len as u32).collect();
        let columns = split_columns(&elements, &config);
        DenseMatrix::from_columns(&columns, &config).unwrap()
    }

    #[test]
    fn shape_counts_trimmed_steps_only() {
        // Widths 6, 2, 4, 2, 6: five full steps, 20 elements.
        let matrix = sequential_matrix(20);
        assert_eq!(matrix.shape(), (6, 5));
    }

    #[test]
    fn trailing_short_columns_are_dropped() {
        // 20 elements end on a full-width column; 5 more give two trailing
        // under-width columns (2 elements, then 3 of a wanted 4) that must
        // not survive the trim.
        let full = sequential_matrix(20);
        let extra = sequential_matrix(25);
        assert_eq!(extra.shape(), full.shape());
        assert_eq!(extra.as_slice(), full.as_slice());
    }

    #[test]
    fn no_full_width_column_is_insufficient_data() {
        let config = small_config();
        let elements: Vec<u32> = (0..4).collect();
        let columns = split_columns(&elements, &config);
        match DenseMatrix::from_columns(&columns, &config) {
            Err(DecodeError::InsufficientData { columns }) => assert_eq!(columns, 1),
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn empty_stream_is_insufficient_data() {
        let config = small_config();
        let result = DenseMatrix::<u32>::from_columns(&[], &config);
        assert!(matches!(
            result,
            Err(DecodeError::InsufficientData { columns: 0 })
        ));
    }

    #[test]
    fn rows_change_only_at_native_rate_steps() {
        // Widths 6,2,4,2,6,2,4,2,6: nine full steps, 34 elements.
        let matrix = sequential_matrix(34);
        assert_eq!(matrix.cols(), 9);

        for octave in 0..3 {
            let spacing = 1usize << octave;
            for bin in 0..2 {
                let row = matrix.row(matrix.flat_bin(octave, bin));
                for col in 1..row.len() {
                    if col % spacing == 0 {
                        assert_ne!(row[col], row[col - 1], "octave {octave} col {col}");
                    } else {
                        assert_eq!(row[col], row[col - 1], "octave {octave} col {col}");
                    }
                }
            }
        }
    }

    #[test]
    fn native_rate_row_matches_fresh_writes() {
        let matrix = sequential_matrix(34);

        let native = matrix.native_rate_row(2, 0);
        let row = matrix.row(matrix.flat_bin(2, 0));
        assert_eq!(native, vec![row[0], row[4], row[8]]);

        // Octave 0 has no held values at all.
        assert_eq!(matrix.native_rate_row(0, 1), matrix.row(1).to_vec());
    }

    #[test]
    fn paired_rows_share_the_slower_rate() {
        let matrix = sequential_matrix(34);
        let (fast, slow) = matrix.paired_native_rows((0, 0), (2, 1));
        assert_eq!(fast.len(), slow.len());
        assert_eq!(slow, matrix.native_rate_row(2, 1));
        let full_row = matrix.row(matrix.flat_bin(0, 0));
        assert_eq!(fast, vec![full_row[0], full_row[4], full_row[8]]);
    }

    #[test]
    fn unwrapped_phase_is_continuous() {
        // Single octave, single bin: every step is full width and the one
        // row advances its phase by 2 radians per step, wrapping repeatedly.
        let config = DecoderConfig::new(1, 1).unwrap();
        let elements: Vec<Complex32> = (0..16)
            .map(|i| Complex32::from_polar(1.0, i as f32 * 2.0))
            .collect();
        let columns = split_columns(&elements, &config);
        let matrix = DenseMatrix::from_columns(&columns, &config).unwrap();

        let unwrapped = matrix.unwrapped_phase(0, 0);
        assert_eq!(unwrapped.len(), 16);
        // The wrapped input jumps by 2 − τ wherever the principal value
        // rolls over; unwrapped, every delta is the true 2 radians again.
        for (i, pair) in unwrapped.windows(2).enumerate() {
            let delta = pair[1] - pair[0];
            assert!((delta - 2.0).abs() < 1e-3, "step {i}: delta {delta}");
        }
    }
}
