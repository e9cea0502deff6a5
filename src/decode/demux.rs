//! Column demultiplexer: flat element stream → per-step columns.

use super::schedule::StepCounter;
use crate::config::DecoderConfig;
use tracing::debug;

const PROGRESS_INTERVAL: usize = 10_000;

/// Split a flat stream into the variable-width columns the encoder wrote,
/// one per step: `active_octaves * bins_per_octave` elements, octave-major.
/// Columns borrow from the input, nothing is copied.
///
/// The final column may be short if the stream ran out mid-column; it is
/// retained as-is here, trimming is the reconstructor's decision. The
/// emitted column lengths always sum to the input length.
pub fn split_columns<'a, T>(elements: &'a [T], config: &DecoderConfig) -> Vec<&'a [T]> {
    let mut counter = StepCounter::seeded(config);

    // An average column carries about two octaves' worth of bins.
    let mut columns = Vec::with_capacity(elements.len() / (2 * config.bins_per_octave) + 1);

    let mut at = 0;
    while at < elements.len() {
        let width = counter.active_octaves() * config.bins_per_octave;
        let end = (at + width).min(elements.len());
        columns.push(&elements[at..end]);
        at = end;
        counter.advance();

        if columns.len() % PROGRESS_INTERVAL == 0 {
            debug!("[demux] {} columns", columns.len());
        }
    }

    columns
}
