//! Octave update schedule.

use crate::config::DecoderConfig;

/// Number of consecutive low octaves active for a wraparound counter value:
/// one more than the counter's trailing zero bits, capped at the octave
/// count. Octave 0 updates every step, octave 1 every 2nd step, octave 2
/// every 4th, matching how a binary counter's low bits roll over.
///
/// Panics on `counter == 0`: the wraparound counter cycles through
/// `[1, 2^(octaves-1)]` and never reaches zero, where the trailing-zero rule
/// has no meaning. Hitting this is a bug in the counter logic, not bad input.
pub fn active_octaves(counter: u32, octaves: usize) -> usize {
    assert!(counter != 0, "schedule counter must never be zero");
    (counter.trailing_zeros() as usize + 1).min(octaves)
}

/// Wraparound counter driving the schedule. Seeded at its maximum so the
/// first column covers all octaves, giving every matrix row an initial value.
#[derive(Debug, Clone, Copy)]
pub struct StepCounter {
    value: u32,
    limit: u32,
    octaves: usize,
}

impl StepCounter {
    pub fn seeded(config: &DecoderConfig) -> Self {
        let limit = config.counter_limit();
        Self {
            value: limit,
            limit,
            octaves: config.octaves,
        }
    }

    /// Octaves active at the current step.
    pub fn active_octaves(&self) -> usize {
        active_octaves(self.value, self.octaves)
    }

    pub fn advance(&mut self) {
        self.value = (self.value % self.limit) + 1;
    }
}
