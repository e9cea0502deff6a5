//! Decoder configuration.
//!
//! The stream format is headerless: `octaves` and `bins_per_octave` must match
//! the values the producing analysis engine was run with, and nothing in the
//! stream lets the decoder detect a mismatch. A wrong configuration decodes
//! into structurally valid but semantically wrong shapes, so these values are
//! threaded explicitly into every component instead of living as constants.

use crate::error::DecodeError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

pub const DEFAULT_OCTAVES: usize = 7;
pub const DEFAULT_BINS_PER_OCTAVE: usize = 24;

// The wraparound counter is kept in a u32; its period is 2^(octaves - 1).
const MAX_OCTAVES: usize = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Octave count of the analysis; octave 0 updates every step, octave `o`
    /// every `2^o` steps.
    pub octaves: usize,
    /// Frequency bins per octave (24 and 72 are the usual analysis settings).
    pub bins_per_octave: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            octaves: DEFAULT_OCTAVES,
            bins_per_octave: DEFAULT_BINS_PER_OCTAVE,
        }
    }
}

impl DecoderConfig {
    pub fn new(octaves: usize, bins_per_octave: usize) -> Result<Self, DecodeError> {
        let config = Self {
            octaves,
            bins_per_octave,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.octaves == 0 || self.octaves > MAX_OCTAVES {
            return Err(DecodeError::InvalidConfig {
                reason: format!("octaves must be in 1..={MAX_OCTAVES}, got {}", self.octaves),
            });
        }
        if self.bins_per_octave == 0 {
            return Err(DecodeError::InvalidConfig {
                reason: "bins_per_octave must be non-zero".into(),
            });
        }
        Ok(())
    }

    /// Row count of the dense matrix: one row per (octave, bin) pair.
    pub fn bin_count(&self) -> usize {
        self.octaves * self.bins_per_octave
    }

    /// Period of the wraparound counter, also its seed value.
    pub(crate) fn counter_limit(&self) -> u32 {
        1 << (self.octaves - 1)
    }

    /// Read a JSON config file, falling back to defaults if the file is
    /// missing or unparseable. Values are still validated by the decode
    /// entry points, not here.
    pub fn load_or_default(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|s| {
                serde_json::from_str(&s)
                    .map_err(|err| warn!("[config] parse error {path:?}: {err}"))
                    .ok()
            })
            .unwrap_or_default()
    }
}
