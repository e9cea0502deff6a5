//! Phase unwrapping for per-bin series.

use std::f32::consts::TAU;

/// Remove 2π ambiguity from a wrapped phase sequence (radians, principal
/// value in (−π, π]) so consecutive deltas are the nearest-to-zero choice
/// among all full-turn shifts. Each delta is measured against the
/// already-corrected neighbor, so corrections accumulate left to right.
///
/// Only valid on series sampled at an octave's native rate: zero-order-held
/// repeats flatten the trajectory and must not be unwrapped.
pub fn unwrap_in_place(values: &mut [f32]) {
    for i in 1..values.len() {
        let delta = values[i] - values[i - 1];
        values[i] -= (delta / TAU).round() * TAU;
    }
}
