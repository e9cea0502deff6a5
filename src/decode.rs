//! Demultiplexing pipeline for the interleaved column stream.
//!
//! The encoder round-robins octaves on a binary-counter schedule and writes
//! only the octaves due for an update at each step. Decoding runs the same
//! schedule forward: `schedule` decides which octaves are present, `demux`
//! splits the flat stream into per-step columns, and `matrix` trims the tail
//! and expands the columns into a dense, fully-populated matrix.

pub mod demux;
pub mod matrix;
pub mod schedule;
