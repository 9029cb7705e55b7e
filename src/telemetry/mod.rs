//! Run statistics.
//!
//! The control loop is the only writer, so counters are plain fields rather
//! than atomics.

pub mod stats;

pub use stats::RunStats;
