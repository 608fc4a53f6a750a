//! The four chart-ready aggregates. Each one consumes the normalized
//! station table independently; none depends on another's output.

pub mod regional;
pub mod split;
pub mod tally;
pub mod timeseries;
