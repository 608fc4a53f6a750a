//! Ingestion and aggregation pipeline for the consolidated IRVE
//! charging-station dataset: remote fetch with encoding recovery, lenient
//! CSV parsing, field normalization, and four chart-ready aggregate views
//! (cumulative commissioning time series, per-département counts, free/paid
//! split, connector-type tally).

pub mod aggregate;
pub mod boundary;
pub mod config;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod normalize;
pub mod pipeline;
