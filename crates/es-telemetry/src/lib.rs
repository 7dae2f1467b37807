//! Observability for env-stamp.
//!
//! - **Logging**: human-readable and JSON output via `tracing-subscriber`
//! - **Sampler**: a periodic task that snapshots [`sampler::SampleCounters`]
//!   into the persisted metrics log

pub mod logging;
pub mod sampler;
