//! Jobverse application lifecycle core.
//!
//! The library is consumed by the HTTP binary in `main.rs` and by any other
//! hosting surface that needs the candidate pipeline: the status transition
//! engine, the read-only projections, and the supporting store/notifier
//! contracts live under [`pipeline`].

pub mod config;
pub mod error;
pub mod pipeline;
pub mod telemetry;
