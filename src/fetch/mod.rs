//! Fetch engine: per-domain probing and snippet capture.

mod probe;
mod snippet;

pub use probe::{probe, ProbeOptions};
