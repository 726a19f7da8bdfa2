//! Log output for test runs.
//!
//! The matchers emit `tracing` events (one `debug` per evaluation, one
//! `trace` per policy query). Call [`init_tracing`] once from a test to see
//! them; later calls report [`TracingError::AlreadyInitialized`].

mod tracing_init;

pub use tracing_init::*;
