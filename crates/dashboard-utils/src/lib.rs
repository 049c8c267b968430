//! Shared utilities for the stock dashboard
//!
//! Currently this is the tracing setup used by the binaries.

pub mod logging;

pub use logging::{LogFormat, init_tracing, try_init_tracing};
