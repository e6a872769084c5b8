//! Shared utilities for the Obol node-account processor.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
