//! Common utilities and helpers

pub mod logging;
pub mod path;

pub use logging::{LogFormat, LoggingConfig, LoggingSystem, ProgressReporter};
pub use path::PathUtils;
