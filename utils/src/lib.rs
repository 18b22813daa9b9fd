//! Shared utilities: logging setup and display formatting.

pub mod format;
pub mod logging;

pub use format::group_thousands;
pub use logging::init_tracing;
