//! Standard listener implementations.

pub mod filter;
pub mod logging;

pub use filter::{FilterHandler, filter};
pub use logging::LoggingHandler;
