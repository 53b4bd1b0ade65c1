//! Logging for pagescan.

pub mod setup;

pub use setup::init_tracing;
