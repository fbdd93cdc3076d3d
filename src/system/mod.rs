//! System-level modules
//!
//! Process plumbing that is not specific to IP lookups.

pub mod logging;

pub use logging::init_logging;
