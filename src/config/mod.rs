//! Static configuration
//!
//! Loaded once in `main` and passed by reference to the runtime.

mod structs;
pub mod validators;

pub use structs::*;
