//! Application lifecycle
//!
//! - `lifetime`: startup preparation and shutdown signals
//! - `modes`: the HTTP server entry point

pub mod lifetime;
pub mod modes;
