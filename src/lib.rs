//! ipcountry - IP address geolocation lookup service
//!
//! Resolves an IP address to its city and country from a dataset loaded
//! once at startup, behind a process-wide token-bucket throttle.
//!
//! # Architecture
//! - `utils::ip`: address validation and canonical form
//! - `storage`: dataset sources and the immutable lookup table
//! - `ratelimit`: token-bucket admission control
//! - `services`: lookup service and its error taxonomy
//! - `api`: HTTP handlers and middleware
//! - `config`: file/env/CLI configuration
//! - `runtime`: startup, server loop and shutdown
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod ratelimit;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
