//! Service layer for business logic
//!
//! Handlers talk to the lookup store only through this layer.

mod location_service;

pub use location_service::{LocationService, ServiceError};
