//! Location lookup service
//!
//! Sits between the HTTP handlers and the lookup store: validates the
//! incoming address and converts store outcomes into the three outcomes
//! callers are allowed to see.

use std::fmt;
use std::sync::Arc;

use tracing::{error, trace};

use crate::storage::{GeoLookup, LocationRecord, StoreError};
use crate::utils::normalize_ip;

/// Service-level lookup failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    InvalidAddress,
    NotFound,
    /// Unexpected store failure. The cause is kept for logs only.
    Upstream(StoreError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::InvalidAddress => write!(f, "invalid IP address format"),
            ServiceError::NotFound => write!(f, "IP address not found"),
            ServiceError::Upstream(_) => write!(f, "internal server error"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Upstream(cause) => Some(cause),
            _ => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidAddress => ServiceError::InvalidAddress,
            StoreError::NotFound => ServiceError::NotFound,
            other => ServiceError::Upstream(other),
        }
    }
}

#[derive(Clone)]
pub struct LocationService {
    store: Arc<dyn GeoLookup>,
}

impl LocationService {
    pub fn new(store: Arc<dyn GeoLookup>) -> Self {
        Self { store }
    }

    /// Find the location of `raw_address`.
    pub fn find_country(&self, raw_address: &str) -> Result<LocationRecord, ServiceError> {
        let Some(address) = normalize_ip(raw_address) else {
            trace!("Rejected malformed address: {:?}", raw_address);
            return Err(ServiceError::InvalidAddress);
        };

        self.store.find(&address).map_err(|e| {
            let err = ServiceError::from(e);
            if let ServiceError::Upstream(ref cause) = err {
                error!(
                    "Lookup backend '{}' failed for {}: {}",
                    self.store.name(),
                    address,
                    cause
                );
            }
            err
        })
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.name()
    }
}
