//! In-memory geolocation store
//!
//! The store is built once from a finite record sequence and never mutated
//! afterwards. `load` takes `&mut self`, so it has to finish before the store
//! is wrapped in an `Arc` and handed to request handlers; from then on every
//! `find` is a plain `&self` read over a `HashMap` with no locking.

use std::collections::HashMap;

use tracing::{debug, info};

use super::error::{LoadError, LoadErrorKind, StoreError};
use super::models::{LocationRecord, RawRecord};
use super::GeoLookup;
use crate::utils::normalize_ip;

#[derive(Debug, Default)]
pub struct GeoLookupStore {
    // None until a load succeeds
    records: Option<HashMap<String, LocationRecord>>,
}

impl GeoLookupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ready store straight from a record sequence.
    pub fn from_records<I, R>(records: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = R>,
        R: Into<RawRecord>,
    {
        let mut store = Self::new();
        store.load(records)?;
        Ok(store)
    }

    /// Populate the store from `records`.
    ///
    /// All-or-nothing: the mapping is assembled in a fresh table and only
    /// installed once every record has validated. On error the store is left
    /// without data and `find` keeps returning [`StoreError::NotReady`].
    /// Later duplicates of an address replace earlier ones.
    pub fn load<I, R>(&mut self, records: I) -> Result<(), LoadError>
    where
        I: IntoIterator<Item = R>,
        R: Into<RawRecord>,
    {
        self.records = None;

        let iter = records.into_iter();
        let mut table = HashMap::with_capacity(iter.size_hint().0);
        let mut total = 0usize;

        for (index, record) in iter.enumerate() {
            let position = index + 1;
            let record: RawRecord = record.into();

            let Some((address, city, country)) = record.as_triple() else {
                return Err(LoadError {
                    kind: LoadErrorKind::MalformedRecord,
                    position,
                });
            };
            let Some(key) = normalize_ip(address) else {
                return Err(LoadError {
                    kind: LoadErrorKind::InvalidAddress,
                    position,
                });
            };

            if table
                .insert(key.clone(), LocationRecord::new(key, city, country))
                .is_some()
            {
                debug!("Duplicate address at record {}, keeping later entry", position);
            }
            total = position;
        }

        info!(
            "Lookup store loaded: {} records, {} distinct addresses",
            total,
            table.len()
        );
        self.records = Some(table);
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.records.is_some()
    }

    /// Number of distinct addresses, 0 before a successful load.
    pub fn len(&self) -> usize {
        self.records.as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up `address`, returning an owned copy of the stored record.
    pub fn find(&self, address: &str) -> Result<LocationRecord, StoreError> {
        let key = normalize_ip(address).ok_or(StoreError::InvalidAddress)?;
        let records = self.records.as_ref().ok_or(StoreError::NotReady)?;

        records.get(&key).cloned().ok_or(StoreError::NotFound)
    }
}

impl GeoLookup for GeoLookupStore {
    fn find(&self, address: &str) -> Result<LocationRecord, StoreError> {
        GeoLookupStore::find(self, address)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
