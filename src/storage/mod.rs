pub mod error;
pub mod models;
pub mod source;
pub mod store;

pub use error::{LoadError, LoadErrorKind, StoreError};
pub use models::{LocationRecord, RawRecord};
pub use source::{DatasetSource, DelimitedTextSource, StructuredDocumentSource};
pub use store::GeoLookupStore;

use tracing::info;

use crate::config::{DatastoreConfig, DatastoreKind};
use crate::errors::Result;

/// 地理位置查询 trait
///
/// Implementations must be safe to call from many request handlers at once.
pub trait GeoLookup: Send + Sync {
    fn find(&self, address: &str) -> std::result::Result<LocationRecord, StoreError>;

    /// 获取 backend 名称（用于日志）
    fn name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    /// 根据配置选择数据源
    pub fn create_source(config: &DatastoreConfig) -> Box<dyn DatasetSource> {
        match config.kind {
            DatastoreKind::Csv => Box::new(DelimitedTextSource::new(&config.file)),
            DatastoreKind::Json => Box::new(StructuredDocumentSource::new(&config.file)),
        }
    }

    /// Read the configured dataset and build a ready lookup store.
    ///
    /// Any unreadable file or invalid record fails the whole load.
    pub fn load_store(config: &DatastoreConfig) -> Result<GeoLookupStore> {
        let source = Self::create_source(config);
        info!(
            "Loading {} dataset from {}",
            source.name(),
            source.path().display()
        );

        let records = source.read_records()?;
        let mut store = GeoLookupStore::new();
        store.load(records)?;
        Ok(store)
    }
}
