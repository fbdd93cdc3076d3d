//! Dataset sources
//!
//! A source turns a file into the finite record sequence the lookup store is
//! built from. Which source is used is decided once from configuration.

mod delimited;
mod document;

use std::path::Path;

pub use delimited::DelimitedTextSource;
pub use document::StructuredDocumentSource;

use super::models::RawRecord;
use crate::errors::Result;

pub trait DatasetSource: Send + Sync {
    /// Read every record from the underlying file.
    ///
    /// Only I/O and syntax problems are reported here; record shape and
    /// address validity are checked by the store during load.
    fn read_records(&self) -> Result<Vec<RawRecord>>;

    /// 获取 source 名称（用于日志）
    fn name(&self) -> &'static str;

    fn path(&self) -> &Path;
}
