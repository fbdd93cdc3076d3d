use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::DatasetSource;
use crate::errors::{IpCountryError, Result};
use crate::storage::models::RawRecord;

/// JSON 数组中的一项，缺失字段按空字符串处理
#[derive(Debug, Deserialize)]
struct JsonLocation {
    #[serde(default)]
    ip: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    country: String,
}

/// JSON data source: a top-level array of `{"ip", "city", "country"}` objects.
pub struct StructuredDocumentSource {
    path: PathBuf,
}

impl StructuredDocumentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for StructuredDocumentSource {
    fn read_records(&self) -> Result<Vec<RawRecord>> {
        let file = File::open(&self.path).map_err(|e| {
            IpCountryError::file_operation(format!(
                "Failed to open JSON file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let locations: Vec<JsonLocation> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| IpCountryError::serialization(format!("Failed to parse JSON: {}", e)))?;

        Ok(locations
            .into_iter()
            .map(|l| RawRecord::new(l.ip, l.city, l.country))
            .collect())
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
