use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use super::DatasetSource;
use crate::errors::{IpCountryError, Result};
use crate::storage::models::RawRecord;

/// CSV 数据源：无表头，每行 `ip,city,country`
///
/// 读取时不要求每行字段数一致，字段数不对的行交给 store 报 `MalformedRecord`，
/// 这样错误里能带上准确的行号。
pub struct DelimitedTextSource {
    path: PathBuf,
}

impl DelimitedTextSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for DelimitedTextSource {
    fn read_records(&self) -> Result<Vec<RawRecord>> {
        let file = File::open(&self.path).map_err(|e| {
            IpCountryError::file_operation(format!(
                "Failed to open CSV file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let row = result.map_err(|e| {
                IpCountryError::serialization(format!(
                    "Failed to read CSV record {}: {}",
                    row_idx + 1,
                    e
                ))
            })?;
            records.push(RawRecord::from_fields(
                row.iter().map(str::to_string).collect(),
            ));
        }

        Ok(records)
    }

    fn name(&self) -> &'static str {
        "csv"
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_rows_in_order() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "8.8.8.8,Mountain View,United States").unwrap();
        writeln!(temp_file, "1.1.1.1, San Francisco ,United States").unwrap();

        let records = DelimitedTextSource::new(temp_file.path())
            .read_records()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0],
            RawRecord::new("8.8.8.8", "Mountain View", "United States")
        );
        assert_eq!(records[1].fields[1], "San Francisco");
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "9.9.9.9,\"Zurich, ZH\",Switzerland").unwrap();

        let records = DelimitedTextSource::new(temp_file.path())
            .read_records()
            .unwrap();
        assert_eq!(records[0].as_triple(), Some(("9.9.9.9", "Zurich, ZH", "Switzerland")));
    }

    #[test]
    fn test_wrong_field_count_is_passed_through() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "8.8.8.8,Mountain View").unwrap();

        let records = DelimitedTextSource::new(temp_file.path())
            .read_records()
            .unwrap();
        assert_eq!(records[0].fields.len(), 2);
    }

    #[test]
    fn test_missing_file() {
        let err = DelimitedTextSource::new("does/not/exist.csv")
            .read_records()
            .unwrap_err();
        assert!(matches!(err, IpCountryError::FileOperation(_)));
    }
}
