//! Metadata describing a built data directory.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FoodError;

/// File name of the manifest inside a data directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Summary of the ingestion run that produced a data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub build_time: DateTime<Utc>,
    /// Path or identifier of the dump the directory was built from
    pub dump_source: String,
    /// Records written to the keyed store
    pub product_count: u64,
    /// Records that also produced a search document
    pub indexed_count: u64,
    pub skipped_count: u64,
    pub schema_version: u64,
    /// Skip reason label -> count
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub skip_reasons: BTreeMap<String, u64>,
}

impl Manifest {
    /// Load `manifest.json` from the given data directory.
    pub fn read(data_dir: &Path) -> Result<Self, FoodError> {
        let bytes = fs::read(data_dir.join(MANIFEST_FILE))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Write `manifest.json` (pretty-printed) into the given data directory.
    pub fn write(&self, data_dir: &Path) -> Result<(), FoodError> {
        let mut file = fs::File::create(data_dir.join(MANIFEST_FILE))?;
        serde_json::to_writer_pretty(&mut file, self)?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn sample() -> Manifest {
        let mut skip_reasons = BTreeMap::new();
        skip_reasons.insert("empty_barcode".to_string(), 3);
        skip_reasons.insert("parse_error".to_string(), 1);
        Manifest {
            build_time: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            dump_source: "/dumps/openfoodfacts-products.jsonl.gz".to_string(),
            product_count: 10,
            indexed_count: 8,
            skipped_count: 4,
            schema_version: 1,
            skip_reasons,
        }
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let manifest = sample();
        manifest.write(dir.path()).unwrap();

        let loaded = Manifest::read(dir.path()).unwrap();
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["build_time"], "2026-03-01T12:00:00Z");
        assert_eq!(json["product_count"], 10);
        assert_eq!(json["indexed_count"], 8);
        assert_eq!(json["skipped_count"], 4);
        assert_eq!(json["schema_version"], 1);
        assert_eq!(json["skip_reasons"]["empty_barcode"], 3);
    }

    #[test]
    fn test_empty_skip_reasons_omitted() {
        let mut manifest = sample();
        manifest.skip_reasons.clear();
        let json = serde_json::to_value(&manifest).unwrap();
        assert!(json.get("skip_reasons").is_none());

        let back: Manifest = serde_json::from_value(json).unwrap();
        assert!(back.skip_reasons.is_empty());
    }

    #[test]
    fn test_read_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let err = Manifest::read(dir.path()).unwrap_err();
        assert!(matches!(err, FoodError::Io(_)));
    }
}
