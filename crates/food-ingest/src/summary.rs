//! Per-run counters returned by the ingestion pipeline.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Why a dump line did not produce a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// Line is not a JSON record of the expected shape
    ParseError,
    EmptyBarcode,
    BarcodeTooLong,
    /// Line exceeded the line buffer and was discarded unread
    LineTooLong,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::ParseError => "parse_error",
            SkipReason::EmptyBarcode => "empty_barcode",
            SkipReason::BarcodeTooLong => "barcode_too_long",
            SkipReason::LineTooLong => "line_too_long",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts accumulated over one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Products written to the store
    pub product_count: u64,
    /// Stored products with a non-empty name
    pub indexed_count: u64,
    pub skipped_count: u64,
    /// Skip reason label -> count
    pub skip_reasons: BTreeMap<String, u64>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a stored product.
    pub fn record_product(&mut self, indexed: bool) {
        self.product_count += 1;
        if indexed {
            self.indexed_count += 1;
        }
    }

    /// Record a skipped line.
    pub fn record_skip(&mut self, reason: SkipReason) {
        self.skipped_count += 1;
        *self
            .skip_reasons
            .entry(reason.as_str().to_string())
            .or_default() += 1;
    }

    pub fn skips(&self, reason: SkipReason) -> u64 {
        self.skip_reasons
            .get(reason.as_str())
            .copied()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(SkipReason::ParseError.to_string(), "parse_error");
        assert_eq!(SkipReason::EmptyBarcode.as_str(), "empty_barcode");
        assert_eq!(SkipReason::BarcodeTooLong.as_str(), "barcode_too_long");
        assert_eq!(SkipReason::LineTooLong.as_str(), "line_too_long");
    }

    #[test]
    fn test_counters() {
        let mut summary = RunSummary::new();
        summary.record_product(true);
        summary.record_product(false);
        summary.record_skip(SkipReason::ParseError);
        summary.record_skip(SkipReason::ParseError);
        summary.record_skip(SkipReason::EmptyBarcode);

        assert_eq!(summary.product_count, 2);
        assert_eq!(summary.indexed_count, 1);
        assert_eq!(summary.skipped_count, 3);
        assert_eq!(summary.skips(SkipReason::ParseError), 2);
        assert_eq!(summary.skips(SkipReason::EmptyBarcode), 1);
        assert_eq!(summary.skips(SkipReason::LineTooLong), 0);
        assert_eq!(summary.skip_reasons.len(), 2);
    }
}
