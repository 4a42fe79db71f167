//! Product record persisted per barcode.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum barcode length, in characters.
pub const MAX_BARCODE_LEN: usize = 100;

/// Minimal nutrition record stored per barcode.
///
/// Nutrient values are per 100g. `None` means "unknown", which is distinct
/// from a measured zero. On the wire `None` is the IEEE NaN bit pattern
/// (see [`crate::codec`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store key; never part of the encoded payload
    pub barcode: String,
    /// Display name, possibly empty
    pub name: String,
    /// Energy in kcal per 100g
    pub kcal_100g: Option<f32>,
    /// Protein in grams per 100g
    pub protein_100g: Option<f32>,
    /// Fat in grams per 100g
    pub fat_100g: Option<f32>,
    /// Carbohydrates in grams per 100g
    pub carbs_100g: Option<f32>,
}

impl Product {
    /// Create a product with all nutrients unknown.
    pub fn new(barcode: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            barcode: barcode.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_kcal(mut self, kcal: f32) -> Self {
        self.kcal_100g = Some(kcal);
        self
    }

    pub fn with_protein(mut self, protein: f32) -> Self {
        self.protein_100g = Some(protein);
        self
    }

    pub fn with_fat(mut self, fat: f32) -> Self {
        self.fat_100g = Some(fat);
        self
    }

    pub fn with_carbs(mut self, carbs: f32) -> Self {
        self.carbs_100g = Some(carbs);
        self
    }

    /// Whether this product produces a search document.
    ///
    /// Products without a name are stored for lookup only.
    pub fn is_indexable(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Reasons a barcode cannot be used as a store key.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BarcodeError {
    #[error("barcode is empty")]
    Empty,

    #[error("barcode has {0} characters, maximum is {max}", max = MAX_BARCODE_LEN)]
    TooLong(usize),
}

/// Check that a barcode is non-empty and at most [`MAX_BARCODE_LEN`] characters.
pub fn check_barcode(barcode: &str) -> Result<(), BarcodeError> {
    if barcode.is_empty() {
        return Err(BarcodeError::Empty);
    }
    let len = barcode.chars().count();
    if len > MAX_BARCODE_LEN {
        return Err(BarcodeError::TooLong(len));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_has_unknown_nutrients() {
        let p = Product::new("001", "Apple Juice");
        assert_eq!(p.barcode, "001");
        assert_eq!(p.name, "Apple Juice");
        assert!(p.kcal_100g.is_none());
        assert!(p.protein_100g.is_none());
        assert!(p.fat_100g.is_none());
        assert!(p.carbs_100g.is_none());
    }

    #[test]
    fn test_builders() {
        let p = Product::new("002", "Whole Milk")
            .with_kcal(61.0)
            .with_protein(3.2)
            .with_fat(3.5)
            .with_carbs(4.8);
        assert_eq!(p.kcal_100g, Some(61.0));
        assert_eq!(p.protein_100g, Some(3.2));
        assert_eq!(p.fat_100g, Some(3.5));
        assert_eq!(p.carbs_100g, Some(4.8));
    }

    #[test]
    fn test_is_indexable() {
        assert!(Product::new("1", "Oat Bread").is_indexable());
        assert!(!Product::new("1", "").is_indexable());
    }

    #[test]
    fn test_check_barcode() {
        assert_eq!(check_barcode(""), Err(BarcodeError::Empty));
        assert!(check_barcode("3017620422003").is_ok());
        assert!(check_barcode(&"9".repeat(MAX_BARCODE_LEN)).is_ok());
        assert_eq!(
            check_barcode(&"9".repeat(MAX_BARCODE_LEN + 1)),
            Err(BarcodeError::TooLong(101))
        );
    }

    #[test]
    fn test_check_barcode_counts_characters() {
        // 100 two-byte characters are within the limit
        let wide = "é".repeat(MAX_BARCODE_LEN);
        assert!(check_barcode(&wide).is_ok());
    }

    #[test]
    fn test_unknown_serializes_as_null() {
        let p = Product::new("003", "Rice").with_kcal(130.0);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["kcal_100g"], serde_json::json!(130.0));
        assert!(json["fat_100g"].is_null());
    }
}
