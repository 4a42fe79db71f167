//! Record validation: raw dump record to a persisted `Product`.
//!
//! Out-of-range values become unknown rather than being clamped.

use food_types::Product;

use crate::raw::RawProduct;

pub const KCAL_KEY: &str = "energy-kcal_100g";
pub const KJ_KEY: &str = "energy-kj_100g";
pub const PROTEIN_KEY: &str = "proteins_100g";
pub const FAT_KEY: &str = "fat_100g";
pub const CARBS_KEY: &str = "carbohydrates_100g";

/// Kilojoules per kilocalorie.
pub const KJ_PER_KCAL: f64 = 4.184;

pub const MAX_KCAL: f32 = 10_000.0;
/// Upper bound for protein, fat and carbohydrate grams per 100g.
pub const MAX_GRAMS: f32 = 100.0;

/// Keep `value` if it lies in `[0, max]`.
fn in_range(value: f64, max: f32) -> Option<f32> {
    let value = value as f32;
    (value.is_finite() && (0.0..=max).contains(&value)).then_some(value)
}

/// Energy per 100g, preferring the kcal field over converted kJ.
pub fn kcal_100g(raw: &RawProduct) -> Option<f32> {
    if let Some(kcal) = raw.nutrient(KCAL_KEY) {
        return in_range(kcal, MAX_KCAL);
    }
    raw.nutrient(KJ_KEY)
        .and_then(|kj| in_range(kj / KJ_PER_KCAL, MAX_KCAL))
}

fn grams_100g(raw: &RawProduct, key: &str) -> Option<f32> {
    raw.nutrient(key).and_then(|g| in_range(g, MAX_GRAMS))
}

/// Build the persisted record. The barcode must already be checked.
pub fn build_product(barcode: &str, raw: &RawProduct) -> Product {
    Product {
        barcode: barcode.to_string(),
        name: raw.resolved_name().to_string(),
        kcal_100g: kcal_100g(raw),
        protein_100g: grams_100g(raw, PROTEIN_KEY),
        fat_100g: grams_100g(raw, FAT_KEY),
        carbs_100g: grams_100g(raw, CARBS_KEY),
    }
}
