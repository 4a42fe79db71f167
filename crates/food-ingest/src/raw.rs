//! Open Food Facts JSONL record, as loosely typed as the dump itself.

use std::collections::HashMap;

use serde::de::IgnoredAny;
use serde::Deserialize;

/// One line of the dump. Every field may be absent or `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProduct {
    pub code: Option<String>,
    pub product_name: Option<String>,
    pub product_name_en: Option<String>,
    pub generic_name: Option<String>,
    pub short_description: Option<String>,
    pub nutriments: Option<HashMap<String, NutrientValue>>,
}

/// A nutriment value as found in the dump.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NutrientValue {
    Number(f64),
    Text(String),
    /// Booleans, arrays, objects and nulls
    Other(IgnoredAny),
}

impl NutrientValue {
    /// Coerce to a finite number. Text contributes its leading decimal
    /// number and any trailing unit or note is ignored.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NutrientValue::Number(n) => *n,
            NutrientValue::Text(s) => leading_decimal(s)?,
            NutrientValue::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// Parse the longest decimal number at the start of `s`, after leading
/// whitespace: optional sign, digits with an optional fraction, optional
/// exponent. `" 5.5 kcal"` is 5.5, `"12g"` is 12.
fn leading_decimal(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |at: usize| bytes[at..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

impl RawProduct {
    /// Barcode, or "" when missing.
    pub fn barcode(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }

    /// First non-empty of product_name, product_name_en, generic_name,
    /// short_description; "" if none.
    pub fn resolved_name(&self) -> &str {
        [
            &self.product_name,
            &self.product_name_en,
            &self.generic_name,
            &self.short_description,
        ]
        .into_iter()
        .filter_map(|name| name.as_deref())
        .find(|name| !name.is_empty())
        .unwrap_or_default()
    }

    /// Numeric value of a nutriment key, if present and coercible.
    pub fn nutrient(&self, key: &str) -> Option<f64> {
        self.nutriments.as_ref()?.get(key)?.as_f64()
    }
}
