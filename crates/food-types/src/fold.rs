//! Name folding for diacritic-, case- and punctuation-insensitive search.
//!
//! The same function runs when a name is indexed and when a query is parsed;
//! any divergence between the two paths breaks search symmetry.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

/// Normalise a product name for indexing and querying.
///
/// 1. Lowercase
/// 2. `ß` -> `ss` (before decomposition)
/// 3. NFD, drop combining marks, NFC
/// 4. Every char that is not a letter (`L*`) or decimal digit (`Nd`)
///    becomes a space, so `²`, `½` and roman numerals separate tokens
/// 5. Collapse whitespace runs and trim
///
/// Folding is idempotent: `fold_name(&fold_name(s)) == fold_name(s)`.
pub fn fold_name(s: &str) -> String {
    let lowered = s.to_lowercase().replace('ß', "ss");

    let stripped: String = lowered
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .map(|c| if is_name_char(c) { c } else { ' ' })
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_name_char(c: char) -> bool {
    c.general_category_group() == GeneralCategoryGroup::Letter
        || c.general_category() == GeneralCategory::DecimalNumber
}
