//! Tiered query plan for folded name search.
//!
//! Three tiers are OR-ed together and scored independently:
//! - exact phrase on the whole folded query
//! - prefix on the folded query (last token completes as a prefix)
//! - per-token fuzzy match for tokens long enough to tolerate typos

use food_search::{BoostedClause, NameQuery};
use food_types::config::MAX_SEARCH_LIMIT;

pub const PHRASE_BOOST: f32 = 10.0;
pub const PREFIX_BOOST: f32 = 5.0;
pub const FUZZY_BOOST: f32 = 1.0;

/// Shorter tokens never match fuzzily.
pub const FUZZY_MIN_CHARS: usize = 4;
/// Tokens this long allow two edits instead of one.
pub const FUZZY_WIDE_CHARS: usize = 8;

/// Result count used when the caller asks for zero.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Build the boosted clauses for an already folded query.
///
/// An empty query yields no clauses.
pub fn plan_clauses(folded: &str) -> Vec<BoostedClause> {
    let tokens: Vec<String> = folded.split_whitespace().map(String::from).collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut clauses = vec![
        BoostedClause::new(NameQuery::Phrase(tokens.clone()), PHRASE_BOOST),
        BoostedClause::new(NameQuery::PhrasePrefix(tokens.clone()), PREFIX_BOOST),
    ];

    for token in tokens {
        if let Some(distance) = fuzzy_distance(&token) {
            clauses.push(BoostedClause::new(
                NameQuery::Fuzzy { token, distance },
                FUZZY_BOOST,
            ));
        }
    }

    clauses
}

/// Allowed edit distance for a token, or `None` if it is too short.
pub fn fuzzy_distance(token: &str) -> Option<u8> {
    match token.chars().count() {
        n if n >= FUZZY_WIDE_CHARS => Some(2),
        n if n >= FUZZY_MIN_CHARS => Some(1),
        _ => None,
    }
}

/// Resolve a requested result count: 0 means `default`, and nothing
/// exceeds the hard cap.
pub fn effective_limit(requested: usize, default: usize) -> usize {
    let limit = if requested == 0 { default } else { requested };
    limit.clamp(1, MAX_SEARCH_LIMIT)
}
