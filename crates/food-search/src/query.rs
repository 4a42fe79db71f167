//! Boosted clause vocabulary for name queries.
//!
//! Callers describe a query as a list of [`BoostedClause`]s over already
//! folded tokens; the searcher combines them as "should" clauses so each
//! matching clause adds its boosted score.

use tantivy::query::{
    BoostQuery, FuzzyTermQuery, PhrasePrefixQuery, PhraseQuery, Query, TermQuery,
};
use tantivy::schema::{Field, IndexRecordOption};
use tantivy::Term;

/// A single match strategy over folded name tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum NameQuery {
    /// All tokens adjacent and in order. A single token is a plain term match.
    Phrase(Vec<String>),
    /// All but the last token as a phrase, the last token as a prefix.
    PhrasePrefix(Vec<String>),
    /// One token within `distance` Levenshtein edits.
    Fuzzy { token: String, distance: u8 },
}

/// A [`NameQuery`] with its score multiplier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostedClause {
    pub query: NameQuery,
    pub boost: f32,
}

impl BoostedClause {
    pub fn new(query: NameQuery, boost: f32) -> Self {
        Self { query, boost }
    }
}

impl NameQuery {
    /// Build the Tantivy query for this clause, or `None` if it has no tokens.
    pub(crate) fn to_query(&self, field: Field) -> Option<Box<dyn Query>> {
        let term = |token: &String| Term::from_field_text(field, token);

        match self {
            NameQuery::Phrase(tokens) => match tokens.as_slice() {
                [] => None,
                [single] => Some(Box::new(TermQuery::new(
                    term(single),
                    IndexRecordOption::WithFreqs,
                ))),
                many => Some(Box::new(PhraseQuery::new(many.iter().map(term).collect()))),
            },
            NameQuery::PhrasePrefix(tokens) => {
                if tokens.is_empty() {
                    return None;
                }
                Some(Box::new(PhrasePrefixQuery::new(
                    tokens.iter().map(term).collect(),
                )))
            }
            NameQuery::Fuzzy { token, distance } => {
                if token.is_empty() {
                    return None;
                }
                Some(Box::new(FuzzyTermQuery::new(term(token), *distance, false)))
            }
        }
    }
}

impl BoostedClause {
    pub(crate) fn to_query(&self, field: Field) -> Option<Box<dyn Query>> {
        self.query
            .to_query(field)
            .map(|q| Box::new(BoostQuery::new(q, self.boost)) as Box<dyn Query>)
    }
}
