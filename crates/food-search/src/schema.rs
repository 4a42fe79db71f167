//! Tantivy schema definition for product name search.
//!
//! One document per named product:
//! - barcode: exact id, stored so hits can be hydrated from the keyed store
//! - name_folded: folded name, tokenized by [`NAME_TOKENIZER`] with positions

use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, STRING,
};
use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer};

use crate::SearchError;

/// Tokenizer name recorded in the schema for `name_folded`. It must be
/// registered on every opened index.
pub const NAME_TOKENIZER: &str = "name_folded";

/// Schema field handles for efficient access
#[derive(Debug, Clone)]
pub struct NameSchema {
    schema: Schema,
    /// Document id (STRING | STORED)
    pub barcode: Field,
    /// Folded product name
    pub name_folded: Field,
}

impl NameSchema {
    /// Get the underlying Tantivy schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Create a NameSchema from an existing Tantivy Schema
    pub fn from_schema(schema: Schema) -> Result<Self, SearchError> {
        let barcode = schema
            .get_field("barcode")
            .map_err(|_| SearchError::SchemaMismatch("missing barcode field".into()))?;
        let name_folded = schema
            .get_field("name_folded")
            .map_err(|_| SearchError::SchemaMismatch("missing name_folded field".into()))?;

        Ok(Self {
            schema,
            barcode,
            name_folded,
        })
    }
}

/// Splits folded names on non-alphanumerics without dropping long tokens.
///
/// Tantivy's `default` analyzer removes tokens over 40 bytes, which would
/// leave unspaced CJK names and long compounds without any postings.
pub fn name_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(LowerCaser)
        .build()
}

/// Build the product name schema.
pub fn build_name_schema() -> NameSchema {
    let mut schema_builder = Schema::builder();

    let barcode = schema_builder.add_text_field("barcode", STRING | STORED);

    // Not stored: names are hydrated from the keyed store
    let name_indexing = TextFieldIndexing::default()
        .set_tokenizer(NAME_TOKENIZER)
        .set_index_option(IndexRecordOption::WithFreqsAndPositions);
    let name_folded = schema_builder.add_text_field(
        "name_folded",
        TextOptions::default().set_indexing_options(name_indexing),
    );

    let schema = schema_builder.build();

    NameSchema {
        schema,
        barcode,
        name_folded,
    }
}
