//! Barcode-keyed name index: one writer, one reader.
//!
//! Opened for writing, every commit reloads the reader before returning, so
//! a committed change is visible to the very next search. Opened read-only,
//! no writer (and so no index lock) is taken and every write is refused.
//! The `IndexReader` is thread-safe; only write paths take the writer mutex.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query};
use tantivy::schema::Value;
use tantivy::{doc, IndexReader, IndexWriter, TantivyDocument, Term};
use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::index::{SearchIndex, SearchIndexConfig};
use crate::query::BoostedClause;

/// A pending change to the name index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOp {
    /// Replace the document for `barcode` with a new folded name
    Upsert { barcode: String, name_folded: String },
    /// Drop any document for `barcode`
    Remove { barcode: String },
}

/// A search hit with its combined score.
#[derive(Debug, Clone, PartialEq)]
pub struct NameHit {
    pub barcode: String,
    pub score: f32,
}

pub struct NameIndex {
    index: SearchIndex,
    writer: Option<Mutex<IndexWriter>>,
    reader: IndexReader,
}

impl NameIndex {
    /// Open or create a writable index. Fails if another writer holds the
    /// index lock.
    pub fn open_or_create(config: SearchIndexConfig) -> Result<Self, SearchError> {
        let index = SearchIndex::open_or_create(config)?;
        let writer = index.writer()?;
        let reader = index.reader()?;
        Ok(Self {
            index,
            writer: Some(Mutex::new(writer)),
            reader,
        })
    }

    /// Open an existing index for search only.
    pub fn open_read_only(path: &Path) -> Result<Self, SearchError> {
        let index = SearchIndex::open_existing(SearchIndexConfig::new(path))?;
        let reader = index.reader()?;
        info!(path = ?path, docs = reader.searcher().num_docs(), "Opened name index read-only");
        Ok(Self {
            index,
            writer: None,
            reader,
        })
    }

    pub fn is_read_only(&self) -> bool {
        self.writer.is_none()
    }

    pub fn path(&self) -> &Path {
        self.index.path()
    }

    /// Index one name and make it searchable.
    pub fn upsert(&self, barcode: &str, name_folded: &str) -> Result<(), SearchError> {
        self.commit_ops(&[IndexOp::Upsert {
            barcode: barcode.to_string(),
            name_folded: name_folded.to_string(),
        }])
    }

    /// Remove a barcode's document and commit.
    pub fn remove(&self, barcode: &str) -> Result<(), SearchError> {
        self.commit_ops(&[IndexOp::Remove {
            barcode: barcode.to_string(),
        }])
    }

    /// Apply a batch of operations, in order, in one commit.
    ///
    /// Every write deletes the barcode's previous document first, so
    /// re-indexing never duplicates. Staged operations are rolled back if
    /// staging or the commit fails.
    pub fn commit_ops(&self, ops: &[IndexOp]) -> Result<(), SearchError> {
        let mut writer = self.lock_writer()?;
        let committed = self
            .stage(&writer, ops)
            .and_then(|()| writer.commit().map_err(SearchError::from));

        match committed {
            Ok(opstamp) => {
                debug!(opstamp, ops = ops.len(), "Committed name index");
            }
            Err(e) => {
                Self::discard_staged(&mut writer, &e);
                return Err(e);
            }
        }
        drop(writer);

        self.reader.reload()?;
        Ok(())
    }

    /// Run the clauses as "should" clauses and return at most `limit` hits,
    /// best first. Ties keep Tantivy's native document order.
    pub fn search(
        &self,
        clauses: &[BoostedClause],
        limit: usize,
    ) -> Result<Vec<NameHit>, SearchError> {
        let schema = self.index.schema();
        let subqueries: Vec<(Occur, Box<dyn Query>)> = clauses
            .iter()
            .filter_map(|clause| clause.to_query(schema.name_folded))
            .map(|query| (Occur::Should, query))
            .collect();

        if subqueries.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let searcher = self.reader.searcher();
        let top_docs = searcher.search(&BooleanQuery::new(subqueries), &TopDocs::with_limit(limit))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, address) in top_docs {
            let doc: TantivyDocument = searcher.doc(address)?;
            match doc.get_first(schema.barcode).and_then(|v| v.as_str()) {
                Some(barcode) if !barcode.is_empty() => hits.push(NameHit {
                    barcode: barcode.to_string(),
                    score,
                }),
                _ => continue,
            }
        }

        debug!(clauses = clauses.len(), hits = hits.len(), "Name search complete");
        Ok(hits)
    }

    /// Live documents visible to the current reader.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    fn lock_writer(&self) -> Result<MutexGuard<'_, IndexWriter>, SearchError> {
        self.writer
            .as_ref()
            .ok_or(SearchError::ReadOnly)?
            .lock()
            .map_err(|e| SearchError::IndexLocked(e.to_string()))
    }

    fn stage(&self, writer: &IndexWriter, ops: &[IndexOp]) -> Result<(), SearchError> {
        let schema = self.index.schema();
        for op in ops {
            match op {
                IndexOp::Upsert {
                    barcode,
                    name_folded,
                } => {
                    writer.delete_term(Term::from_field_text(schema.barcode, barcode));
                    writer.add_document(doc!(
                        schema.barcode => barcode.as_str(),
                        schema.name_folded => name_folded.as_str()
                    ))?;
                }
                IndexOp::Remove { barcode } => {
                    writer.delete_term(Term::from_field_text(schema.barcode, barcode));
                }
            }
        }
        Ok(())
    }

    /// Roll back whatever `stage` left behind after `cause` aborted a commit.
    fn discard_staged(writer: &mut IndexWriter, cause: &SearchError) {
        match writer.rollback() {
            Ok(opstamp) => warn!(opstamp, error = %cause, "Rolled back name index"),
            Err(rollback_err) => warn!(
                error = %cause,
                rollback_error = %rollback_err,
                "Name index rollback failed"
            ),
        }
    }
}
