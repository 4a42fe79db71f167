//! In-memory engines for exercising the dual store without RocksDB or
//! Tantivy. Both engines append to a shared journal so tests can assert
//! commit order, and either can be told to fail its next commit.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use food_search::{BoostedClause, NameHit, NameQuery, SearchError};
use food_storage::StorageError;

use crate::engine::{KeyValueEngine, SearchEngine};
use crate::error::StoreError;

pub type Journal = Arc<Mutex<Vec<String>>>;

#[derive(Default)]
pub struct MemoryKv {
    records: Mutex<HashMap<String, Vec<u8>>>,
    journal: Journal,
    fail_commit: AtomicBool,
}

impl MemoryKv {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Default::default()
        }
    }

    pub fn fail_next_commit(&self) {
        self.fail_commit.store(true, Ordering::SeqCst);
    }

    /// Write raw bytes, bypassing the codec.
    pub fn insert_raw(&self, barcode: &str, payload: &[u8]) {
        self.records
            .lock()
            .unwrap()
            .insert(barcode.to_string(), payload.to_vec());
    }
}

impl KeyValueEngine for MemoryKv {
    type Batch = Vec<(String, Vec<u8>)>;

    fn get(&self, barcode: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.records.lock().unwrap().get(barcode).cloned())
    }

    fn set(&self, barcode: &str, payload: &[u8]) -> Result<(), StoreError> {
        self.insert_raw(barcode, payload);
        self.journal.lock().unwrap().push(format!("kv:set:{barcode}"));
        Ok(())
    }

    fn open_batch(&self) -> Self::Batch {
        Vec::new()
    }

    fn batch_set(
        &self,
        batch: &mut Self::Batch,
        barcode: &str,
        payload: &[u8],
    ) -> Result<(), StoreError> {
        batch.push((barcode.to_string(), payload.to_vec()));
        Ok(())
    }

    fn commit_batch(&self, batch: Self::Batch) -> Result<(), StoreError> {
        if self.fail_commit.swap(false, Ordering::SeqCst) {
            return Err(StorageError::ColumnFamilyNotFound("injected".into()).into());
        }
        let mut records = self.records.lock().unwrap();
        let count = batch.len();
        for (barcode, payload) in batch {
            records.insert(barcode, payload);
        }
        self.journal
            .lock()
            .unwrap()
            .push(format!("kv:commit:{count}"));
        Ok(())
    }

    fn record_count(&self) -> Result<u64, StoreError> {
        Ok(self.records.lock().unwrap().len() as u64)
    }
}

/// Search engine scoring each document by the boosts of the clauses whose
/// tokens it contains. Phrase tiers match contiguous tokens, fuzzy tiers
/// match exact tokens only.
#[derive(Default)]
pub struct MemorySearch {
    docs: Mutex<Vec<(String, String)>>,
    journal: Journal,
    fail_commit: AtomicBool,
}

pub enum SearchOp {
    Index(String, String),
    Remove(String),
}

impl MemorySearch {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Default::default()
        }
    }

    pub fn fail_next_commit(&self) {
        self.fail_commit.store(true, Ordering::SeqCst);
    }

    pub fn contains(&self, barcode: &str) -> bool {
        self.docs.lock().unwrap().iter().any(|(b, _)| b == barcode)
    }

    fn upsert(docs: &mut Vec<(String, String)>, barcode: &str, name_folded: &str) {
        docs.retain(|(b, _)| b != barcode);
        docs.push((barcode.to_string(), name_folded.to_string()));
    }

    fn matches(name: &str, clause: &BoostedClause) -> bool {
        let words: Vec<&str> = name.split_whitespace().collect();
        let contiguous = |tokens: &[String], prefix_last: bool| {
            words.windows(tokens.len()).any(|w| {
                w.iter().zip(tokens).enumerate().all(|(i, (word, tok))| {
                    if prefix_last && i == tokens.len() - 1 {
                        word.starts_with(tok.as_str())
                    } else {
                        word == tok
                    }
                })
            })
        };
        match &clause.query {
            NameQuery::Phrase(tokens) => !tokens.is_empty() && contiguous(tokens, false),
            NameQuery::PhrasePrefix(tokens) => !tokens.is_empty() && contiguous(tokens, true),
            NameQuery::Fuzzy { token, .. } => words.contains(&token.as_str()),
        }
    }
}

impl SearchEngine for MemorySearch {
    type Batch = Vec<SearchOp>;

    fn index_document(&self, barcode: &str, name_folded: &str) -> Result<(), StoreError> {
        Self::upsert(&mut self.docs.lock().unwrap(), barcode, name_folded);
        self.journal.lock().unwrap().push(format!("search:index:{barcode}"));
        Ok(())
    }

    fn remove_document(&self, barcode: &str) -> Result<(), StoreError> {
        self.docs.lock().unwrap().retain(|(b, _)| b != barcode);
        self.journal.lock().unwrap().push(format!("search:remove:{barcode}"));
        Ok(())
    }

    fn search(
        &self,
        clauses: &[BoostedClause],
        limit: usize,
    ) -> Result<Vec<NameHit>, StoreError> {
        let docs = self.docs.lock().unwrap();
        let mut hits: Vec<NameHit> = docs
            .iter()
            .filter_map(|(barcode, name)| {
                let score: f32 = clauses
                    .iter()
                    .filter(|c| Self::matches(name, c))
                    .map(|c| c.boost)
                    .sum();
                (score > 0.0).then(|| NameHit {
                    barcode: barcode.clone(),
                    score,
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(limit);
        Ok(hits)
    }

    fn open_batch(&self) -> Self::Batch {
        Vec::new()
    }

    fn batch_index(&self, batch: &mut Self::Batch, barcode: &str, name_folded: &str) {
        batch.push(SearchOp::Index(barcode.to_string(), name_folded.to_string()));
    }

    fn batch_remove(&self, batch: &mut Self::Batch, barcode: &str) {
        batch.push(SearchOp::Remove(barcode.to_string()));
    }

    fn commit_batch(&self, batch: Self::Batch) -> Result<(), StoreError> {
        if self.fail_commit.swap(false, Ordering::SeqCst) {
            return Err(SearchError::IndexLocked("injected".into()).into());
        }
        let mut docs = self.docs.lock().unwrap();
        let count = batch.len();
        for op in batch {
            match op {
                SearchOp::Index(barcode, name) => Self::upsert(&mut docs, &barcode, &name),
                SearchOp::Remove(barcode) => docs.retain(|(b, _)| *b != barcode),
            }
        }
        self.journal
            .lock()
            .unwrap()
            .push(format!("search:commit:{count}"));
        Ok(())
    }

    fn document_count(&self) -> u64 {
        self.docs.lock().unwrap().len() as u64
    }
}
