use crate::document::{DocumentData, DocumentStatus};
use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inverted index: word -> document id -> term frequency
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    word_to_document_freqs: BTreeMap<String, BTreeMap<i32, f64>>,
    documents: BTreeMap<i32, DocumentData>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document given its words with stop words already removed.
    ///
    /// Nothing is written unless the id is new and `words` is non-empty.
    pub fn add_document(
        &mut self,
        document_id: i32,
        words: &[&str],
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if self.documents.contains_key(&document_id) {
            return Err(SearchError::DuplicateId(document_id));
        }
        if words.is_empty() {
            return Err(SearchError::EmptyDocument { id: document_id });
        }

        let inv_word_count = 1.0 / words.len() as f64;
        for &word in words {
            *self
                .word_to_document_freqs
                .entry(word.to_string())
                .or_default()
                .entry(document_id)
                .or_insert(0.0) += inv_word_count;
        }

        self.documents.insert(document_id, DocumentData::new(ratings, status));
        Ok(())
    }

    /// Number of stored documents
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.word_to_document_freqs.contains_key(word)
    }

    /// Documents containing `word` with its term frequency in each.
    /// Returns `None` for words that were never indexed.
    pub fn documents_containing(&self, word: &str) -> Option<&BTreeMap<i32, f64>> {
        self.word_to_document_freqs.get(word)
    }

    /// `ln(total documents / documents containing word)`, or `None` if the
    /// word is not indexed.
    pub fn inverse_document_freq(&self, word: &str) -> Option<f64> {
        self.documents_containing(word)
            .map(|docs| (self.document_count() as f64 / docs.len() as f64).ln())
    }

    /// Whether `word` occurs in document `document_id`
    pub fn document_has_word(&self, document_id: i32, word: &str) -> bool {
        self.documents_containing(word)
            .map_or(false, |docs| docs.contains_key(&document_id))
    }

    pub fn metadata(&self, document_id: i32) -> Option<&DocumentData> {
        self.documents.get(&document_id)
    }

    /// Stored ids in ascending order
    pub fn document_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.documents.keys().copied()
    }

    /// Get index statistics
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            total_documents: self.documents.len(),
            total_terms: self.word_to_document_freqs.len(),
            avg_docs_per_term: if self.word_to_document_freqs.is_empty() {
                0.0
            } else {
                self.word_to_document_freqs
                    .values()
                    .map(|docs| docs.len())
                    .sum::<usize>() as f64
                    / self.word_to_document_freqs.len() as f64
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_documents: usize,
    pub total_terms: usize,
    pub avg_docs_per_term: f64,
}
