use crate::document::{Document, DocumentData, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::index::{IndexStats, InvertedIndex};
use crate::query::{parse_query, Query};
use crate::ranking::rank_documents;
use crate::tokenizer::StopWords;
use serde::{Deserialize, Serialize};

/// A document as supplied by callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    pub id: i32,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

impl NewDocument {
    pub fn new(id: i32, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            status: DocumentStatus::Actual,
            ratings: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: DocumentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_ratings(mut self, ratings: Vec<i32>) -> Self {
        self.ratings = ratings;
        self
    }
}

/// Words of a query found in a document, plus that document's status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub words: Vec<String>,
    pub status: DocumentStatus,
}

/// In-memory search server.
///
/// Stop words only affect documents added after they are configured; words
/// already in the index are never filtered retroactively.
#[derive(Debug, Clone, Default)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
}

impl SearchServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a server with the words of `stop_words` configured
    pub fn with_stop_words(stop_words: &str) -> Self {
        let mut server = Self::new();
        server.set_stop_words(stop_words);
        server
    }

    /// Add the words of `text` to the stop words
    pub fn set_stop_words(&mut self, text: &str) {
        if self.index.document_count() > 0 {
            tracing::warn!(
                documents = self.index.document_count(),
                "stop words changed after indexing; existing documents keep their words"
            );
        }
        self.stop_words.extend_from_text(text);
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Index a document. Fails on a reused id or a document made only of
    /// stop words.
    pub fn add_document(
        &mut self,
        document_id: i32,
        document: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        let words = self.stop_words.split_into_words_no_stop(document);
        self.index.add_document(document_id, &words, status, ratings)?;

        tracing::debug!(
            document_id,
            words = words.len(),
            %status,
            "document indexed"
        );
        Ok(())
    }

    /// Add documents in order, stopping at the first failure
    pub fn add_documents<I>(&mut self, documents: I) -> Result<usize>
    where
        I: IntoIterator<Item = NewDocument>,
    {
        let mut added = 0;
        for doc in documents {
            self.add_document(doc.id, &doc.text, doc.status, &doc.ratings)?;
            added += 1;
        }
        Ok(added)
    }

    /// Top documents with status `ACTUAL`
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents accepted by `predicate(id, status, rating)`
    pub fn find_top_documents_with<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(i32, DocumentStatus, i32) -> bool,
    {
        let query = self.parse_query(raw_query)?;
        let documents = rank_documents(&self.index, &query, predicate);

        tracing::debug!(
            plus_words = query.plus_words.len(),
            minus_words = query.minus_words.len(),
            found = documents.len(),
            "query ranked"
        );
        Ok(documents)
    }

    pub fn get_document_count(&self) -> usize {
        self.index.document_count()
    }

    /// Plus words of the query contained in the document, sorted. Empty if
    /// the document contains any minus word.
    pub fn match_document(&self, raw_query: &str, document_id: i32) -> Result<MatchResult> {
        let DocumentData { status, .. } = *self
            .index
            .metadata(document_id)
            .ok_or(SearchError::UnknownDocumentId(document_id))?;
        let query = self.parse_query(raw_query)?;

        let vetoed = query
            .minus_words
            .iter()
            .any(|word| self.index.document_has_word(document_id, word));

        let words = if vetoed {
            Vec::new()
        } else {
            query
                .plus_words
                .into_iter()
                .filter(|word| self.index.document_has_word(document_id, word))
                .collect()
        };

        Ok(MatchResult { words, status })
    }

    pub fn document_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.index.document_ids()
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    fn parse_query(&self, raw_query: &str) -> Result<Query> {
        parse_query(raw_query, &self.stop_words)
    }
}
