pub mod api;
pub mod document;
pub mod engine;
pub mod error;
pub mod index;
pub mod query;
pub mod ranking;
pub mod tokenizer;

// Re-export commonly used types
pub use document::{Document, DocumentStatus};
pub use engine::{MatchResult, NewDocument, SearchServer};
pub use error::{Result, SearchError};
pub use index::{IndexStats, InvertedIndex};
pub use query::Query;
pub use tokenizer::StopWords;

/// Maximum number of documents returned by a search
pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;

/// Relevances closer than this are ordered by rating instead
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_workflow() -> Result<()> {
        let mut server = SearchServer::with_stop_words("in the");
        server.add_document(42, "cat in the city", DocumentStatus::Actual, &[1, 2, 3])?;

        let found = server.find_top_documents("city -dog")?;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 42);
        assert_eq!(found[0].rating, 2);

        Ok(())
    }
}
