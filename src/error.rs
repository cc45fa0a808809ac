use thiserror::Error;

/// Errors returned by the search server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Document has no indexable words once stop words are removed
    #[error("document {id} has no words left after stop-word removal")]
    EmptyDocument { id: i32 },

    #[error("document with id {0} already exists")]
    DuplicateId(i32),

    #[error("document with id {0} not found")]
    UnknownDocumentId(i32),

    #[error("malformed query word '{word}': {reason}")]
    MalformedQuery { word: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, SearchError>;
