use crate::document::{Document, DocumentStatus};
use crate::index::InvertedIndex;
use crate::query::Query;
use crate::{MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use std::collections::BTreeMap;

/// Score every document that contains at least one plus word and passes
/// `predicate`, then drop documents containing any minus word.
///
/// Relevance is the sum of TF-IDF over the plus words a document contains.
pub fn find_all_documents<P>(index: &InvertedIndex, query: &Query, predicate: P) -> Vec<Document>
where
    P: Fn(i32, DocumentStatus, i32) -> bool,
{
    let mut document_to_relevance: BTreeMap<i32, f64> = BTreeMap::new();

    for word in &query.plus_words {
        let (Some(docs), Some(idf)) = (
            index.documents_containing(word),
            index.inverse_document_freq(word),
        ) else {
            continue;
        };

        for (&document_id, &term_freq) in docs {
            let Some(data) = index.metadata(document_id) else {
                continue;
            };
            if predicate(document_id, data.status, data.rating) {
                *document_to_relevance.entry(document_id).or_insert(0.0) += term_freq * idf;
            }
        }
    }

    for word in &query.minus_words {
        if let Some(docs) = index.documents_containing(word) {
            for document_id in docs.keys() {
                document_to_relevance.remove(document_id);
            }
        }
    }

    document_to_relevance
        .into_iter()
        .filter_map(|(document_id, relevance)| {
            index
                .metadata(document_id)
                .map(|data| Document::new(document_id, relevance, data.rating))
        })
        .collect()
}

/// Sort by descending relevance. Documents whose relevance is within
/// `RELEVANCE_EPSILON` of the first document of their run are ordered by
/// descending rating.
pub fn sort_by_relevance(documents: &mut [Document]) {
    documents.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));

    let mut start = 0;
    while start < documents.len() {
        let leader = documents[start].relevance;
        let end = documents[start..]
            .iter()
            .position(|doc| leader - doc.relevance >= RELEVANCE_EPSILON)
            .map_or(documents.len(), |offset| start + offset);

        documents[start..end].sort_by(|a, b| b.rating.cmp(&a.rating));
        start = end;
    }
}

/// Find, sort and truncate to `MAX_RESULT_DOCUMENT_COUNT`
pub fn rank_documents<P>(index: &InvertedIndex, query: &Query, predicate: P) -> Vec<Document>
where
    P: Fn(i32, DocumentStatus, i32) -> bool,
{
    let mut documents = find_all_documents(index, query, predicate);
    sort_by_relevance(&mut documents);
    documents.truncate(MAX_RESULT_DOCUMENT_COUNT);
    documents
}
