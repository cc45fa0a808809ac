use crate::error::{Result, SearchError};
use crate::tokenizer::{split_into_words, StopWords};
use std::collections::BTreeSet;

const MINUS_MARKER: char = '-';

/// Parsed query: words a result should contain and words that veto a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

#[derive(Debug)]
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
    is_stop: bool,
}

fn parse_query_word<'a>(word: &'a str, stop_words: &StopWords) -> Result<QueryWord<'a>> {
    let (data, is_minus) = match word.strip_prefix(MINUS_MARKER) {
        Some(rest) => (rest, true),
        None => (word, false),
    };

    if is_minus {
        if data.is_empty() {
            return Err(SearchError::MalformedQuery {
                word: word.to_string(),
                reason: "minus marker without a word",
            });
        }
        if data.starts_with(MINUS_MARKER) {
            return Err(SearchError::MalformedQuery {
                word: word.to_string(),
                reason: "double minus marker",
            });
        }
    }

    Ok(QueryWord {
        data,
        is_minus,
        is_stop: stop_words.contains(data),
    })
}

/// Parse raw query text into plus and minus word sets.
///
/// Stop words are dropped from both sets. A word that is both required and
/// excluded only stays in `minus_words`, since exclusion always wins.
pub fn parse_query(text: &str, stop_words: &StopWords) -> Result<Query> {
    let mut query = Query::default();

    for word in split_into_words(text) {
        let query_word = parse_query_word(word, stop_words)?;
        if query_word.is_stop {
            continue;
        }
        if query_word.is_minus {
            query.minus_words.insert(query_word.data.to_string());
        } else {
            query.plus_words.insert(query_word.data.to_string());
        }
    }

    let minus_words = &query.minus_words;
    query.plus_words.retain(|word| !minus_words.contains(word));

    Ok(query)
}
