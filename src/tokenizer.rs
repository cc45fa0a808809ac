use std::collections::BTreeSet;

/// Split text into words on ASCII spaces. Empty words are skipped and no
/// other character is treated as a separator.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> + Clone {
    text.split(' ').filter(|word| !word.is_empty())
}

/// Words ignored both when indexing documents and when parsing queries
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every word of `text` to the set. Existing stop words are kept.
    pub fn extend_from_text(&mut self, text: &str) {
        self.words.extend(split_into_words(text).map(str::to_string));
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words of `text` with stop words removed, in text order
    pub fn split_into_words_no_stop<'a>(&'a self, text: &'a str) -> Vec<&'a str> {
        split_into_words(text)
            .filter(|word| !self.contains(word))
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut stop_words = StopWords::new();
        for text in iter {
            stop_words.extend_from_text(text.as_ref());
        }
        stop_words
    }
}
