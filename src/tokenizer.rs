use std::{
    collections::HashSet,
    io::{BufRead, BufReader, Read},
    str::SplitWhitespace,
    sync::Arc,
};

use crate::error::Result;

/// Turns free text into normalized word tokens.
///
/// Implementations must return an empty list for blank input and must never
/// yield blank tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

impl<T> Tokenizer for Arc<T>
where
    T: Tokenizer + ?Sized,
{
    #[inline]
    fn tokenize(&self, text: &str) -> Vec<String> {
        (**self).tokenize(text)
    }
}

/// Stopword-filtering word tokenizer.
///
/// ASCII punctuation is removed, text is lowercased and split on runs of
/// whitespace, and any word found in the stopword set is dropped.
#[derive(Debug, Clone, Default)]
pub struct TextTokenizer {
    stopwords: HashSet<String>,
}

impl TextTokenizer {
    pub fn new<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stopwords: stopwords.into_iter().map(Into::into).collect(),
        }
    }

    /// Read stopwords from a reader, one per line.
    /// Surrounding whitespace is trimmed and blank lines are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut stopwords = HashSet::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                stopwords.insert(word.to_string());
            }
        }
        Ok(Self { stopwords })
    }

    pub fn stopwords(&self) -> &HashSet<String> {
        &self.stopwords
    }

    /// Lazy token stream over `text`.
    /// The iterator is `Clone`, so a consumer can restart it cheaply.
    pub fn tokens<'a>(&'a self, text: &'a str) -> Tokens<'a> {
        Tokens {
            words: text.split_whitespace(),
            stopwords: &self.stopwords,
        }
    }
}

impl Tokenizer for TextTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokens(text).collect()
    }
}

/// Iterator returned by [`TextTokenizer::tokens`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    words: SplitWhitespace<'a>,
    stopwords: &'a HashSet<String>,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        for word in self.words.by_ref() {
            let token: String = word
                .chars()
                .filter(|c| !c.is_ascii_punctuation())
                .flat_map(char::to_lowercase)
                .collect();
            if token.is_empty() || self.stopwords.contains(&token) {
                continue;
            }
            return Some(token);
        }
        None
    }
}
