use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::vectorizer::term_vector::TermVector;

/// keep document count and per-token document counts
///
/// A token is counted at most once per document no matter how often it
/// occurs there. The corpus is built once and only read afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    /// number of documents added
    doc_num: u64,
    /// number of documents containing each token
    #[serde(with = "indexmap::map::serde_seq")]
    token_doc_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            token_doc_counts: IndexMap::new(),
        }
    }

    /// Add one document given its tokens. Repeated tokens count once.
    pub fn add_set<I, T>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.doc_num += 1;
        let seen: IndexSet<Box<str>> = tokens
            .into_iter()
            .map(|token| Box::from(token.as_ref()))
            .collect();
        for token in seen {
            *self.token_doc_counts.entry(token).or_insert(0) += 1;
        }
    }

    /// Get the number of documents in the corpus
    #[inline]
    pub fn get_doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Get the number of documents containing `token`
    #[inline]
    pub fn get_token_count(&self, token: &str) -> u64 {
        self.token_doc_counts.get(token).copied().unwrap_or(0)
    }

    /// Get the current vocabulary size (number of unique tokens)
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.token_doc_counts.len()
    }

    /// Smoothed inverse document frequency of one token.
    ///
    /// idf = ln(doc_num / (1 + doc_freq))
    ///
    /// The `1 +` keeps unseen tokens finite. Tokens present in more than
    /// doc_num / e documents get a negative weight, which is kept as is.
    #[inline]
    pub fn idf(&self, token: &str) -> f64 {
        let doc_num = self.doc_num as f64;
        let doc_freq = self.get_token_count(token) as f64;
        (doc_num / (1.0 + doc_freq)).ln()
    }

    /// IDF of every distinct token in `tokens`, in first-seen order
    pub fn idf_vector<I, T>(&self, tokens: I) -> TermVector<f64>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut idf_vec = TermVector::new();
        for token in tokens {
            let token = token.as_ref();
            if !idf_vec.contains_token(token) {
                idf_vec.insert(token, self.idf(token));
            }
        }
        idf_vec
    }
}

impl<D, T> FromIterator<D> for Corpus
where
    D: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = D>>(iter: I) -> Self {
        let mut corpus = Corpus::new();
        for doc in iter {
            corpus.add_set(doc);
        }
        corpus
    }
}
