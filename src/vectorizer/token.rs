use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::vectorizer::term_vector::TermVector;

/// TokenFrequency 構造体
/// Occurrence counts of the tokens of a single document.
///
/// Keeps the count of each distinct token and the total number of tokens,
/// which is everything the relative term frequency needs.
///
/// # Examples
/// ```
/// use book_recommender::TokenFrequency;
/// let mut token_freq = TokenFrequency::new();
/// token_freq.add_token("dragon");
/// token_freq.add_token("knight");
/// token_freq.add_token("dragon");
///
/// let tf = token_freq.tf_vector();
/// assert_eq!(tf.get("dragon"), Some(2.0 / 3.0));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u32>,
    total_token_count: u64,
}

/// Tokenの追加
impl TokenFrequency {
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// tokenを追加する
    ///
    /// # Arguments
    /// * `token` - token to count once more
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        let count = self.token_count.entry(token.to_string()).or_insert(0);
        *count += 1;
        self.total_token_count += 1;
        self
    }

    /// 複数のtokenを追加する
    ///
    /// # Arguments
    /// * `tokens` - tokens to count, in any order
    #[inline]
    pub fn add_tokens<I, T>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }
}

impl<T> FromIterator<T> for TokenFrequency
where
    T: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut freq = TokenFrequency::new();
        freq.add_tokens(iter);
        freq
    }
}

/// TF-calculationの実装
impl TokenFrequency {
    /// Relative frequency of every distinct token: count / total tokens.
    ///
    /// # Returns
    /// * `TermVector<f64>` - empty when no token was counted
    pub fn tf_vector(&self) -> TermVector<f64> {
        if self.total_token_count == 0 {
            return TermVector::new();
        }
        let total = self.total_token_count as f64;
        self.token_count
            .iter()
            .map(|(token, &count)| (token.as_str(), count as f64 / total))
            .collect()
    }
}

/// 情報取得
impl TokenFrequency {
    /// count of one token, zero when absent
    #[inline]
    pub fn token_count(&self, token: &str) -> u32 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// total number of tokens counted, duplicates included
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// number of distinct tokens
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total_token_count == 0
    }

    /// distinct tokens in first-seen order
    #[inline]
    pub fn token_set_ref_str(&self) -> Vec<&str> {
        self.token_count.keys().map(|s| s.as_str()).collect()
    }
}
