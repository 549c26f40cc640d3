use std::cmp::Ordering;

use indexmap::IndexMap;
use num::Float;
use serde::{Deserialize, Serialize};

/// Sparse vector keyed by token.
///
/// Tokens that are absent have weight zero. Entries keep insertion order,
/// so iteration is deterministic for a given construction order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "N: Serialize", deserialize = "N: Deserialize<'de>"))]
pub struct TermVector<N = f64>
where
    N: Float,
{
    #[serde(with = "indexmap::map::serde_seq")]
    entries: IndexMap<String, N>,
}

impl<N> Default for TermVector<N>
where
    N: Float,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> TermVector<N>
where
    N: Float,
{
    pub fn new() -> Self {
        TermVector {
            entries: IndexMap::new(),
        }
    }

    /// set the weight of a token, replacing any previous weight
    #[inline]
    pub fn insert(&mut self, token: impl Into<String>, weight: N) -> &mut Self {
        self.entries.insert(token.into(), weight);
        self
    }

    /// weight of a token, `None` when absent
    #[inline]
    pub fn get(&self, token: &str) -> Option<N> {
        self.entries.get(token).copied()
    }

    /// weight of a token, zero when absent
    #[inline]
    pub fn weight(&self, token: &str) -> N {
        self.get(token).unwrap_or_else(N::zero)
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, N)> + '_ {
        self.entries.iter().map(|(token, &weight)| (token.as_str(), weight))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Elementwise product restricted to the tokens of `self`.
    /// Tokens missing from `other` get weight zero.
    ///
    /// # Arguments
    /// * `other` - vector supplying the per-token multiplier
    ///
    /// # Returns
    /// * `TermVector<N>` - same keys as `self`
    pub fn hadamard(&self, other: &Self) -> Self {
        self.entries
            .iter()
            .map(|(token, &weight)| (token.clone(), weight * other.weight(token)))
            .collect()
    }

    /// Dot product over the tokens present in both vectors.
    /// d(a, b) = Σ(a_i * b_i)
    ///
    /// `a.dot(&b)` and `b.dot(&a)` are bit-for-bit equal: the summation order
    /// depends only on the pair, not on which side is `self`.
    pub fn dot(&self, other: &Self) -> N {
        // iterate the smaller side, equal sizes by token order, look up in the other
        let self_first = match self.len().cmp(&other.len()) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => self.tokens().le(other.tokens()),
        };
        let (small, large) = if self_first { (self, other) } else { (other, self) };
        let mut result = N::zero();
        for (token, weight) in small.iter() {
            if let Some(other_weight) = large.get(token) {
                result = result + weight * other_weight;
            }
        }
        result
    }

    /// Σ(a_i^2)
    pub fn norm_sq(&self) -> N {
        let mut result = N::zero();
        for (_, weight) in self.iter() {
            result = result + weight * weight;
        }
        result
    }

    /// Euclidean norm
    /// ||a|| = sqrt(Σ(a_i^2))
    #[inline]
    pub fn magnitude(&self) -> N {
        self.norm_sq().sqrt()
    }

    /// Cosine similarity
    /// cos(θ) = Σ(a_i * b_i) / (||a|| * ||b||)
    ///
    /// Zero when either vector has zero magnitude.
    pub fn cosine_similarity(&self, other: &Self) -> N {
        let magnitude_a = self.magnitude();
        let magnitude_b = other.magnitude();
        if magnitude_a.is_zero() || magnitude_b.is_zero() {
            return N::zero();
        }
        self.dot(other) / (magnitude_a * magnitude_b)
    }
}

impl<N, S> FromIterator<(S, N)> for TermVector<N>
where
    N: Float,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, N)>>(iter: I) -> Self {
        TermVector {
            entries: iter.into_iter().map(|(token, weight)| (token.into(), weight)).collect(),
        }
    }
}
