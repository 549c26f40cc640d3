pub mod composite;
pub mod genres;
pub mod tfidf;

use crate::book::Book;

/// Scores how similar two books are.
///
/// Implementations are injected into [`CompositeSimilarity`] and
/// [`BookRecommender`](crate::recommender::BookRecommender). The built-in
/// metrics return a value in `[0.0, 1.0]` and are symmetric; a composite
/// may return any finite sum, and caller-supplied strategies need not be
/// symmetric.
///
/// Any `Fn(&Book, &Book) -> f64` closure is a calculator too.
pub trait SimilarityCalculator: Send + Sync {
    fn calculate_similarity(&self, first: &Book, second: &Book) -> f64;
}

impl<F> SimilarityCalculator for F
where
    F: Fn(&Book, &Book) -> f64 + Send + Sync,
{
    #[inline]
    fn calculate_similarity(&self, first: &Book, second: &Book) -> f64 {
        self(first, second)
    }
}

pub use composite::CompositeSimilarity;
pub use genres::GenresOverlapSimilarity;
pub use tfidf::TfIdfSimilarity;
