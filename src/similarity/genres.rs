use std::collections::HashSet;

use crate::{book::Book, similarity::SimilarityCalculator};

/// Overlap of two books' genre sets, normalised by the smaller set.
///
/// sim(a, b) = |A ∩ B| / min(|A|, |B|)
///
/// Genre labels are trimmed and, unless case sensitivity is switched on,
/// compared case-insensitively. Both sides are de-duplicated before the
/// sizes are taken, so repeated labels never lower the score. A book
/// without genres scores 0.0 against everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenresOverlapSimilarity {
    case_sensitive: bool,
}

impl GenresOverlapSimilarity {
    /// Case-insensitive by default, unlike strict label matching; call
    /// `with_case_sensitive(true)` to compare labels exactly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare genre labels byte for byte instead of ignoring case
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    fn genre_set(&self, book: &Book) -> HashSet<String> {
        book.genres
            .iter()
            .map(|genre| genre.trim())
            .filter(|genre| !genre.is_empty())
            .map(|genre| {
                if self.case_sensitive {
                    genre.to_string()
                } else {
                    genre.to_lowercase()
                }
            })
            .collect()
    }
}

impl SimilarityCalculator for GenresOverlapSimilarity {
    fn calculate_similarity(&self, first: &Book, second: &Book) -> f64 {
        let first_genres = self.genre_set(first);
        let second_genres = self.genre_set(second);

        let min_size = first_genres.len().min(second_genres.len());
        if min_size == 0 {
            return 0.0;
        }
        let intersection = first_genres.intersection(&second_genres).count();
        intersection as f64 / min_size as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(genres: &[&str]) -> Book {
        Book {
            id: "1".to_string(),
            title: "Title".to_string(),
            author: "Author".to_string(),
            description: "Description".to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            rating: 4.0,
            rating_count: 10,
            url: "https://example.com".to_string(),
        }
    }

    #[test]
    fn identical_genres_score_one() {
        let calc = GenresOverlapSimilarity::new();
        let a = book(&["Fantasy", "Adventure"]);
        let b = book(&["Adventure", "Fantasy"]);
        assert_eq!(calc.calculate_similarity(&a, &b), 1.0);
    }

    #[test]
    fn disjoint_genres_score_zero() {
        let calc = GenresOverlapSimilarity::new();
        let a = book(&["Fantasy", "Adventure"]);
        let b = book(&["Romance", "Drama"]);
        assert_eq!(calc.calculate_similarity(&a, &b), 0.0);
    }

    #[test]
    fn partial_overlap_scores_half() {
        let calc = GenresOverlapSimilarity::new();
        let a = book(&["Fantasy", "Adventure"]);
        let b = book(&["Fantasy", "Science Fiction"]);
        assert_eq!(calc.calculate_similarity(&a, &b), 0.5);
    }

    #[test]
    fn normalises_by_smaller_set() {
        let calc = GenresOverlapSimilarity::new();
        let a = book(&["Fantasy"]);
        let b = book(&["Fantasy", "Adventure", "Classics", "Fiction"]);
        assert_eq!(calc.calculate_similarity(&a, &b), 1.0);
        assert_eq!(calc.calculate_similarity(&b, &a), 1.0);
    }

    #[test]
    fn empty_genres_score_zero() {
        let calc = GenresOverlapSimilarity::new();
        let empty = book(&[]);
        let some = book(&["Fantasy"]);
        assert_eq!(calc.calculate_similarity(&empty, &some), 0.0);
        assert_eq!(calc.calculate_similarity(&some, &empty), 0.0);
        assert_eq!(calc.calculate_similarity(&empty, &empty), 0.0);
    }

    #[test]
    fn duplicates_do_not_lower_the_score() {
        let calc = GenresOverlapSimilarity::new();
        let a = book(&["Fantasy", "Fantasy"]);
        let b = book(&["Fantasy", "Adventure"]);
        assert_eq!(calc.calculate_similarity(&a, &b), 1.0);
    }

    #[test]
    fn case_is_ignored_by_default() {
        let a = book(&["fantasy", "Adventure"]);
        let b = book(&["Fantasy", "ADVENTURE"]);
        assert_eq!(GenresOverlapSimilarity::new().calculate_similarity(&a, &b), 1.0);

        let strict = GenresOverlapSimilarity::new().with_case_sensitive(true);
        assert_eq!(strict.calculate_similarity(&a, &b), 0.0);
    }
}
