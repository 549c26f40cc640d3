use std::{fmt, sync::Arc};

use crate::{
    book::Book,
    error::{LibraryError, Result},
    similarity::SimilarityCalculator,
};

/// One weighted member of a [`CompositeSimilarity`]
#[derive(Clone)]
struct WeightedCalculator {
    calculator: Arc<dyn SimilarityCalculator>,
    weight: f64,
}

impl fmt::Debug for WeightedCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedCalculator")
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

/// Linear blend of other calculators.
///
/// sim(a, b) = Σ(weight_i * calculator_i(a, b))
///
/// The weights need not add up to 1 and the sum is not renormalised.
/// Every member is evaluated, including those with weight 0. A member with
/// weight 0 adds nothing, even when it returns NaN or an infinity.
#[derive(Debug, Clone)]
pub struct CompositeSimilarity {
    members: Vec<WeightedCalculator>,
}

impl CompositeSimilarity {
    /// # Errors
    /// * `InvalidInput` - no members, or a weight that is negative or not finite
    pub fn new<I>(members: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Arc<dyn SimilarityCalculator>, f64)>,
    {
        let members: Vec<WeightedCalculator> = members
            .into_iter()
            .map(|(calculator, weight)| WeightedCalculator { calculator, weight })
            .collect();
        if members.is_empty() {
            return Err(LibraryError::invalid_input(
                "composite similarity needs at least one calculator",
            ));
        }
        if let Some(bad) = members.iter().find(|m| !m.weight.is_finite() || m.weight < 0.0) {
            return Err(LibraryError::invalid_input(format!(
                "similarity weight must be a non-negative finite number, got {}",
                bad.weight
            )));
        }
        Ok(Self { members })
    }
}

impl SimilarityCalculator for CompositeSimilarity {
    fn calculate_similarity(&self, first: &Book, second: &Book) -> f64 {
        self.members
            .iter()
            .map(|m| {
                let score = m.calculator.calculate_similarity(first, second);
                if m.weight == 0.0 {
                    0.0
                } else {
                    score * m.weight
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn book(id: &str) -> Book {
        Book {
            id: id.to_string(),
            title: String::new(),
            author: String::new(),
            description: String::new(),
            genres: Vec::new(),
            rating: 0.0,
            rating_count: 0,
            url: String::new(),
        }
    }

    fn constant(score: f64) -> Arc<dyn SimilarityCalculator> {
        Arc::new(move |_: &Book, _: &Book| score)
    }

    #[test]
    fn empty_members_are_rejected() {
        let result = CompositeSimilarity::new(Vec::new());
        assert!(matches!(result, Err(LibraryError::InvalidInput(_))));
    }

    #[test]
    fn negative_or_nan_weights_are_rejected() {
        for weight in [-0.5, f64::NAN, f64::INFINITY] {
            let result = CompositeSimilarity::new(vec![(constant(1.0), weight)]);
            assert!(matches!(result, Err(LibraryError::InvalidInput(_))), "weight {weight}");
        }
    }

    #[test]
    fn weighted_sum_matches_manual_computation() {
        let composite = CompositeSimilarity::new(vec![
            (constant(0.8), 0.6),
            (constant(0.5), 0.4),
        ])
        .unwrap();
        let score = composite.calculate_similarity(&book("a"), &book("b"));
        assert!((score - (0.8 * 0.6 + 0.5 * 0.4)).abs() < 1e-12);
    }

    #[test]
    fn weights_are_not_renormalised() {
        let composite = CompositeSimilarity::new(vec![
            (constant(1.0), 2.0),
            (constant(0.5), 3.0),
        ])
        .unwrap();
        let score = composite.calculate_similarity(&book("a"), &book("b"));
        assert!((score - 3.5).abs() < 1e-12);
    }

    #[test]
    fn zero_weights_give_zero_but_still_call_members() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = {
            let calls = Arc::clone(&calls);
            Arc::new(move |_: &Book, _: &Book| {
                calls.fetch_add(1, Ordering::SeqCst);
                0.9
            }) as Arc<dyn SimilarityCalculator>
        };
        let composite = CompositeSimilarity::new(vec![
            (counter, 0.0),
            (constant(0.7), 0.0),
        ])
        .unwrap();

        assert_eq!(composite.calculate_similarity(&book("a"), &book("b")), 0.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn zero_weight_member_cannot_poison_the_sum() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let composite = CompositeSimilarity::new(vec![
                (constant(bad), 0.0),
                (constant(0.7), 1.0),
            ])
            .unwrap();
            let score = composite.calculate_similarity(&book("a"), &book("b"));
            assert_eq!(score, 0.7, "zero-weight member returned {bad}");
        }
    }
}
