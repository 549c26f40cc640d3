use std::{cmp::Ordering, fmt, sync::Arc};

use indexmap::IndexSet;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{
    book::Book,
    config::RecommenderConfig,
    error::{LibraryError, Result},
    similarity::{
        CompositeSimilarity, GenresOverlapSimilarity, SimilarityCalculator, TfIdfSimilarity,
    },
    tokenizer::Tokenizer,
};

/// Ranked recommendations, best first.
///
/// Holds `(book, score)` pairs sorted by descending score. Equal scores are
/// ordered by book id, then title, author and url, all ascending.
#[derive(Clone, Default, PartialEq)]
pub struct Recommendations {
    pub list: Vec<(Book, f64)>,
}

impl Recommendations {
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Book, f64)> + '_ {
        self.list.iter().map(|(book, score)| (book, *score))
    }

    /// score of a recommended book, `None` if it was not recommended
    pub fn get(&self, book: &Book) -> Option<f64> {
        self.list.iter().find(|(b, _)| b == book).map(|(_, score)| *score)
    }

    pub fn contains(&self, book: &Book) -> bool {
        self.get(book).is_some()
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> + '_ {
        self.list.iter().map(|(book, _)| book)
    }
}

impl IntoIterator for Recommendations {
    type Item = (Book, f64);
    type IntoIter = std::vec::IntoIter<(Book, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl fmt::Debug for Recommendations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // one recommendation per line
            writeln!(f, "Recommendations [")?;
            for (book, score) in &self.list {
                writeln!(f, "    {:?} {:?}: {:.6}", book.id, book.title, score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|(book, score)| (&book.id, score)))
                .finish()
        }
    }
}

impl fmt::Display for Recommendations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (book, score) in &self.list {
            writeln!(f, "{:.6}\t{}\t{}", score, book.id, book.title)?;
        }
        Ok(())
    }
}

/// Content-based recommender over a fixed book collection.
///
/// Every book other than the origin is scored with the injected
/// [`SimilarityCalculator`] and the best `max_n` are returned.
/// Scoring runs on the rayon pool; ranking happens only after every score
/// is in.
#[derive(Clone)]
pub struct BookRecommender {
    books: Arc<[Book]>,
    calculator: Arc<dyn SimilarityCalculator>,
}

impl BookRecommender {
    /// The collection is copied, so later changes to the caller's data do
    /// not reach the recommender. Duplicate books collapse into one.
    ///
    /// # Errors
    /// * `InvalidInput` - the collection is empty
    pub fn new<I>(books: I, calculator: Arc<dyn SimilarityCalculator>) -> Result<Self>
    where
        I: IntoIterator<Item = Book>,
    {
        let books: IndexSet<Book> = books.into_iter().collect();
        if books.is_empty() {
            return Err(LibraryError::invalid_input("books must not be empty"));
        }
        debug!(books = books.len(), "book recommender ready");
        Ok(Self {
            books: books.into_iter().collect(),
            calculator,
        })
    }

    /// Build the default description + genre blend described by `config`.
    ///
    /// The TF-IDF corpus and the recommender share one snapshot of `books`.
    pub fn from_config<I, T>(books: I, tokenizer: T, config: &RecommenderConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Book>,
        T: Tokenizer + 'static,
    {
        let books: Vec<Book> = books.into_iter().collect();
        let descriptions = TfIdfSimilarity::new(books.iter().cloned(), tokenizer)?;
        let genres = GenresOverlapSimilarity::new().with_case_sensitive(config.case_sensitive_genres);
        let composite = CompositeSimilarity::new([
            (Arc::new(descriptions) as Arc<dyn SimilarityCalculator>, config.weights.description),
            (Arc::new(genres) as Arc<dyn SimilarityCalculator>, config.weights.genres),
        ])?;
        Self::new(books, Arc::new(composite))
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Recommend up to `max_n` books similar to `origin`.
    ///
    /// The origin itself is never part of the result, and every other book
    /// is a candidate, so the result holds `min(max_n, books - 1)` entries
    /// (one more when the origin is not in the collection). Scores are
    /// ranked with `f64::total_cmp`: a positive NaN ranks above every
    /// number and a negative NaN below.
    ///
    /// # Errors
    /// * `InvalidInput` - `max_n` is 0; nothing is scored in that case
    pub fn recommend_books(&self, origin: &Book, max_n: usize) -> Result<Recommendations> {
        if max_n == 0 {
            return Err(LibraryError::invalid_input("max_n must be greater than 0"));
        }

        let mut scored: Vec<(Book, f64)> = self
            .books
            .par_iter()
            .filter(|book| *book != origin)
            .map(|book| {
                let score = self.calculator.calculate_similarity(origin, book);
                trace!(candidate = %book.id, score, "scored candidate");
                (book.clone(), score)
            })
            .collect();

        scored.sort_by(|a, b| compare_candidates(a, b));
        scored.truncate(max_n);

        debug!(origin = %origin.id, returned = scored.len(), "recommendations ranked");
        Ok(Recommendations { list: scored })
    }
}

impl fmt::Debug for BookRecommender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookRecommender")
            .field("books", &self.books.len())
            .finish_non_exhaustive()
    }
}

/// Score descending by `total_cmp`, then id, title, author and url ascending.
fn compare_candidates(a: &(Book, f64), b: &(Book, f64)) -> Ordering {
    b.1.total_cmp(&a.1)
        .then_with(|| a.0.id.cmp(&b.0.id))
        .then_with(|| a.0.title.cmp(&b.0.title))
        .then_with(|| a.0.author.cmp(&b.0.author))
        .then_with(|| a.0.url.cmp(&b.0.url))
}
