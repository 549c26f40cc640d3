/// This crate is an in-memory book search and recommendation engine.
pub mod book;
pub mod config;
pub mod error;
pub mod finder;
pub mod recommender;
pub mod similarity;
pub mod tokenizer;
pub mod vectorizer;

/// Book record
/// An immutable value holding id, title, author, description, genres,
/// rating, rating count and url.
///
/// Equality and hashing cover every field, so a `Book` can key a map or set.
/// Use `Book::from_fields` to build one from raw record fields with
/// validation, or `BookLoader` to read a whole CSV dataset.
pub use book::{loader::BookLoader, Book};

/// Book Recommender
/// Scores every book of a fixed collection against an origin book with an
/// injected similarity calculator and returns the best N.
///
/// Results come back as `Recommendations`, sorted by descending score with
/// ties ordered by book id.
pub use recommender::{BookRecommender, Recommendations};

/// Similarity Calculator Trait
/// The capability every similarity metric implements:
/// `(Book, Book) -> f64`.
///
/// Provided implementations:
/// - `TfIdfSimilarity`: cosine of TF-IDF vectors of the descriptions
/// - `GenresOverlapSimilarity`: genre intersection over the smaller genre set
/// - `CompositeSimilarity`: weighted sum of other calculators
///
/// Closures `Fn(&Book, &Book) -> f64` implement it too.
pub use similarity::{CompositeSimilarity, GenresOverlapSimilarity, SimilarityCalculator, TfIdfSimilarity};

/// Book Finder
/// Exact-match search by author, genres or keywords.
pub use finder::{BookFinder, MatchOption};

/// Tokenizer
/// `TextTokenizer` strips punctuation, lowercases and drops stopwords.
/// The `Tokenizer` trait lets callers plug in their own rules.
pub use tokenizer::{TextTokenizer, Tokenizer};

/// Vectorizer building blocks
/// - `TokenFrequency`: token counts of one document, source of TF
/// - `Corpus`: document frequencies of a collection, source of IDF
/// - `TermVector`: sparse token-weight vector with dot product and cosine
pub use vectorizer::{Corpus, TermVector, TokenFrequency};

pub use config::RecommenderConfig;
pub use error::{LibraryError, Result};
