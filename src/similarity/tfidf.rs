use std::sync::Arc;

use indexmap::IndexSet;
use tracing::debug;

use crate::{
    book::Book,
    error::{LibraryError, Result},
    similarity::SimilarityCalculator,
    tokenizer::{TextTokenizer, Tokenizer},
    vectorizer::{Corpus, TermVector, TokenFrequency},
};

/// Cosine similarity of TF-IDF vectors built from book descriptions.
///
/// The book collection is snapshotted at construction and its document
/// frequencies are counted once. A token's document frequency is the number
/// of books whose tokenized description contains that exact token.
///
/// Weights:
/// - TF: count / total tokens of the description
/// - IDF: ln(corpus size / (1 + document frequency)), negative values kept
/// - TF-IDF: TF * IDF per token
pub struct TfIdfSimilarity<T = TextTokenizer>
where
    T: Tokenizer,
{
    books: Arc<[Book]>,
    tokenizer: T,
    corpus: Corpus,
}

impl<T> TfIdfSimilarity<T>
where
    T: Tokenizer,
{
    /// Build the calculator over a collection of books.
    ///
    /// Duplicate books collapse into one corpus document.
    ///
    /// # Errors
    /// * `InvalidInput` - the collection is empty
    pub fn new<I>(books: I, tokenizer: T) -> Result<Self>
    where
        I: IntoIterator<Item = Book>,
    {
        let books: IndexSet<Book> = books.into_iter().collect();
        if books.is_empty() {
            return Err(LibraryError::invalid_input("books must not be empty"));
        }
        let books: Arc<[Book]> = books.into_iter().collect();

        let mut corpus = Corpus::new();
        for book in books.iter() {
            corpus.add_set(description_tokens(&tokenizer, book));
        }
        debug!(
            books = corpus.get_doc_num(),
            vocab = corpus.vocab_size(),
            "tf-idf corpus built"
        );

        Ok(Self {
            books,
            tokenizer,
            corpus,
        })
    }

    /// The books the document frequencies were counted over
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// TF of each distinct token of the description.
    /// Empty for a blank description.
    pub fn compute_term_frequency(&self, book: &Book) -> TermVector<f64> {
        let tokens = description_tokens(&self.tokenizer, book);
        term_frequency(&tokens)
    }

    /// IDF of each distinct token of the description, against the corpus.
    /// Empty for a blank description.
    pub fn compute_inverse_document_frequency(&self, book: &Book) -> TermVector<f64> {
        let tokens = description_tokens(&self.tokenizer, book);
        self.corpus.idf_vector(&tokens)
    }

    /// TF * IDF of each distinct token of the description.
    ///
    /// # Returns
    /// * `TermVector<f64>` - empty when the description has no tokens
    pub fn compute_tf_idf(&self, book: &Book) -> TermVector<f64> {
        let tokens = description_tokens(&self.tokenizer, book);
        let tf = term_frequency(&tokens);
        let idf = self.corpus.idf_vector(&tokens);
        if tf.is_empty() || idf.is_empty() {
            return TermVector::new();
        }
        tf.hadamard(&idf)
    }
}

impl<T> SimilarityCalculator for TfIdfSimilarity<T>
where
    T: Tokenizer,
{
    fn calculate_similarity(&self, first: &Book, second: &Book) -> f64 {
        let first_vec = self.compute_tf_idf(first);
        let second_vec = self.compute_tf_idf(second);
        first_vec.cosine_similarity(&second_vec)
    }
}

fn description_tokens<T: Tokenizer>(tokenizer: &T, book: &Book) -> Vec<String> {
    if book.description.trim().is_empty() {
        return Vec::new();
    }
    tokenizer.tokenize(&book.description)
}

fn term_frequency(tokens: &[String]) -> TermVector<f64> {
    tokens.iter().collect::<TokenFrequency>().tf_vector()
}
