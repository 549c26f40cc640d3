use std::{collections::HashSet, sync::Arc};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    book::Book,
    error::{LibraryError, Result},
    tokenizer::{TextTokenizer, Tokenizer},
};

/// How a multi-term search combines its terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOption {
    /// every term must match
    MatchAll,
    /// at least one term must match
    MatchAny,
}

/// Exact-match search over a fixed book collection.
///
/// Author, genre and keyword comparisons ignore case. Keywords are matched
/// against the tokenized title and description.
#[derive(Debug, Clone)]
pub struct BookFinder<T = TextTokenizer>
where
    T: Tokenizer,
{
    books: Arc<[Book]>,
    tokenizer: T,
}

impl<T> BookFinder<T>
where
    T: Tokenizer,
{
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
        debug!(books = books.len(), "book finder ready");
        Ok(Self {
            books: books.into_iter().collect(),
            tokenizer,
        })
    }

    pub fn all_books(&self) -> &[Book] {
        &self.books
    }

    /// Every genre label used by any book, as written
    pub fn all_genres(&self) -> HashSet<String> {
        self.books
            .iter()
            .flat_map(|book| book.genres.iter().cloned())
            .collect()
    }

    /// Books whose author equals `author_name`, ignoring case.
    ///
    /// # Errors
    /// * `InvalidInput` - the name is blank
    pub fn search_by_author(&self, author_name: &str) -> Result<Vec<Book>> {
        let author_name = author_name.trim();
        if author_name.is_empty() {
            return Err(LibraryError::invalid_input("author name must not be blank"));
        }
        let wanted = author_name.to_lowercase();
        Ok(self
            .books
            .iter()
            .filter(|book| book.author.trim().to_lowercase() == wanted)
            .cloned()
            .collect())
    }

    /// Books carrying all / any of `genres`, ignoring case.
    /// An empty request and books without genres never match.
    pub fn search_by_genres<I, S>(&self, genres: I, option: MatchOption) -> Vec<Book>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted = lowercase_set(genres);
        if wanted.is_empty() {
            return Vec::new();
        }
        self.books
            .iter()
            .filter(|book| {
                let book_genres = lowercase_set(&book.genres);
                !book_genres.is_empty() && matches(&book_genres, &wanted, option)
            })
            .cloned()
            .collect()
    }

    /// Books whose title or description contains all / any of `keywords`.
    ///
    /// # Errors
    /// * `InvalidInput` - no keywords given
    pub fn search_by_keywords<I, S>(&self, keywords: I, option: MatchOption) -> Result<Vec<Book>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted = lowercase_set(keywords);
        if wanted.is_empty() {
            return Err(LibraryError::invalid_input("keywords must not be empty"));
        }
        Ok(self
            .books
            .iter()
            .filter(|book| {
                let mut tokens: HashSet<String> =
                    self.tokenizer.tokenize(&book.description).into_iter().collect();
                tokens.extend(self.tokenizer.tokenize(&book.title));
                matches(&tokens, &wanted, option)
            })
            .cloned()
            .collect())
    }
}

fn lowercase_set<I, S>(values: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

fn matches(available: &HashSet<String>, wanted: &HashSet<String>, option: MatchOption) -> bool {
    match option {
        MatchOption::MatchAll => wanted.iter().all(|w| available.contains(w)),
        MatchOption::MatchAny => wanted.iter().any(|w| available.contains(w)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(id: &str, title: &str, author: &str, description: &str, genres: &[&str]) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            description: description.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
            rating: 4.0,
            rating_count: 10,
            url: String::new(),
        }
    }

    fn finder() -> BookFinder {
        let books = vec![
            book(
                "1",
                "Exploring the Cosmos",
                "Author One",
                "Space exploration and adventure.",
                &["Science Fiction", "Adventure"],
            ),
            book(
                "2",
                "Quest of the Dragon",
                "Author Two",
                "Knights and a dragon in a fantasy land.",
                &["Fantasy", "Drama"],
            ),
            book("3", "Untitled", "author one", "", &[]),
        ];
        let tokenizer = TextTokenizer::new(["the", "and", "a", "in", "of"]);
        BookFinder::new(books, tokenizer).unwrap()
    }

    fn ids(books: &[Book]) -> Vec<&str> {
        let mut ids: Vec<&str> = books.iter().map(|b| b.id.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn empty_collection_is_rejected() {
        let result = BookFinder::new(Vec::new(), TextTokenizer::default());
        assert!(matches!(result, Err(LibraryError::InvalidInput(_))));
    }

    #[test]
    fn author_search_ignores_case() {
        let found = finder().search_by_author("AUTHOR ONE").unwrap();
        assert_eq!(ids(&found), vec!["1", "3"]);
    }

    #[test]
    fn blank_author_is_rejected() {
        assert!(finder().search_by_author("  ").is_err());
    }

    #[test]
    fn all_genres_are_collected() {
        let expected: HashSet<String> = ["Science Fiction", "Adventure", "Fantasy", "Drama"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(finder().all_genres(), expected);
    }

    #[test]
    fn genre_match_any() {
        let found = finder().search_by_genres(["fantasy", "Adventure"], MatchOption::MatchAny);
        assert_eq!(ids(&found), vec!["1", "2"]);
    }

    #[test]
    fn genre_match_all() {
        let found = finder().search_by_genres(["Science Fiction", "adventure"], MatchOption::MatchAll);
        assert_eq!(ids(&found), vec!["1"]);
    }

    #[test]
    fn empty_genre_request_matches_nothing() {
        let none: [&str; 0] = [];
        assert!(finder().search_by_genres(none, MatchOption::MatchAny).is_empty());
    }

    #[test]
    fn keyword_match_all_uses_description() {
        let found = finder()
            .search_by_keywords(["space", "Adventure"], MatchOption::MatchAll)
            .unwrap();
        assert_eq!(ids(&found), vec!["1"]);
    }

    #[test]
    fn keyword_match_any_uses_title() {
        let found = finder()
            .search_by_keywords(["quest", "nebula"], MatchOption::MatchAny)
            .unwrap();
        assert_eq!(ids(&found), vec!["2"]);
    }

    #[test]
    fn empty_keywords_are_rejected() {
        let none: Vec<String> = Vec::new();
        assert!(finder().search_by_keywords(none, MatchOption::MatchAny).is_err());
    }
}
