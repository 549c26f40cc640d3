pub mod loader;

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, Result};

/// Number of fields in one book record.
pub const BOOK_FIELD_COUNT: usize = 8;

/// A single book record.
///
/// Books are plain immutable values: two books with identical fields are the
/// same book. The rating is compared by bit pattern so that `Book` can be
/// used as a `HashMap` / `HashSet` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    /// Genre labels in source order. Duplicates and case variants are kept.
    pub genres: Vec<String>,
    pub rating: f64,
    pub rating_count: u32,
    pub url: String,
}

impl Book {
    /// Build a book from its 8 raw record fields
    /// (id, title, author, description, genres, rating, rating count, url).
    ///
    /// Text fields are trimmed. Genres are read from `[g1, g2, ...]` or a bare
    /// comma list; a blank field means no genres. The rating count may carry
    /// `,` thousands separators.
    ///
    /// # Errors
    /// * `WrongFieldCount` - the record does not have exactly 8 fields
    /// * `InvalidNumber` - rating or rating count cannot be parsed
    pub fn from_fields<S>(fields: &[S]) -> Result<Self>
    where
        S: AsRef<str>,
    {
        if fields.len() != BOOK_FIELD_COUNT {
            return Err(LibraryError::WrongFieldCount {
                expected: BOOK_FIELD_COUNT,
                found: fields.len(),
            });
        }
        let field = |idx: usize| fields[idx].as_ref();

        Ok(Book {
            id: field(0).trim().to_string(),
            title: field(1).trim().to_string(),
            author: field(2).trim().to_string(),
            description: field(3).trim().to_string(),
            genres: parse_genres(field(4)),
            rating: parse_rating(field(5))?,
            rating_count: parse_rating_count(field(6))?,
            url: field(7).trim().to_string(),
        })
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.title == other.title
            && self.author == other.author
            && self.description == other.description
            && self.genres == other.genres
            && self.rating.to_bits() == other.rating.to_bits()
            && self.rating_count == other.rating_count
            && self.url == other.url
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.title.hash(state);
        self.author.hash(state);
        self.description.hash(state);
        self.genres.hash(state);
        self.rating.to_bits().hash(state);
        self.rating_count.hash(state);
        self.url.hash(state);
    }
}

fn parse_genres(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    let inner = raw
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(raw);
    inner
        .split(',')
        .map(|genre| genre.trim().trim_matches('\'').trim())
        .filter(|genre| !genre.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_rating(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| LibraryError::InvalidNumber {
            field: "rating",
            value: raw.to_string(),
        })
}

fn parse_rating_count(raw: &str) -> Result<u32> {
    raw.replace(',', "")
        .trim()
        .parse::<u32>()
        .map_err(|_| LibraryError::InvalidNumber {
            field: "rating count",
            value: raw.to_string(),
        })
}
