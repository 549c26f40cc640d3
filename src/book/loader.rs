use std::{fs::File, io::Read, path::Path};

use tracing::{debug, info};

use crate::{book::Book, error::{LibraryError, Result}};

/// Reads book records from a headered CSV source.
///
/// Fields may be quoted, so descriptions containing commas or newlines are
/// fine. Every record must have exactly 8 columns in this order:
/// id, title, author, description, genres, rating, rating count, url.
///
/// A malformed record aborts the whole load; nothing is skipped.
#[derive(Debug, Default)]
pub struct BookLoader;

impl BookLoader {
    pub fn new() -> Self {
        BookLoader
    }

    /// Load every book from a CSV file on disk
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Book>> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let books = self.load_reader(file)?;
        info!(path = %path.display(), books = books.len(), "loaded book dataset");
        Ok(books)
    }

    /// Load every book from any reader producing CSV text
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<Book>> {
        // flexible: field count is checked by Book::from_fields so the error stays specific
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut books = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| LibraryError::Csv {
                line: e.position().map_or(0, |p| p.line()),
                message: e.to_string(),
            })?;
            let line = record.position().map_or(0, |p| p.line());
            let fields: Vec<&str> = record.iter().collect();
            let book = Book::from_fields(&fields).map_err(|e| {
                debug!(line, error = %e, "rejected book record");
                LibraryError::Record {
                    line,
                    source: Box::new(e),
                }
            })?;
            books.push(book);
        }
        Ok(books)
    }
}
