//! Keyword matching over catalog records.
//!
//! # Responsibility
//! - Decide whether a record matches a free-text keyword.
//! - Keep match rules independent of storage and catalog state.
//!
//! # Invariants
//! - Title and author match by case-insensitive substring.
//! - Year matches only by exact, case-sensitive equality.
//! - The empty keyword matches every record; whitespace is an ordinary
//!   substring.
//! - Results keep input order.

use crate::model::book::Book;

/// Returns whether `book` matches `keyword`.
///
/// The keyword is used verbatim, never trimmed.
pub fn matches_keyword(book: &Book, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    book.title.to_lowercase().contains(&needle)
        || book.author.to_lowercase().contains(&needle)
        || book.year == keyword
}

/// Collects every matching book, preserving order.
pub fn search_books<'a, I>(books: I, keyword: &str) -> Vec<Book>
where
    I: IntoIterator<Item = &'a Book>,
{
    books
        .into_iter()
        .filter(|book| matches_keyword(book, keyword))
        .cloned()
        .collect()
}
