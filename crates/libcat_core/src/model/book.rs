//! Book domain model.
//!
//! # Responsibility
//! - Define the catalog record persisted by the record store.
//! - Parse and render the circulation status.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused for another book.
//! - Only `status` changes after creation.
//! - `year` is opaque text; it is compared, never parsed.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Stable identifier of a catalog record.
///
/// Kept as plain text so ids written by any generator survive a reload.
pub type BookId = String;

/// Circulation state of a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    /// On the shelf.
    #[default]
    Available,
    /// Lent out.
    Issued,
}

impl BookStatus {
    /// Every accepted status, in menu order.
    pub const ALL: [BookStatus; 2] = [BookStatus::Available, BookStatus::Issued];

    /// Returns the persisted spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Issued => "issued",
        }
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected status text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid status `{0}`; expected available|issued")]
pub struct InvalidStatus(pub String);

impl FromStr for BookStatus {
    type Err = InvalidStatus;

    /// Accepts exactly `available` or `issued`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "issued" => Ok(Self::Issued),
            _ => Err(InvalidStatus(value.to_string())),
        }
    }
}

/// One catalog entry.
///
/// Field order is the key order of the persisted JSON objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub year: String,
    pub status: BookStatus,
}

impl Book {
    /// Creates an available book under a caller-provided id.
    pub fn new(
        id: impl Into<BookId>,
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            year: year.into(),
            status: BookStatus::Available,
        }
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Author: {}, Year: {}, Status: {}",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}
