//! Identifier generation for new catalog records.
//!
//! The catalog never hardcodes an id scheme; it asks an [`IdGenerator`].

use crate::model::book::BookId;
use uuid::Uuid;

/// Source of fresh record ids.
pub trait IdGenerator {
    fn next_id(&mut self) -> BookId;
}

/// Random UUID v4 ids (hyphenated lowercase text).
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Ids;

impl IdGenerator for UuidV4Ids {
    fn next_id(&mut self) -> BookId {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-<n>` ids, counting from 1.
///
/// Uniqueness only holds within one generator instance.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> BookId {
        let id = format!("{}-{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
