//! Catalog domain model.
//!
//! # Responsibility
//! - Define the record shape shared by the store, the catalog and callers.
//!
//! # Invariants
//! - Every record is identified by a stable `BookId`.
//! - Removal is a hard delete; there are no tombstones.

pub mod book;
