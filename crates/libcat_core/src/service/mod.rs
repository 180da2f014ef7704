//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate record store calls into catalog-level APIs.
//! - Keep the interactive shell decoupled from storage details.

pub mod catalog;
