//! JSON file record store.
//!
//! # Responsibility
//! - Read and write the catalog as one pretty-printed JSON array.
//!
//! # Invariants
//! - A missing file loads as an empty catalog.
//! - Writes go to a sibling temp file that is renamed over the target, so a
//!   failed save leaves the previous document intact.
//! - Output is indented with four spaces and keeps `Book` field order.

use super::{RecordStore, StoreError, StoreResult};
use crate::model::book::Book;
use log::{error, info};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

const JSON_INDENT: &[u8] = b"    ";

/// Record store backed by a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, action: &'static str, source: std::io::Error) -> StoreError {
        StoreError::Io {
            action,
            path: self.path.clone(),
            source,
        }
    }

    fn write_atomic(&self, bytes: &[u8]) -> StoreResult<()> {
        let dir = parent_dir(&self.path);
        fs::create_dir_all(dir).map_err(|err| self.io_error("create directory for", err))?;

        let mut temp =
            NamedTempFile::new_in(dir).map_err(|err| self.io_error("create temp file for", err))?;
        temp.write_all(bytes).map_err(|err| self.io_error("write", err))?;
        temp.as_file().sync_all().map_err(|err| self.io_error("sync", err))?;
        temp.persist(&self.path).map_err(|err| self.io_error("replace", err.error))?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> StoreResult<Vec<Book>> {
        let started_at = Instant::now();

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    "event=store_load module=store status=ok missing=true path={}",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(
                    "event=store_load module=store status=error error_code=read_failed path={} error={}",
                    self.path.display(),
                    err
                );
                return Err(self.io_error("read", err));
            }
        };

        let books: Vec<Book> = serde_json::from_str(&contents).map_err(|source| {
            error!(
                "event=store_load module=store status=error error_code=parse_failed path={} line={} column={}",
                self.path.display(),
                source.line(),
                source.column()
            );
            StoreError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;

        info!(
            "event=store_load module=store status=ok path={} count={} duration_ms={}",
            self.path.display(),
            books.len(),
            started_at.elapsed().as_millis()
        );
        Ok(books)
    }

    fn save(&self, books: &[Book]) -> StoreResult<()> {
        let started_at = Instant::now();
        let encoded = encode_pretty(books)?;

        if let Err(err) = self.write_atomic(&encoded) {
            error!(
                "event=store_save module=store status=error error_code=write_failed path={} error={}",
                self.path.display(),
                err
            );
            return Err(err);
        }

        info!(
            "event=store_save module=store status=ok path={} count={} bytes={} duration_ms={}",
            self.path.display(),
            books.len(),
            encoded.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }
}

fn encode_pretty(books: &[Book]) -> StoreResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    books.serialize(&mut serializer).map_err(StoreError::Serialize)?;
    Ok(buffer)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
