//! Interactive, line-oriented menu over a [`Catalog`].
//!
//! # Responsibility
//! - Prompt for fields, dispatch to catalog operations, print outcomes.
//! - Own the re-prompt loop for invalid status input.
//!
//! # Invariants
//! - Exit and end of input both leave the loop normally; the shell never
//!   terminates the process.
//! - A failed catalog operation is reported and the loop continues.

use anyhow::Result;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use libcat_core::{Book, BookStatus, Catalog, CatalogError, IdGenerator, RecordStore};
use log::{info, warn};
use std::io::{BufRead, Write};

const MENU: &str = "
Library Management System
1. Add a book
2. Remove a book
3. Search for a book
4. Display all books
5. Change book status
6. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    Remove,
    Search,
    Display,
    ChangeStatus,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Remove),
            "3" => Some(Self::Search),
            "4" => Some(Self::Display),
            "5" => Some(Self::ChangeStatus),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Whether the menu loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'c, S: RecordStore, G: IdGenerator, R, W> {
    catalog: &'c mut Catalog<S, G>,
    input: R,
    output: W,
}

impl<'c, S, G, R, W> Shell<'c, S, G, R, W>
where
    S: RecordStore,
    G: IdGenerator,
    R: BufRead,
    W: Write,
{
    pub fn new(catalog: &'c mut Catalog<S, G>, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    /// Runs the menu until the user exits or input ends.
    ///
    /// # Errors
    /// Only terminal I/O failures; catalog failures are printed.
    pub fn run(&mut self) -> Result<()> {
        info!("event=shell_start module=shell status=ok count={}", self.catalog.len());

        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Add) => self.add_book()?,
                Some(MenuChoice::Remove) => self.remove_book()?,
                Some(MenuChoice::Search) => self.search_books()?,
                Some(MenuChoice::Display) => self.display_books()?,
                Some(MenuChoice::ChangeStatus) => self.change_status()?,
                Some(MenuChoice::Exit) => Flow::Quit,
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }

        info!("event=shell_exit module=shell status=ok");
        Ok(())
    }

    fn add_book(&mut self) -> Result<Flow> {
        let Some(title) = self.prompt("Enter title: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(author) = self.prompt("Enter author: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(year) = self.prompt("Enter year: ")? else {
            return Ok(Flow::Quit);
        };

        match self.catalog.add(title, author, year) {
            Ok(book) => writeln!(
                self.output,
                "Book '{}' added with ID {}",
                book.title, book.id
            )?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn remove_book(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt("Enter book id to remove: ")? else {
            return Ok(Flow::Quit);
        };

        match self.catalog.remove(&id) {
            Ok(true) => writeln!(self.output, "Book with ID {id} removed.")?,
            Ok(false) => writeln!(self.output, "No book found with ID {id}.")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn search_books(&mut self) -> Result<Flow> {
        let Some(keyword) = self.prompt("Enter title, author, or year to search: ")? else {
            return Ok(Flow::Quit);
        };

        let hits = self.catalog.search(&keyword);
        if hits.is_empty() {
            writeln!(self.output, "No books found.")?;
        } else {
            writeln!(self.output, "{}", books_table(&hits))?;
        }
        Ok(Flow::Continue)
    }

    fn display_books(&mut self) -> Result<Flow> {
        if self.catalog.is_empty() {
            writeln!(self.output, "The library is empty.")?;
        } else {
            writeln!(self.output, "{}", books_table(self.catalog.list()))?;
        }
        Ok(Flow::Continue)
    }

    fn change_status(&mut self) -> Result<Flow> {
        let Some(id) = self.prompt("Enter book id to change status: ")? else {
            return Ok(Flow::Quit);
        };
        if self.catalog.find_by_id(&id).is_none() {
            writeln!(self.output, "No book found with ID {id}.")?;
            return Ok(Flow::Continue);
        }

        loop {
            let Some(status) = self.prompt(&status_prompt())? else {
                return Ok(Flow::Quit);
            };

            match self.catalog.change_status(&id, &status) {
                Ok(Some(book)) => {
                    writeln!(
                        self.output,
                        "Status of book ID {} changed to {}.",
                        book.id, book.status
                    )?;
                    break;
                }
                Ok(None) => {
                    writeln!(self.output, "No book found with ID {id}.")?;
                    break;
                }
                Err(CatalogError::InvalidStatus(_)) => {
                    writeln!(
                        self.output,
                        "Invalid status. Please enter 'available' or 'issued'."
                    )?;
                }
                Err(err) => {
                    self.report(&err)?;
                    break;
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Prints `label` and reads one line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn report(&mut self, err: &CatalogError) -> Result<()> {
        warn!("event=shell_action module=shell status=error error={err}");
        writeln!(self.output, "Error: {err}")?;
        Ok(())
    }
}

fn status_prompt() -> String {
    let options = BookStatus::ALL
        .iter()
        .map(|status| format!("'{status}'"))
        .collect::<Vec<_>>()
        .join(" or ");
    format!("Enter new status ({options}): ")
}

fn books_table(books: &[Book]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["ID", "Title", "Author", "Year", "Status"]);
    for book in books {
        table.add_row(vec![
            book.id.clone(),
            book.title.clone(),
            book.author.clone(),
            book.year.clone(),
            book.status.to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::{status_prompt, MenuChoice, Shell};
    use libcat_core::{BookStatus, Catalog, MemoryStore, SequentialIds};
    use std::io::Cursor;

    fn run_script(store: &MemoryStore, script: &str) -> String {
        let mut catalog = Catalog::open_with_ids(store, SequentialIds::new("book")).unwrap();
        let mut output = Vec::new();
        Shell::new(&mut catalog, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn menu_choices_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 6 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn status_prompt_lists_every_status() {
        assert_eq!(
            status_prompt(),
            "Enter new status ('available' or 'issued'): "
        );
    }

    #[test]
    fn add_then_display() {
        let store = MemoryStore::new();
        let out = run_script(&store, "1\nDune\nHerbert\n1965\n4\n6\n");

        assert!(out.contains("Book 'Dune' added with ID book-1"));
        assert!(out.contains("Herbert"));
        assert!(out.contains("available"));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn invalid_status_reprompts_until_valid() {
        let store = MemoryStore::new();
        let out = run_script(&store, "1\nDune\nHerbert\n1965\n5\nbook-1\nlost\nissued\n6\n");

        let rejections = out.matches("Invalid status. Please enter 'available' or 'issued'.");
        assert_eq!(rejections.count(), 1);
        assert!(out.contains("Status of book ID book-1 changed to issued."));
        assert_eq!(store.snapshot()[0].status, BookStatus::Issued);
    }

    #[test]
    fn change_status_of_unknown_id_skips_status_prompt() {
        let store = MemoryStore::new();
        let out = run_script(&store, "5\nnope\n6\n");

        assert!(out.contains("No book found with ID nope."));
        assert!(!out.contains("Enter new status"));
    }

    #[test]
    fn remove_reports_found_and_missing() {
        let store = MemoryStore::new();
        let out = run_script(&store, "1\nDune\nHerbert\n1965\n2\nbook-1\n2\nbook-1\n6\n");

        assert!(out.contains("Book with ID book-1 removed."));
        assert!(out.contains("No book found with ID book-1."));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn search_prints_hits_or_nothing_found() {
        let store = MemoryStore::new();
        let out = run_script(
            &store,
            "1\nDune\nHerbert\n1965\n1\nEmma\nAusten\n1815\n3\nAUSTEN\n3\nzzz\n6\n",
        );

        assert!(out.contains("Austen"));
        assert!(!out.contains("Herbert"));
        assert!(out.contains("No books found."));
    }

    #[test]
    fn unknown_choice_and_empty_library_messages() {
        let store = MemoryStore::new();
        let out = run_script(&store, "9\n4\n6\n");

        assert!(out.contains("Invalid choice. Please try again."));
        assert!(out.contains("The library is empty."));
    }

    #[test]
    fn end_of_input_mid_prompt_exits_cleanly() {
        let store = MemoryStore::new();
        run_script(&store, "1\nDune\n");
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn store_failures_are_reported_and_loop_continues() {
        let store = MemoryStore::new();
        store.set_read_only(true);
        let out = run_script(&store, "1\nDune\nHerbert\n1965\n4\n6\n");

        assert!(out.contains("Error: failed to write `:memory:`: store is read-only"));
        assert!(out.contains("The library is empty."));
    }
}
