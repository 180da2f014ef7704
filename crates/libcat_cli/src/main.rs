//! `libcat` interactive entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, load the catalog, run the shell.
//! - Map startup failures (unreadable or malformed catalog) to a non-zero exit.

mod config;
mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use config::{AppConfig, Cli};
use libcat_core::{init_logging, Catalog, JsonFileStore};
use log::info;
use shell::Shell;
use std::io;

fn main() -> Result<()> {
    let config = AppConfig::from_cli(Cli::parse())?;

    if let Some(logging) = &config.logging {
        if let Err(err) = init_logging(&logging.level, &logging.dir) {
            eprintln!("warning: file logging disabled: {err}");
        }
    }

    let store = JsonFileStore::new(&config.data_file);
    let mut catalog = Catalog::open(store).with_context(|| {
        format!(
            "failed to load catalog from `{}`",
            config.data_file.display()
        )
    })?;
    info!(
        "event=cli_start module=cli status=ok data_file={} count={}",
        config.data_file.display(),
        catalog.len()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut catalog, stdin.lock(), stdout.lock()).run()
}
