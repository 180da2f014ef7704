//! Command-line flags and resolved runtime configuration.
//!
//! Every flag has an environment fallback; relative paths are resolved
//! against the working directory at startup.

use anyhow::{Context, Result};
use clap::Parser;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "library.json";
const APP_NAME: &str = "libcat";

/// Personal library catalog.
#[derive(Debug, Parser)]
#[command(
    name = "libcat",
    version = libcat_core::core_version(),
    about = "Manage a personal library catalog"
)]
pub struct Cli {
    /// Catalog JSON file
    #[arg(short, long, value_name = "PATH", env = "LIBCAT_DATA_FILE")]
    pub file: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        value_name = "LEVEL",
        env = "LIBCAT_LOG_LEVEL",
        value_parser = ["trace", "debug", "info", "warn", "error"]
    )]
    pub log_level: Option<String>,

    /// Directory for rolling log files
    #[arg(long, value_name = "DIR", env = "LIBCAT_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Disable file logging
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    pub dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    /// `None` when logging is disabled.
    pub logging: Option<LogSettings>,
}

impl AppConfig {
    /// Resolves flags against the process working directory and platform dirs.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to resolve working directory")?;
        Ok(Self::resolve(cli, &cwd, platform_log_dir()))
    }

    fn resolve(cli: Cli, cwd: &Path, platform_log_dir: Option<PathBuf>) -> Self {
        let data_file = absolutize(
            cwd,
            cli.file.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
        );

        let logging = (!cli.no_log).then(|| LogSettings {
            level: cli
                .log_level
                .unwrap_or_else(|| libcat_core::default_log_level().to_string()),
            dir: match cli.log_dir {
                Some(dir) => absolutize(cwd, dir),
                None => platform_log_dir
                    .unwrap_or_else(|| std::env::temp_dir().join(APP_NAME).join("logs")),
            },
        });

        Self { data_file, logging }
    }
}

fn platform_log_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_local_dir().join("logs"))
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, Cli, DEFAULT_DATA_FILE};
    use clap::Parser;
    use std::path::{Path, PathBuf};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("libcat").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_use_cwd_file_and_platform_logs() {
        let cli = Cli {
            file: None,
            log_level: None,
            log_dir: None,
            no_log: false,
        };
        let platform = Some(PathBuf::from("/data/logs"));
        let config = AppConfig::resolve(cli, Path::new("/work"), platform);

        assert_eq!(config.data_file, Path::new("/work").join(DEFAULT_DATA_FILE));
        let logging = config.logging.unwrap();
        assert_eq!(logging.level, libcat_core::default_log_level());
        assert_eq!(logging.dir, PathBuf::from("/data/logs"));
    }

    #[test]
    fn relative_flags_resolve_against_cwd() {
        let cli = parse(&[
            "--file",
            "books/mine.json",
            "--log-dir",
            "logs",
            "--log-level",
            "warn",
        ]);
        let config = AppConfig::resolve(cli, Path::new("/work"), None);

        assert_eq!(config.data_file, PathBuf::from("/work/books/mine.json"));
        let logging = config.logging.unwrap();
        assert_eq!(logging.level, "warn");
        assert_eq!(logging.dir, PathBuf::from("/work/logs"));
    }

    #[test]
    fn no_log_disables_logging() {
        let config = AppConfig::resolve(parse(&["--no-log"]), Path::new("/work"), None);
        assert!(config.logging.is_none());
    }

    #[test]
    fn version_flag_reports_core_version() {
        let err = Cli::try_parse_from(["libcat", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
        assert!(err.to_string().contains(libcat_core::core_version()));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        assert!(Cli::try_parse_from(["libcat", "--log-level", "verbose"]).is_err());
    }
}
