//! Browse macOS Smart Folders (saved Finder searches) from a launcher:
//! list the definitions Spotlight knows about, run one, filter its
//! contents, and emit the host's script-filter JSON feedback.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub mod browse;
pub mod config;
pub mod error;
pub mod feedback;
pub mod matching;
pub mod savedsearch;
pub mod spotlight;
pub mod types;

pub use browse::{FolderBrowser, FolderStore, SearchIndex};
pub use config::Config;
pub use error::{Error, Result};
pub use feedback::Feedback;
pub use matching::MatchMode;
pub use spotlight::Spotlight;
pub use types::{Entry, EntryKind, Hit, SmartFolder};

/// Log filter environment variable, `RUST_LOG` syntax.
pub const LOG_ENV: &str = "SMARTFOLDERS_LOG";

/// Installs file-based logging. stdout stays reserved for host feedback,
/// so log lines go to `smartfolders.log` in the workflow's cache directory
/// when the host provides one, else the system temp dir. An unusable cache
/// directory degrades to the temp dir, and `None` means neither could be
/// opened; the invocation proceeds without logging rather than failing.
/// The returned guard flushes the writer on drop; hold it for the process
/// lifetime.
pub fn init_logging() -> Option<WorkerGuard> {
    let appender = std::env::var_os("alfred_workflow_cache")
        .map(PathBuf::from)
        .and_then(open_log)
        .or_else(|| open_log(std::env::temp_dir()))?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

fn open_log(dir: PathBuf) -> Option<RollingFileAppender> {
    std::fs::create_dir_all(&dir).ok()?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix("smartfolders.log")
        .build(&dir)
        .ok()
}
