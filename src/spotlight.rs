//! Spotlight-backed discovery and execution of saved searches via `mdfind`.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::browse::{FolderStore, SearchIndex};
use crate::error::{Error, Result};
use crate::savedsearch::read_saved_search;
use crate::types::SmartFolder;

/// Spotlight's kind filter for saved search definitions.
const SAVED_SEARCH_KIND: &str = "kind:saved search";

/// Where Finder keeps saved searches. `mdfind -s` only resolves names under
/// this directory.
static SAVED_SEARCHES_DIR: Lazy<Option<PathBuf>> =
    Lazy::new(|| dirs::home_dir().map(|home| home.join("Library/Saved Searches")));

/// Live `mdfind` backend for both folder discovery and folder contents.
#[derive(Debug, Default, Clone, Copy)]
pub struct Spotlight;

impl Spotlight {
    pub fn new() -> Self {
        Spotlight
    }
}

impl FolderStore for Spotlight {
    fn folders(&self) -> Result<Vec<SmartFolder>> {
        if !cfg!(target_os = "macos") {
            return Err(Error::Unsupported);
        }

        let mut folders: Vec<SmartFolder> = mdfind([SAVED_SEARCH_KIND])?
            .into_iter()
            .filter_map(SmartFolder::from_path)
            .collect();
        folders.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
        debug!("discovered {} saved searches", folders.len());
        Ok(folders)
    }
}

impl SearchIndex for Spotlight {
    fn contents(&self, folder: &SmartFolder) -> Result<Vec<PathBuf>> {
        if !cfg!(target_os = "macos") {
            return Err(Error::Unsupported);
        }

        if in_saved_searches_dir(&folder.path) {
            return mdfind([OsString::from("-s"), OsString::from(&folder.name)]);
        }

        // Definitions outside the library cannot be run by name, so re-run
        // the stored query with its scopes.
        let search = read_saved_search(&folder.path)?;
        let mut args: Vec<OsString> = Vec::new();
        for scope in &search.scopes {
            if let Some(dir) = scope.directory() {
                args.push(OsString::from("-onlyin"));
                args.push(dir.into_os_string());
            }
        }
        args.push(OsString::from(&search.raw_query));
        mdfind(args)
    }
}

fn in_saved_searches_dir(path: &Path) -> bool {
    SAVED_SEARCHES_DIR
        .as_deref()
        .zip(path.parent())
        .is_some_and(|(dir, parent)| parent == dir)
}

fn mdfind<I, S>(args: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = Command::new("mdfind")
        .args(args)
        .output()
        .map_err(|err| Error::Spotlight(format!("failed to run mdfind: {err}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        let detail = if stderr.is_empty() {
            output.status.to_string()
        } else {
            stderr.to_string()
        };
        return Err(Error::Spotlight(detail));
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}
