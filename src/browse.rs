//! The query pipeline: folder listing, content search, and the dispatcher
//! that routes one raw query to one of them.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{Entry, EntryKind, Hit, SmartFolder};

/// Enumerates the known Smart Folder definitions, in stable order.
pub trait FolderStore {
    fn folders(&self) -> Result<Vec<SmartFolder>>;
}

/// Runs one saved search and returns its hits in the index's relevance
/// order.
pub trait SearchIndex {
    fn contents(&self, folder: &SmartFolder) -> Result<Vec<PathBuf>>;
}

/// Stateless per-invocation pipeline over a store and an index.
pub struct FolderBrowser<S, I> {
    store: S,
    index: I,
    config: Config,
}

impl<S: FolderStore, I: SearchIndex> FolderBrowser<S, I> {
    pub fn new(store: S, index: I, config: Config) -> Self {
        Self { store, index, config }
    }

    /// Entry point for the host: never fails. An unknown folder renders as
    /// an empty list, a backend failure as a single informational row.
    pub fn respond(&self, folder: Option<&str>, query: &str) -> Vec<Hit> {
        let outcome = match folder {
            Some(selector) => self.browse_folder(selector, query),
            None => self.browse(query),
        };
        match outcome {
            Ok(hits) => hits,
            Err(Error::FolderNotFound(selector)) => {
                warn!("no smart folder matches '{selector}'");
                Vec::new()
            }
            Err(err) => {
                warn!("search failed: {err}");
                vec![Hit::Notice {
                    title: "Search failed".to_string(),
                    detail: err.to_string(),
                }]
            }
        }
    }

    /// Routes a free-form query. A query led by a folder's name browses
    /// that folder with the remainder as content filter, a leading token
    /// resolving to a single folder does the same, and anything else
    /// filters the folder list itself.
    pub fn browse(&self, query: &str) -> Result<Vec<Hit>> {
        let query = query.trim();
        let folders = self.store.folders()?;
        if query.is_empty() {
            return Ok(folder_rows(&folders, ""));
        }

        let lowered = query.to_lowercase();
        for folder in &folders {
            // An exact name match falls out as an empty remainder, which
            // selects the folder's full contents.
            if let Some(rest) = lowered.strip_prefix(&folder.name.to_lowercase()) {
                debug!("query '{query}' routes into '{}'", folder.name);
                return self.folder_hits(folder, rest.trim());
            }
        }

        // No folder name leads the query, but a first token like "inv" may
        // still select one: split at the first whitespace and resolve the
        // head as a selector. Anything unresolved filters the folder list.
        if let Some((selector, filter)) = query.split_once(char::is_whitespace) {
            if let Ok(folder) = resolve_selector(&folders, selector) {
                debug!("query '{query}' resolves '{selector}' to '{}'", folder.name);
                return self.folder_hits(folder, filter.trim());
            }
        }
        Ok(folder_rows(&folders, query))
    }

    /// The bound form: resolve `selector` against the store, then filter
    /// the resolved folder's contents.
    pub fn browse_folder(&self, selector: &str, filter: &str) -> Result<Vec<Hit>> {
        let folders = self.store.folders()?;
        let folder = resolve_selector(&folders, selector)?;
        self.folder_hits(folder, filter.trim())
    }

    /// Lists folders whose names start with `prefix`, case-insensitively.
    pub fn list_folders(&self, prefix: &str) -> Result<Vec<Hit>> {
        let folders = self.store.folders()?;
        Ok(folder_rows(&folders, prefix.trim()))
    }

    fn folder_hits(&self, folder: &SmartFolder, filter: &str) -> Result<Vec<Hit>> {
        let paths = self.index.contents(folder)?;
        let names: Vec<String> = paths
            .iter()
            .map(|path| {
                path.file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

        let kept = self.config.match_mode.filter_indices(filter, &name_refs);
        let hits: Vec<Hit> = kept
            .into_iter()
            .take(self.config.max_results)
            .map(|i| {
                Hit::Entry(Entry {
                    name: names[i].clone(),
                    path: paths[i].clone(),
                    kind: EntryKind::probe(&paths[i]),
                })
            })
            .collect();
        debug!(
            "'{}': kept {} of {} contents for filter '{filter}'",
            folder.name,
            hits.len(),
            paths.len()
        );
        Ok(hits)
    }
}

/// Exact case-insensitive match first, else a unique case-insensitive
/// prefix. An ambiguous prefix is not guessed at.
fn resolve_selector<'a>(folders: &'a [SmartFolder], selector: &str) -> Result<&'a SmartFolder> {
    let wanted = selector.trim().to_lowercase();
    if wanted.is_empty() {
        return Err(Error::FolderNotFound(selector.to_string()));
    }

    if let Some(folder) = folders
        .iter()
        .find(|folder| folder.name.to_lowercase() == wanted)
    {
        return Ok(folder);
    }

    let mut prefixed = folders
        .iter()
        .filter(|folder| folder.name.to_lowercase().starts_with(&wanted));
    match (prefixed.next(), prefixed.next()) {
        (Some(folder), None) => Ok(folder),
        (Some(_), Some(_)) => {
            debug!("folder selector '{selector}' is ambiguous");
            Err(Error::FolderNotFound(selector.to_string()))
        }
        _ => Err(Error::FolderNotFound(selector.to_string())),
    }
}

fn folder_rows(folders: &[SmartFolder], prefix: &str) -> Vec<Hit> {
    let wanted = prefix.to_lowercase();
    folders
        .iter()
        .filter(|folder| folder.name.to_lowercase().starts_with(&wanted))
        .cloned()
        .map(Hit::Folder)
        .collect()
}
