use std::path::{Path, PathBuf};

/// A saved Finder search discovered on disk. The search criteria stay opaque
/// at this level; Spotlight owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartFolder {
    /// Display name, the `.savedSearch` file stem as Finder shows it.
    pub name: String,
    /// Absolute path of the definition file.
    pub path: PathBuf,
}

impl SmartFolder {
    /// Builds a folder handle from a definition path. Returns `None` for
    /// paths without a usable UTF-8 stem.
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_stem()?.to_str()?.to_string();
        if name.is_empty() {
            return None;
        }
        Some(Self { name, path })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Resolves the kind from disk. Unreadable metadata degrades to `File`
    /// so the row still renders.
    pub fn probe(path: &Path) -> Self {
        match std::fs::metadata(path) {
            Ok(metadata) if metadata.is_dir() => EntryKind::Directory,
            _ => EntryKind::File,
        }
    }
}

/// One filesystem hit inside a Smart Folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Display name (the final path component).
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// A row handed to the launcher: a folder to drill into, a concrete hit
/// inside one, or a notice standing in for a failed backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hit {
    Folder(SmartFolder),
    Entry(Entry),
    Notice { title: String, detail: String },
}
