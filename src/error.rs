use std::path::PathBuf;

use thiserror::Error;

/// Failures while resolving or running a Smart Folder query.
#[derive(Debug, Error)]
pub enum Error {
    /// The selector matched no Smart Folder, or its prefix matched more than
    /// one. The host renders this as an empty result list.
    #[error("no smart folder matches '{0}'")]
    FolderNotFound(String),

    /// Spotlight refused or could not run a query.
    #[error("spotlight query failed: {0}")]
    Spotlight(String),

    /// A `.savedSearch` definition could not be parsed.
    #[error("unreadable saved search {path}: {source}")]
    SavedSearch {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },

    /// A `.savedSearch` definition carries no raw query to execute.
    #[error("saved search {0} does not define a query")]
    NoRawQuery(PathBuf),

    /// The metadata index does not exist on this platform.
    #[error("Spotlight search is only available on macOS")]
    Unsupported,
}

pub type Result<T> = std::result::Result<T, Error>;
