//! Reads `.savedSearch` property lists: the raw Spotlight query string plus
//! the scopes Finder limits it to.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Error, Result};

const SCOPE_COMPUTER: &str = "kMDQueryScopeComputer";
const SCOPE_COMPUTER_INDEXED: &str = "kMDQueryScopeComputerIndexed";
const SCOPE_HOME: &str = "kMDQueryScopeHome";
const SCOPE_HOME_INDEXED: &str = "kMDQueryScopeHomeIndexed";

/// One entry of a saved search's `SearchScopes` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchScope {
    /// The whole machine; an unscoped query.
    Computer,
    /// The invoking user's home directory.
    Home,
    /// A specific directory.
    Path(PathBuf),
}

impl SearchScope {
    fn parse(raw: &str) -> Self {
        match raw {
            SCOPE_COMPUTER | SCOPE_COMPUTER_INDEXED => SearchScope::Computer,
            SCOPE_HOME | SCOPE_HOME_INDEXED => SearchScope::Home,
            other if other.starts_with("kMDQueryScope") => {
                warn!("unrecognized search scope '{other}', searching everywhere");
                SearchScope::Computer
            }
            path => SearchScope::Path(PathBuf::from(path)),
        }
    }

    /// Directory to constrain the query to, or `None` for an unscoped
    /// search.
    pub fn directory(&self) -> Option<PathBuf> {
        match self {
            SearchScope::Computer => None,
            SearchScope::Home => dirs::home_dir(),
            SearchScope::Path(path) => Some(path.clone()),
        }
    }
}

/// The parts of a saved search definition needed to re-run it by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSearch {
    pub raw_query: String,
    pub scopes: Vec<SearchScope>,
}

/// Parses a `.savedSearch` file. Fails if the file is unreadable or does
/// not carry a usable `RawQuery`.
pub fn read_saved_search(path: &Path) -> Result<SavedSearch> {
    let value = plist::Value::from_file(path).map_err(|source| Error::SavedSearch {
        path: path.to_path_buf(),
        source,
    })?;
    let root = value
        .as_dictionary()
        .ok_or_else(|| Error::NoRawQuery(path.to_path_buf()))?;

    let raw_query = root
        .get("RawQuery")
        .and_then(plist::Value::as_string)
        .map(str::trim)
        .filter(|query| !query.is_empty())
        .ok_or_else(|| Error::NoRawQuery(path.to_path_buf()))?
        .to_string();

    let scopes = root
        .get("RawQueryDict")
        .and_then(plist::Value::as_dictionary)
        .and_then(|dict| dict.get("SearchScopes"))
        .and_then(plist::Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(plist::Value::as_string)
                .map(SearchScope::parse)
                .collect()
        })
        .unwrap_or_default();

    Ok(SavedSearch { raw_query, scopes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use plist::{Dictionary, Value};

    fn write_saved_search(dir: &Path, name: &str, root: Dictionary) -> PathBuf {
        let path = dir.join(name);
        Value::Dictionary(root).to_file_binary(&path).unwrap();
        path
    }

    #[test]
    fn reads_raw_query_and_scopes() {
        let dir = tempfile::tempdir().unwrap();

        let mut query_dict = Dictionary::new();
        query_dict.insert(
            "SearchScopes".to_string(),
            Value::Array(vec![
                Value::String(SCOPE_HOME.to_string()),
                Value::String("/Users/me/Projects".to_string()),
            ]),
        );
        let mut root = Dictionary::new();
        root.insert(
            "RawQuery".to_string(),
            Value::String("kMDItemFSName == '*.pdf'".to_string()),
        );
        root.insert("RawQueryDict".to_string(), Value::Dictionary(query_dict));

        let path = write_saved_search(dir.path(), "Paperwork.savedSearch", root);
        let search = read_saved_search(&path).unwrap();

        assert_eq!(search.raw_query, "kMDItemFSName == '*.pdf'");
        assert_eq!(
            search.scopes,
            vec![
                SearchScope::Home,
                SearchScope::Path(PathBuf::from("/Users/me/Projects")),
            ]
        );
    }

    #[test]
    fn missing_raw_query_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_saved_search(dir.path(), "Empty.savedSearch", Dictionary::new());

        assert!(matches!(
            read_saved_search(&path),
            Err(Error::NoRawQuery(_))
        ));
    }

    #[test]
    fn blank_raw_query_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut root = Dictionary::new();
        root.insert("RawQuery".to_string(), Value::String("   ".to_string()));
        let path = write_saved_search(dir.path(), "Blank.savedSearch", root);

        assert!(matches!(
            read_saved_search(&path),
            Err(Error::NoRawQuery(_))
        ));
    }

    #[test]
    fn unparseable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Broken.savedSearch");
        std::fs::write(&path, "not a plist").unwrap();

        assert!(matches!(
            read_saved_search(&path),
            Err(Error::SavedSearch { .. })
        ));
    }

    #[test]
    fn scopes_without_raw_query_dict_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut root = Dictionary::new();
        root.insert("RawQuery".to_string(), Value::String("kind:image".to_string()));
        let path = write_saved_search(dir.path(), "Images.savedSearch", root);

        assert_eq!(read_saved_search(&path).unwrap().scopes, vec![]);
    }

    #[test]
    fn indexed_scope_variants_collapse() {
        assert_eq!(
            SearchScope::parse(SCOPE_COMPUTER_INDEXED),
            SearchScope::Computer
        );
        assert_eq!(SearchScope::parse(SCOPE_HOME_INDEXED), SearchScope::Home);
    }

    #[test]
    fn unknown_scope_constants_degrade_to_computer() {
        assert_eq!(
            SearchScope::parse("kMDQueryScopeNetwork"),
            SearchScope::Computer
        );
    }

    #[test]
    fn plain_strings_are_directory_scopes() {
        let scope = SearchScope::parse("/Volumes/Archive");
        assert_eq!(scope, SearchScope::Path(PathBuf::from("/Volumes/Archive")));
        assert_eq!(scope.directory(), Some(PathBuf::from("/Volumes/Archive")));
        assert_eq!(SearchScope::Computer.directory(), None);
    }
}
