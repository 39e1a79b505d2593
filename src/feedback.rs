use std::io::{self, Write};

use serde::Serialize;

use crate::types::{Entry, EntryKind, Hit, SmartFolder};

/// Finder's filetype identifier for Smart Folders; the host renders the
/// matching icon from it.
const SMART_FOLDER_FILETYPE: &str = "com.apple.finder.smart-folder";

/// Stock caution icon used on notice rows.
const CAUTION_ICON: &str =
    "/System/Library/CoreServices/CoreTypes.bundle/Contents/Resources/AlertCautionIcon.icns";

/// The script-filter feedback object: serialized once per invocation onto
/// stdout, which stays reserved for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    items: Vec<Item>,
}

impl Feedback {
    /// Assembles feedback from pipeline hits. `max_items` caps every row
    /// kind, the way the original capped its output stage.
    pub fn from_hits(hits: &[Hit], max_items: usize) -> Self {
        let items = hits.iter().take(max_items).map(Item::from).collect();
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Writes the single JSON object the host expects, newline-terminated.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        let json = serde_json::to_string(self).map_err(io::Error::other)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    uid: Option<String>,
    title: String,
    subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    arg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    autocomplete: Option<String>,
    valid: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<Icon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<Variables>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mods: Option<Mods>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Icon {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    path: String,
}

/// Variables travel with the chosen row so downstream workflow objects can
/// tell the open action from the reveal action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Variables {
    action: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Mods {
    cmd: ModAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ModAction {
    subtitle: String,
    arg: String,
    valid: bool,
    variables: Variables,
}

impl Item {
    /// Row for a Smart Folder itself. Not actionable: selecting it
    /// autocompletes "<name> " so the next keystrokes browse its contents.
    fn folder(folder: &SmartFolder) -> Self {
        let path = folder.path.to_string_lossy().into_owned();
        Item {
            uid: Some(path.clone()),
            title: folder.name.clone(),
            subtitle: path,
            arg: None,
            autocomplete: Some(format!("{} ", folder.name)),
            valid: false,
            kind: Some("file"),
            icon: Some(Icon {
                kind: Some("filetype"),
                path: SMART_FOLDER_FILETYPE.to_string(),
            }),
            variables: None,
            mods: None,
        }
    }

    /// Row for one hit inside a folder. Return opens it; the cmd modifier
    /// reveals it in Finder instead. No uid: the host must not reorder hits
    /// away from the index's relevance order.
    fn entry(entry: &Entry) -> Self {
        let path = entry.path.to_string_lossy().into_owned();
        let reveal = match entry.kind {
            EntryKind::File => "Reveal in Finder",
            EntryKind::Directory => "Reveal folder in Finder",
        };
        Item {
            uid: None,
            title: entry.name.clone(),
            subtitle: path.clone(),
            arg: Some(path.clone()),
            autocomplete: None,
            valid: true,
            kind: Some("file"),
            icon: Some(Icon {
                kind: Some("fileicon"),
                path: path.clone(),
            }),
            variables: Some(Variables { action: "open" }),
            mods: Some(Mods {
                cmd: ModAction {
                    subtitle: reveal.to_string(),
                    arg: path,
                    valid: true,
                    variables: Variables { action: "reveal" },
                },
            }),
        }
    }

    /// Single informational row shown when a backend failed; never
    /// actionable, so the host stays usable.
    fn notice(title: &str, detail: &str) -> Self {
        Item {
            uid: None,
            title: title.to_string(),
            subtitle: detail.to_string(),
            arg: None,
            autocomplete: None,
            valid: false,
            kind: None,
            icon: Some(Icon {
                kind: None,
                path: CAUTION_ICON.to_string(),
            }),
            variables: None,
            mods: None,
        }
    }
}

impl From<&Hit> for Item {
    fn from(hit: &Hit) -> Self {
        match hit {
            Hit::Folder(folder) => Item::folder(folder),
            Hit::Entry(entry) => Item::entry(entry),
            Hit::Notice { title, detail } => Item::notice(title, detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn todo_folder() -> SmartFolder {
        SmartFolder {
            name: "TODO".to_string(),
            path: PathBuf::from("/Users/me/Library/Saved Searches/TODO.savedSearch"),
        }
    }

    #[test]
    fn folder_rows_autocomplete_with_a_trailing_space() {
        let feedback = Feedback::from_hits(&[Hit::Folder(todo_folder())], 50);
        assert_eq!(
            serde_json::to_value(&feedback).unwrap(),
            json!({
                "items": [{
                    "uid": "/Users/me/Library/Saved Searches/TODO.savedSearch",
                    "title": "TODO",
                    "subtitle": "/Users/me/Library/Saved Searches/TODO.savedSearch",
                    "autocomplete": "TODO ",
                    "valid": false,
                    "type": "file",
                    "icon": {"type": "filetype", "path": "com.apple.finder.smart-folder"}
                }]
            })
        );
    }

    #[test]
    fn entry_rows_open_by_default_and_reveal_on_cmd() {
        let hit = Hit::Entry(Entry {
            name: "notes.md".to_string(),
            path: PathBuf::from("/Users/me/notes.md"),
            kind: EntryKind::File,
        });
        let feedback = Feedback::from_hits(&[hit], 50);
        assert_eq!(
            serde_json::to_value(&feedback).unwrap(),
            json!({
                "items": [{
                    "title": "notes.md",
                    "subtitle": "/Users/me/notes.md",
                    "arg": "/Users/me/notes.md",
                    "valid": true,
                    "type": "file",
                    "icon": {"type": "fileicon", "path": "/Users/me/notes.md"},
                    "variables": {"action": "open"},
                    "mods": {
                        "cmd": {
                            "subtitle": "Reveal in Finder",
                            "arg": "/Users/me/notes.md",
                            "valid": true,
                            "variables": {"action": "reveal"}
                        }
                    }
                }]
            })
        );
    }

    #[test]
    fn directory_rows_name_the_kind_in_the_reveal_modifier() {
        let hit = Hit::Entry(Entry {
            name: "Drafts".to_string(),
            path: PathBuf::from("/Users/me/Drafts"),
            kind: EntryKind::Directory,
        });
        let value = serde_json::to_value(Feedback::from_hits(&[hit], 50)).unwrap();
        assert_eq!(
            value["items"][0]["mods"]["cmd"]["subtitle"],
            "Reveal folder in Finder"
        );
    }

    #[test]
    fn notice_rows_are_invalid_and_carry_the_detail() {
        let hit = Hit::Notice {
            title: "Search failed".to_string(),
            detail: "spotlight query failed: index offline".to_string(),
        };
        let feedback = Feedback::from_hits(&[hit], 50);
        assert_eq!(
            serde_json::to_value(&feedback).unwrap(),
            json!({
                "items": [{
                    "title": "Search failed",
                    "subtitle": "spotlight query failed: index offline",
                    "valid": false,
                    "icon": {"path": CAUTION_ICON}
                }]
            })
        );
    }

    #[test]
    fn caps_rows_at_max_items() {
        let hits: Vec<Hit> = (0..10)
            .map(|i| {
                Hit::Entry(Entry {
                    name: format!("file{i}.txt"),
                    path: PathBuf::from(format!("/tmp/file{i}.txt")),
                    kind: EntryKind::File,
                })
            })
            .collect();
        let feedback = Feedback::from_hits(&hits, 3);
        assert_eq!(feedback.len(), 3);
    }

    #[test]
    fn empty_hits_serialize_to_an_empty_items_array() {
        let feedback = Feedback::from_hits(&[], 50);
        assert!(feedback.is_empty());

        let mut out = Vec::new();
        feedback.write_to(&mut out).unwrap();
        assert_eq!(out, b"{\"items\":[]}\n");
    }
}
