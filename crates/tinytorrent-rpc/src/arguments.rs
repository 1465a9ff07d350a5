//! Outgoing argument objects, one per daemon method that takes arguments.
//!
//! These are wire shapes only; callers use the types from `tinytorrent_types`.

use serde::Serialize;

use tinytorrent_types::{TorrentId, TorrentIds};

#[derive(Debug, Serialize)]
pub(crate) struct IdsArguments<'a> {
    pub(crate) ids: &'a TorrentIds,
}

#[derive(Debug, Serialize)]
pub(crate) struct TorrentGetArguments<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ids: Option<&'a TorrentIds>,
    pub(crate) fields: &'a [&'a str],
}

#[derive(Debug, Serialize)]
pub(crate) struct RemoveArguments<'a> {
    pub(crate) ids: &'a TorrentIds,
    #[serde(rename = "delete-local-data")]
    pub(crate) delete_local_data: bool,
}

/// `metainfo` and `filename` are mutually exclusive; exactly one is set.
#[derive(Debug, Serialize)]
pub(crate) struct AddArguments<'a> {
    /// Base64 of the raw metainfo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) metainfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) filename: Option<&'a str>,
    #[serde(rename = "download-dir", skip_serializing_if = "Option::is_none")]
    pub(crate) download_dir: Option<&'a str>,
    pub(crate) paused: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct SetLocationArguments<'a> {
    pub(crate) ids: &'a TorrentIds,
    pub(crate) location: &'a str,
    #[serde(rename = "move")]
    pub(crate) move_data: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RenamePathArguments<'a> {
    pub(crate) ids: [TorrentId; 1],
    pub(crate) path: &'a str,
    pub(crate) name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct FileSelectionArguments<'a> {
    pub(crate) ids: [TorrentId; 1],
    #[serde(rename = "files-wanted", skip_serializing_if = "Option::is_none")]
    pub(crate) files_wanted: Option<&'a [u32]>,
    #[serde(rename = "files-unwanted", skip_serializing_if = "Option::is_none")]
    pub(crate) files_unwanted: Option<&'a [u32]>,
}

impl<'a> FileSelectionArguments<'a> {
    pub(crate) fn new(id: TorrentId, indices: &'a [u32], wanted: bool) -> Self {
        let (files_wanted, files_unwanted) = if wanted {
            (Some(indices), None)
        } else {
            (None, Some(indices))
        };
        Self {
            ids: [id],
            files_wanted,
            files_unwanted,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FreeSpaceArguments<'a> {
    pub(crate) path: &'a str,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn file_selection_uses_one_key() {
        let wanted = FileSelectionArguments::new(4, &[0, 2], true);
        assert_eq!(
            serde_json::to_value(&wanted).unwrap(),
            json!({"ids": [4], "files-wanted": [0, 2]})
        );

        let unwanted = FileSelectionArguments::new(4, &[1], false);
        assert_eq!(
            serde_json::to_value(&unwanted).unwrap(),
            json!({"ids": [4], "files-unwanted": [1]})
        );
    }

    #[test]
    fn torrent_get_without_ids_asks_for_all() {
        let args = TorrentGetArguments {
            ids: None,
            fields: &["id", "name"],
        };
        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({"fields": ["id", "name"]})
        );
    }
}
