//! Field projections requested from `torrent-get`.
//!
//! The order is part of the wire contract: some daemons build their answer in request order, and
//! the list UI relies on it. Append new fields at the end and bump [`FIELDS_VERSION`].

/// Version of the projections below.
pub const FIELDS_VERSION: u32 = 1;

/// Fields requested for the torrent list.
pub const SUMMARY_FIELDS: &[&str] = &[
    "id",
    "hashString",
    "name",
    "totalSize",
    "percentDone",
    "status",
    "rateDownload",
    "rateUpload",
    "peersConnected",
    "peersSendingToUs",
    "peersGettingFromUs",
    "eta",
    "addedDate",
    "queuePosition",
    "uploadRatio",
    "uploadedEver",
    "downloadedEver",
    "downloadDir",
    "leftUntilDone",
    "sizeWhenDone",
    "error",
    "errorString",
    "sequentialDownload",
    "superSeeding",
    "isFinished",
    "labels",
    "bandwidthPriority",
];

/// Fields added on top of [`SUMMARY_FIELDS`] for a single torrent's detail view. Requesting any
/// of them switches the daemon to its detail serializer.
pub const DETAIL_EXTRA_FIELDS: &[&str] = &[
    "files",
    "trackers",
    "peers",
    "pieceCount",
    "pieceSize",
    "pieceStates",
    "pieceAvailability",
];

/// Summary fields followed by the detail fields.
pub fn detail_fields() -> Vec<&'static str> {
    SUMMARY_FIELDS
        .iter()
        .chain(DETAIL_EXTRA_FIELDS)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn detail_projection_extends_summary_in_order() {
        let fields = detail_fields();
        assert_eq!(&fields[..SUMMARY_FIELDS.len()], SUMMARY_FIELDS);
        assert_eq!(&fields[SUMMARY_FIELDS.len()..], DETAIL_EXTRA_FIELDS);
    }

    #[test]
    fn no_duplicate_fields() {
        let fields = detail_fields();
        let unique: HashSet<_> = fields.iter().collect();
        assert_eq!(unique.len(), fields.len());
    }
}
