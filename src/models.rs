//! Domain records for the bug corpus and commit history
//!
//! Field names follow the upstream database dumps so the NDJSON caches
//! deserialize directly.

use serde::Deserialize;

/// Resolution status of a bug, collapsed to the three states the
/// pipeline distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Resolution {
    /// No resolution recorded yet (empty string in the tracker dump)
    #[default]
    Open,
    /// Resolved as FIXED
    Fixed,
    /// Any other resolution (WONTFIX, DUPLICATE, INVALID, ...)
    Other,
}

impl From<String> for Resolution {
    fn from(raw: String) -> Self {
        if raw.is_empty() {
            Resolution::Open
        } else if raw.eq_ignore_ascii_case("FIXED") {
            Resolution::Fixed
        } else {
            Resolution::Other
        }
    }
}

/// A bug-tracker record
///
/// A bug with a non-empty `regressed_by` list is a *fix*; the bugs it
/// references are its *regressors*.
#[derive(Debug, Clone, Deserialize)]
pub struct Bug {
    pub id: u64,
    /// Creation timestamp, carried verbatim into the flat dataset
    #[serde(default)]
    pub creation_time: String,
    #[serde(default)]
    pub resolution: Resolution,
    /// Bug IDs believed to have introduced this defect (missing = empty)
    #[serde(default)]
    pub regressed_by: Vec<u64>,
}

impl Bug {
    /// True when this bug references at least one regressor
    pub fn is_fix(&self) -> bool {
        !self.regressed_by.is_empty()
    }
}

/// A commit record from the history dump (Mercurial identifier space)
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    /// Mercurial hash
    pub node: String,
    /// Owning bug, if the commit message referenced one
    #[serde(default)]
    pub bug_id: Option<u64>,
    /// Paths touched by this commit
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub source_code_added: u64,
    #[serde(default)]
    pub source_code_deleted: u64,
    #[serde(default)]
    pub test_added: u64,
    #[serde(default)]
    pub test_deleted: u64,
    #[serde(default)]
    pub other_added: u64,
    #[serde(default)]
    pub other_deleted: u64,
}

impl Commit {
    /// Lines added across all three categories
    pub fn total_added(&self) -> u64 {
        self.source_code_added + self.test_added + self.other_added
    }

    /// Lines deleted across all three categories
    pub fn total_deleted(&self) -> u64 {
        self.source_code_deleted + self.test_deleted + self.other_deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_empty_is_open() {
        assert_eq!(Resolution::from(String::new()), Resolution::Open);
    }

    #[test]
    fn test_resolution_fixed() {
        assert_eq!(Resolution::from("FIXED".to_string()), Resolution::Fixed);
        assert_eq!(Resolution::from("fixed".to_string()), Resolution::Fixed);
    }

    #[test]
    fn test_resolution_other() {
        assert_eq!(Resolution::from("WONTFIX".to_string()), Resolution::Other);
        assert_eq!(Resolution::from("DUPLICATE".to_string()), Resolution::Other);
    }

    #[test]
    fn test_bug_deserialize_full() {
        let bug: Bug = serde_json::from_str(
            r#"{"id": 10, "creation_time": "2020-01-02T03:04:05Z",
                "resolution": "FIXED", "regressed_by": [20, 21]}"#,
        )
        .unwrap();
        assert_eq!(bug.id, 10);
        assert_eq!(bug.creation_time, "2020-01-02T03:04:05Z");
        assert_eq!(bug.resolution, Resolution::Fixed);
        assert_eq!(bug.regressed_by, vec![20, 21]);
        assert!(bug.is_fix());
    }

    #[test]
    fn test_bug_deserialize_missing_regressed_by() {
        let bug: Bug = serde_json::from_str(r#"{"id": 11}"#).unwrap();
        assert!(bug.regressed_by.is_empty());
        assert!(!bug.is_fix());
        assert_eq!(bug.resolution, Resolution::Open);
    }

    #[test]
    fn test_commit_deserialize_partial() {
        let commit: Commit =
            serde_json::from_str(r#"{"node": "abc123", "bug_id": 42, "files": ["a.c"]}"#).unwrap();
        assert_eq!(commit.node, "abc123");
        assert_eq!(commit.bug_id, Some(42));
        assert_eq!(commit.total_added(), 0);
        assert_eq!(commit.total_deleted(), 0);
    }

    #[test]
    fn test_commit_counter_totals() {
        let commit: Commit = serde_json::from_str(
            r#"{"node": "abc", "source_code_added": 3, "test_added": 2,
                "other_added": 1, "source_code_deleted": 5, "test_deleted": 0,
                "other_deleted": 4}"#,
        )
        .unwrap();
        assert_eq!(commit.total_added(), 6);
        assert_eq!(commit.total_deleted(), 9);
    }
}
