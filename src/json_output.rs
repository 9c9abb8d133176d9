//! JSON output format for the flat dataset
//!
//! One record per (fix, resolved Git fix hash) pair, consumed by the
//! downstream classifier-training stages.

use serde::{Deserialize, Serialize};

/// A single flat dataset record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatRecord {
    /// 0-based id, strictly increasing across the whole run
    pub id: u64,
    /// Constant repository label
    pub repo_name: String,
    /// Git hash of one fix commit
    pub fix_commits_hash: String,
    /// Git hashes of every resolved regressor commit for this fix
    pub bug_commits_hash: Vec<String>,
    /// Creation timestamp of the fix bug, carried verbatim
    pub best_scenario_issue_date: String,
}

/// Serialize the flat dataset as a pretty-printed JSON array
pub fn to_json(records: &[FlatRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}
