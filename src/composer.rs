//! Record composition: joining fixes with their regressor commit sets
//!
//! Final pipeline stage. For every selected fix this joins the fix-side
//! and regressor-side commit sets in both identifier spaces, derives the
//! classification flags, and fans each fix out into one tabular row and
//! one flat record per resolved Git fix hash.

use std::collections::HashSet;

use crate::commit_index::CommitIndex;
use crate::json_output::FlatRecord;
use crate::models::{Bug, Commit};
use crate::vcs_map::TranslationMap;

/// Composition options
#[derive(Debug, Clone)]
pub struct ComposerConfig {
    /// Constant repository label stamped into every flat record
    pub repo_name: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            repo_name: "mozilla-central".to_string(),
        }
    }
}

/// One tabular dataset row, keyed by fix bug ID
///
/// Unmapped Git hashes stay as explicit `None` markers here; they are
/// dropped only at the serialization boundary.
#[derive(Debug, Clone)]
pub struct FixRecord {
    pub fix_id: u64,
    pub fix_commits_hg: Vec<String>,
    pub fix_commits_git: Vec<Option<String>>,
    pub regressor_ids: Vec<u64>,
    pub regressor_commits_hg: Vec<String>,
    pub regressor_commits_git: Vec<Option<String>>,
    pub no_file_shared: bool,
    pub new_lines_only_fix: bool,
    pub remove_lines_only_regressor: bool,
    pub no_regressor_commits: bool,
}

/// Composed dataset: tabular rows plus the fanned-out flat records
#[derive(Debug, Default)]
pub struct Dataset {
    pub rows: Vec<FixRecord>,
    pub flat: Vec<FlatRecord>,
}

/// Join every selected fix against the commit index and translation map
pub fn compose(
    fixes: &[Bug],
    index: &CommitIndex,
    translations: &TranslationMap,
    config: &ComposerConfig,
) -> Dataset {
    let mut dataset = Dataset::default();
    let mut next_id: u64 = 0;

    for fix in fixes {
        // No entry in the destination space means no fix commit exists
        // yet (or no mapping); the fix cannot be evaluated.
        if !translations.contains(fix.id) {
            tracing::info!(
                bug = fix.id,
                "no commit in the destination identifier space, skipping fix"
            );
            continue;
        }

        let fix_commits: &[Commit] = index.commits(fix.id).unwrap_or(&[]);
        let fix_git: Vec<Option<String>> =
            translations.hashes(fix.id).unwrap_or(&[]).to_vec();

        let mut regressor_commits: Vec<&Commit> = Vec::new();
        let mut regressor_git: Vec<Option<String>> = Vec::new();
        for &bug_id in &fix.regressed_by {
            // A regressor absent from the index contributes nothing.
            if let Some(commits) = index.commits(bug_id) {
                regressor_commits.extend(commits);
                regressor_git.extend(translations.hashes(bug_id).unwrap_or(&[]).iter().cloned());
            }
        }

        let fix_files: HashSet<&str> = fix_commits
            .iter()
            .flat_map(|c| c.files.iter().map(String::as_str))
            .collect();
        let regressor_files: HashSet<&str> = regressor_commits
            .iter()
            .flat_map(|c| c.files.iter().map(String::as_str))
            .collect();

        let record = FixRecord {
            fix_id: fix.id,
            fix_commits_hg: fix_commits.iter().map(|c| c.node.clone()).collect(),
            fix_commits_git: fix_git,
            regressor_ids: fix.regressed_by.clone(),
            regressor_commits_hg: regressor_commits.iter().map(|c| c.node.clone()).collect(),
            regressor_commits_git: regressor_git,
            no_file_shared: fix_files.is_disjoint(&regressor_files),
            new_lines_only_fix: fix_commits.iter().map(Commit::total_deleted).sum::<u64>() == 0,
            remove_lines_only_regressor: regressor_commits
                .iter()
                .map(|c| c.total_added())
                .sum::<u64>()
                == 0,
            no_regressor_commits: regressor_commits.is_empty(),
        };

        let regressor_hashes: Vec<String> =
            record.regressor_commits_git.iter().flatten().cloned().collect();
        for fix_hash in record.fix_commits_git.iter().flatten() {
            dataset.flat.push(FlatRecord {
                id: next_id,
                repo_name: config.repo_name.clone(),
                fix_commits_hash: fix_hash.clone(),
                bug_commits_hash: regressor_hashes.clone(),
                best_scenario_issue_date: fix.creation_time.clone(),
            });
            next_id += 1;
        }

        dataset.rows.push(record);
    }

    tracing::info!(
        rows = dataset.rows.len(),
        flat = dataset.flat.len(),
        "dataset composed"
    );
    dataset
}
