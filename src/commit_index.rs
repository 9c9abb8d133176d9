//! Commit index: which commits belong to which bug
//!
//! Built in a single pass over the commit history and read-only
//! afterwards. The same pass records the ordered list of indexed
//! Mercurial hashes handed to the hash translator, so the history is
//! never walked twice.

use std::collections::{HashMap, HashSet};

use crate::corpus;
use crate::models::Commit;

/// Immutable-after-build index of the commit history
///
/// Only commits owned by a bug of interest (a fix or one of its
/// regressors) are indexed; everything else is dropped on the floor to
/// bound memory.
#[derive(Debug, Default)]
pub struct CommitIndex {
    by_bug: HashMap<u64, Vec<Commit>>,
    bug_of: HashMap<String, u64>,
    nodes: Vec<String>,
}

impl CommitIndex {
    /// Build the index from the lazy commit stream
    pub fn build<I>(commits: I, of_interest: &HashSet<u64>) -> corpus::Result<Self>
    where
        I: Iterator<Item = corpus::Result<Commit>>,
    {
        let mut index = Self::default();

        for commit in commits {
            let commit = commit?;
            let bug_id = match commit.bug_id {
                Some(id) if of_interest.contains(&id) => id,
                _ => continue,
            };

            index.bug_of.insert(commit.node.clone(), bug_id);
            index.nodes.push(commit.node.clone());
            index.by_bug.entry(bug_id).or_default().push(commit);
        }

        tracing::info!(commit_sets = index.by_bug.len(), "commit index built");
        Ok(index)
    }

    /// Commits attributed to one bug, in history order
    pub fn commits(&self, bug_id: u64) -> Option<&[Commit]> {
        self.by_bug.get(&bug_id).map(Vec::as_slice)
    }

    /// Owning bug of an indexed Mercurial hash
    pub fn owner(&self, node: &str) -> Option<u64> {
        self.bug_of.get(node).copied()
    }

    /// Ordered list of indexed Mercurial hashes (translator input)
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Number of distinct bugs with at least one indexed commit
    pub fn bug_count(&self) -> usize {
        self.by_bug.len()
    }
}
