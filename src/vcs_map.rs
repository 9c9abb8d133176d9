//! Mercurial-to-Git hash translation
//!
//! The translation itself is an external collaborator behind the
//! [`VcsMapper`] seam; this module makes the one batch call and folds
//! the parallel result back into a per-bug mapping. A hash with no Git
//! counterpart stays an explicit `None` so downstream composition can
//! tell "not yet translated" apart from "translated to empty".

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::commit_index::CommitIndex;

/// Batch hash-translation collaborator
pub trait VcsMapper {
    /// Translate an ordered list of Mercurial hashes into a positionally
    /// parallel list of Git hashes; `None` marks a missing mapping.
    fn mercurial_to_git(&self, repo: &Path, nodes: &[String]) -> Result<Vec<Option<String>>>;
}

/// Hash translation backed by a JSON object file (hg hash -> git hash)
#[derive(Debug)]
pub struct FileVcsMap {
    map: HashMap<String, String>,
}

impl FileVcsMap {
    /// Load the map from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            bail!("vcs map file not found: {}", path.display());
        }
        let contents = fs::read_to_string(path).context("failed to read vcs map file")?;
        let map: HashMap<String, String> =
            serde_json::from_str(&contents).context("invalid vcs map JSON")?;
        Ok(Self { map })
    }
}

impl VcsMapper for FileVcsMap {
    fn mercurial_to_git(&self, _repo: &Path, nodes: &[String]) -> Result<Vec<Option<String>>> {
        Ok(nodes.iter().map(|n| self.map.get(n).cloned()).collect())
    }
}

/// Bug-keyed fold of the batch translation result
#[derive(Debug, Default)]
pub struct TranslationMap {
    by_bug: HashMap<u64, Vec<Option<String>>>,
}

impl TranslationMap {
    /// Translate every indexed hash in one batch call and group the
    /// result by owning bug.
    pub fn build(index: &CommitIndex, mapper: &dyn VcsMapper, repo: &Path) -> Result<Self> {
        let nodes = index.nodes();
        let git = mapper.mercurial_to_git(repo, nodes)?;
        if git.len() != nodes.len() {
            bail!(
                "vcs mapper returned {} hashes for {} inputs",
                git.len(),
                nodes.len()
            );
        }

        let mut by_bug: HashMap<u64, Vec<Option<String>>> = HashMap::new();
        for (node, git_hash) in nodes.iter().zip(git) {
            // Every indexed node has an owner by construction.
            if let Some(bug_id) = index.owner(node) {
                by_bug.entry(bug_id).or_default().push(git_hash);
            }
        }

        tracing::info!(bugs = by_bug.len(), "hash translation folded");
        Ok(Self { by_bug })
    }

    /// Translated hashes for one bug, `None` marking unmapped commits
    pub fn hashes(&self, bug_id: u64) -> Option<&[Option<String>]> {
        self.by_bug.get(&bug_id).map(Vec::as_slice)
    }

    /// Resolved (mapped) hashes for one bug, in commit order
    pub fn resolved(&self, bug_id: u64) -> Vec<String> {
        self.by_bug
            .get(&bug_id)
            .map(|hashes| hashes.iter().flatten().cloned().collect())
            .unwrap_or_default()
    }

    /// Whether any translation entry exists for this bug
    pub fn contains(&self, bug_id: u64) -> bool {
        self.by_bug.contains_key(&bug_id)
    }
}
