//! Bug fix selection
//!
//! First pipeline stage: keep the bugs that reference at least one
//! regressor, and collect the set of bug IDs (fixes plus regressors)
//! that bounds the commit index.

use std::collections::HashSet;

use crate::corpus;
use crate::models::{Bug, Resolution};

/// Fix-selection policy
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorConfig {
    /// Additionally require resolution == FIXED
    pub require_fixed: bool,
}

/// Result of the selection stage
#[derive(Debug, Default)]
pub struct Selection {
    /// Bugs with a non-empty regressed_by list, in corpus order
    pub fixes: Vec<Bug>,
    /// IDs of every selected fix and every referenced regressor
    pub bug_ids: HashSet<u64>,
}

/// Filter the bug corpus down to fixes
///
/// Pure filter over the lazy corpus stream; a corpus error is fatal and
/// propagates to the caller.
pub fn select_fixes<I>(bugs: I, config: SelectorConfig) -> corpus::Result<Selection>
where
    I: Iterator<Item = corpus::Result<Bug>>,
{
    let mut selection = Selection::default();

    for bug in bugs {
        let bug = bug?;
        if !bug.is_fix() {
            continue;
        }
        if config.require_fixed && bug.resolution != Resolution::Fixed {
            continue;
        }

        selection.bug_ids.insert(bug.id);
        selection.bug_ids.extend(bug.regressed_by.iter().copied());
        selection.fixes.push(bug);
    }

    tracing::info!(fixes = selection.fixes.len(), "fix gathering completed");
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bug(id: u64, regressed_by: &[u64], resolution: Resolution) -> Bug {
        Bug {
            id,
            creation_time: String::new(),
            resolution,
            regressed_by: regressed_by.to_vec(),
        }
    }

    fn stream(bugs: Vec<Bug>) -> impl Iterator<Item = corpus::Result<Bug>> {
        bugs.into_iter().map(Ok)
    }

    #[test]
    fn test_keeps_only_bugs_with_regressors() {
        let bugs = vec![
            bug(1, &[], Resolution::Fixed),
            bug(2, &[7], Resolution::Open),
            bug(3, &[8, 9], Resolution::Other),
        ];
        let selection = select_fixes(stream(bugs), SelectorConfig::default()).unwrap();
        let ids: Vec<u64> = selection.fixes.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_bug_ids_cover_fixes_and_regressors() {
        let bugs = vec![bug(2, &[7], Resolution::Open), bug(3, &[8, 9], Resolution::Open)];
        let selection = select_fixes(stream(bugs), SelectorConfig::default()).unwrap();
        let expected: HashSet<u64> = [2, 3, 7, 8, 9].into_iter().collect();
        assert_eq!(selection.bug_ids, expected);
    }

    #[test]
    fn test_require_fixed_filters_unresolved() {
        let bugs = vec![
            bug(1, &[7], Resolution::Open),
            bug(2, &[8], Resolution::Fixed),
            bug(3, &[9], Resolution::Other),
        ];
        let config = SelectorConfig { require_fixed: true };
        let selection = select_fixes(stream(bugs), config).unwrap();
        let ids: Vec<u64> = selection.fixes.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2]);
        assert!(!selection.bug_ids.contains(&7));
    }

    #[test]
    fn test_empty_corpus_yields_empty_selection() {
        let selection = select_fixes(stream(vec![]), SelectorConfig::default()).unwrap();
        assert!(selection.fixes.is_empty());
        assert!(selection.bug_ids.is_empty());
    }

    #[test]
    fn test_selection_preserves_corpus_order() {
        let bugs = vec![
            bug(5, &[1], Resolution::Open),
            bug(3, &[1], Resolution::Open),
            bug(9, &[1], Resolution::Open),
        ];
        let selection = select_fixes(stream(bugs), SelectorConfig::default()).unwrap();
        let ids: Vec<u64> = selection.fixes.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }
}
