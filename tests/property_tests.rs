//! Property-based tests for the dataset pipeline
//!
//! Covers the structural laws the pipeline guarantees:
//! 1. Selector invariant: every selected fix has regressors
//! 2. Fan-out law: flat records per fix == resolved Git fix hashes
//! 3. Decile estimation: 9 monotone values bounded by the sample
//! 4. CSV field escaping round-trips through the row parser

use std::collections::{HashMap, HashSet};
use std::path::Path;

use proptest::prelude::*;

use rastro::commit_index::CommitIndex;
use rastro::composer::{compose, ComposerConfig};
use rastro::csv_output;
use rastro::models::{Bug, Commit, Resolution};
use rastro::selector::{select_fixes, SelectorConfig};
use rastro::stats::deciles;
use rastro::vcs_map::{TranslationMap, VcsMapper};

fn bug(id: u64, regressed_by: Vec<u64>) -> Bug {
    Bug {
        id,
        creation_time: "2020-01-01T00:00:00Z".to_string(),
        resolution: Resolution::Fixed,
        regressed_by,
    }
}

fn commit(node: String, bug_id: u64) -> Commit {
    Commit {
        node,
        bug_id: Some(bug_id),
        files: Vec::new(),
        source_code_added: 0,
        source_code_deleted: 0,
        test_added: 0,
        test_deleted: 0,
        other_added: 0,
        other_deleted: 0,
    }
}

struct TableMapper(HashMap<String, String>);

impl VcsMapper for TableMapper {
    fn mercurial_to_git(
        &self,
        _repo: &Path,
        nodes: &[String],
    ) -> anyhow::Result<Vec<Option<String>>> {
        Ok(nodes.iter().map(|n| self.0.get(n).cloned()).collect())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_selected_fixes_have_regressors(
        regressors in prop::collection::vec(prop::collection::vec(1u64..50, 0..4), 0..20),
    ) {
        let bugs: Vec<Bug> = regressors
            .into_iter()
            .enumerate()
            .map(|(i, r)| bug(100 + i as u64, r))
            .collect();
        let selection = select_fixes(bugs.into_iter().map(Ok), SelectorConfig::default()).unwrap();

        for fix in &selection.fixes {
            prop_assert!(!fix.regressed_by.is_empty());
            prop_assert!(selection.bug_ids.contains(&fix.id));
            for id in &fix.regressed_by {
                prop_assert!(selection.bug_ids.contains(id));
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_fan_out_matches_resolved_hashes(
        // Per fix commit: whether it has a Git counterpart.
        mapped in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let commits: Vec<Commit> = (0..mapped.len())
            .map(|i| commit(format!("h{i}"), 10))
            .collect();
        let of_interest: HashSet<u64> = [10, 20].into_iter().collect();
        let index = CommitIndex::build(commits.into_iter().map(Ok), &of_interest).unwrap();

        let table: HashMap<String, String> = mapped
            .iter()
            .enumerate()
            .filter(|(_, m)| **m)
            .map(|(i, _)| (format!("h{i}"), format!("g{i}")))
            .collect();
        let translations =
            TranslationMap::build(&index, &TableMapper(table), Path::new("repo")).unwrap();

        let fixes = vec![bug(10, vec![20])];
        let dataset = compose(&fixes, &index, &translations, &ComposerConfig::default());

        let resolved = mapped.iter().filter(|m| **m).count();
        prop_assert_eq!(dataset.flat.len(), resolved);
        // Row survives regardless; markers are preserved in memory.
        prop_assert_eq!(dataset.rows.len(), 1);
        prop_assert_eq!(dataset.rows[0].fix_commits_git.len(), mapped.len());

        let ids: Vec<u64> = dataset.flat.iter().map(|r| r.id).collect();
        let expected: Vec<u64> = (0..resolved as u64).collect();
        prop_assert_eq!(ids, expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_deciles_monotone_and_bounded(
        data in prop::collection::vec(0.0f64..1000.0, 1..100),
    ) {
        let d = deciles(&data);
        prop_assert_eq!(d.len(), 9);

        let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for window in d.windows(2) {
            prop_assert!(window[0] <= window[1] + 1e-9);
        }
        prop_assert!(d[0] >= min - 1e-9);
        prop_assert!(d[8] <= max + 1e-9);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_parse_record_splits_plain_fields(
        fields in prop::collection::vec("[a-z0-9 ]{0,12}", 1..10),
    ) {
        let line = fields.join(",");
        let parsed = csv_output::parse_record(&line);
        prop_assert_eq!(parsed, fields);
    }
}
