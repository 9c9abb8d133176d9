//! Descriptive statistics over a generated dataset
//!
//! Backs the `report` subcommand: recomputes the flag counts from the
//! tabular CSV and prints the deciles of commits-per-fix and
//! commits-per-regressor using linear-interpolation quantile
//! estimation.

use anyhow::{bail, Result};

use crate::csv_output::{self, col};

/// Aggregated counts and samples recomputed from the dataset CSV
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReportSummary {
    pub total: usize,
    pub no_file_shared: usize,
    pub new_lines_only_fix: usize,
    pub remove_lines_only_regressor: usize,
    pub no_regressor_commits: usize,
    /// Fixes with an empty fix-commit field (cause known, fix not landed)
    pub no_fix_yet: usize,
    pub commits_per_fix: Vec<f64>,
    pub commits_per_regressor: Vec<f64>,
}

impl ReportSummary {
    /// Parse a dataset CSV document
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        match lines.next() {
            Some(header) if header == csv_output::HEADER => {}
            Some(header) => bail!("unexpected dataset header: {header}"),
            None => bail!("empty dataset file"),
        }

        let mut summary = Self::default();
        for line in lines {
            if line.is_empty() {
                continue;
            }
            let fields = csv_output::parse_record(line);
            if fields.len() != 10 {
                bail!("malformed dataset row: {line}");
            }

            summary.total += 1;

            let fix_commits = count_values(&fields[col::FIX_COMMITS_MERCURIAL]);
            if fix_commits == 0 {
                summary.no_fix_yet += 1;
            }
            summary.commits_per_fix.push(fix_commits as f64);
            summary
                .commits_per_regressor
                .push(count_values(&fields[col::BUG_COMMITS_MERCURIAL]) as f64);

            summary.no_file_shared += truthy(&fields[col::NO_FILE_SHARED]);
            summary.new_lines_only_fix += truthy(&fields[col::NEW_LINES_ONLY_FIX]);
            summary.remove_lines_only_regressor += truthy(&fields[col::REMOVE_LINES_ONLY_BUG]);
            summary.no_regressor_commits += truthy(&fields[col::NO_BUG]);
        }
        Ok(summary)
    }

    /// Pairs where both the fix and the bug-introducing side are known
    pub fn both_known(&self) -> usize {
        self.total - self.no_fix_yet
    }

    /// Render the report in the established text layout
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Total number of pairs: {}\n", self.total));
        out.push_str(&format!(
            "Total number of pairs where both bug-introducing and bug-fix are known: {}\n",
            self.both_known()
        ));
        out.push_str(&format!(
            "Number of pairs with no shared files: {}\n",
            self.no_file_shared
        ));
        out.push_str(&format!(
            "Number of pairs where the bug-fix only contains new lines: {}\n",
            self.new_lines_only_fix
        ));
        out.push_str(&format!(
            "Number of pairs where the bug-introducing only contains removed lines: {}\n",
            self.remove_lines_only_regressor
        ));
        out.push_str(&format!(
            "Number of pairs where the bug-introducing is not linked to any commit: {}\n",
            self.no_regressor_commits
        ));
        out.push_str(&format!(
            "Number of bugs which are not fixed yet and where the cause has been identified: {}\n",
            self.no_fix_yet
        ));
        out.push_str("Deciles for the number of commits associated to bug fixes:\n");
        out.push_str(&format!("{:?}\n", deciles(&self.commits_per_fix)));
        out.push_str("Deciles for the number of commits associated to bug introducing:\n");
        out.push_str(&format!("{:?}\n", deciles(&self.commits_per_regressor)));
        out
    }
}

/// Number of space-separated values in a field; empty means zero
fn count_values(field: &str) -> usize {
    if field.is_empty() {
        0
    } else {
        field.split(' ').count()
    }
}

fn truthy(field: &str) -> usize {
    usize::from(field == "True")
}

/// Quantile by linear interpolation over sorted data
///
/// Equivalent to the "inclusive" quantile method: position
/// `p * (n - 1)` interpolated between neighbors.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let index = p * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let weight = index - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

/// The 9 deciles of a sample
pub fn deciles(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    (1..=9).map(|i| quantile(&sorted, i as f64 / 10.0)).collect()
}
