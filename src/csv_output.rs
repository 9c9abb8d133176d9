//! CSV output format for the tabular dataset
//!
//! Multi-valued fields are space-joined at this boundary only; the
//! in-memory model keeps proper ordered sequences. Booleans serialize
//! as `True`/`False` for compatibility with the established dataset
//! consumers.

use crate::composer::FixRecord;

/// Dataset header row
pub const HEADER: &str = "FIX_ID,FIX_COMMITS_MERCURIAL,FIX_COMMITS_GIT,BUG_ID,\
BUG_COMMITS_MERCURIAL,BUG_COMMITS_GIT,NO_FILE_SHARED,NEW_LINES_ONLY_FIX,\
REMOVE_LINES_ONLY_BUG,NO_BUG";

/// Column positions in the dataset CSV
pub mod col {
    pub const FIX_COMMITS_MERCURIAL: usize = 1;
    pub const BUG_COMMITS_MERCURIAL: usize = 4;
    pub const NO_FILE_SHARED: usize = 6;
    pub const NEW_LINES_ONLY_FIX: usize = 7;
    pub const REMOVE_LINES_ONLY_BUG: usize = 8;
    pub const NO_BUG: usize = 9;
}

/// CSV dataset formatter
#[derive(Debug, Default)]
pub struct DatasetCsv {
    rows: Vec<FixRecord>,
}

impl DatasetCsv {
    /// Create a new CSV dataset formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a composed fix record
    pub fn add_row(&mut self, row: FixRecord) {
        self.rows.push(row);
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn bool_field(value: bool) -> &'static str {
        if value {
            "True"
        } else {
            "False"
        }
    }

    /// Format one fix record as a CSV row
    fn format_row(row: &FixRecord) -> String {
        let fix_git: Vec<&str> = row
            .fix_commits_git
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();
        let bug_git: Vec<&str> = row
            .regressor_commits_git
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();
        let bug_ids: Vec<String> = row.regressor_ids.iter().map(u64::to_string).collect();

        let fields = [
            row.fix_id.to_string(),
            Self::escape_field(&row.fix_commits_hg.join(" ")),
            Self::escape_field(&fix_git.join(" ")),
            Self::escape_field(&bug_ids.join(" ")),
            Self::escape_field(&row.regressor_commits_hg.join(" ")),
            Self::escape_field(&bug_git.join(" ")),
            Self::bool_field(row.no_file_shared).to_string(),
            Self::bool_field(row.new_lines_only_fix).to_string(),
            Self::bool_field(row.remove_lines_only_regressor).to_string(),
            Self::bool_field(row.no_regressor_commits).to_string(),
        ];
        fields.join(",")
    }

    /// Generate the full CSV document
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(HEADER);
        output.push('\n');
        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push('\n');
        }
        output
    }
}

/// Split one CSV line into fields, honoring quoted fields
pub fn parse_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}
