use std::fmt;

use branchdiff_core::BranchDiffError;
use serde::{Deserialize, Serialize};

/// Aggregate classification of the files that differ between two branches.
///
/// Field order and names are the JSON contract consumed by CI jobs. Every
/// list is a subsequence of [`all_files`](Self::all_files) in input order.
/// Build one with [`classify`](crate::classify). No `Default`: an empty
/// report has all `only_*` flags set.
///
/// # Examples
///
/// ```
/// use branchdiff_classify::classify;
///
/// let json = classify(&[]).to_json_pretty().unwrap();
/// assert!(json.contains("\"all_files\": []"));
/// assert!(json.contains("\"only_added\": true"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Every new path, in input order.
    pub all_files: Vec<String>,
    /// New files and plain modifications.
    pub added_and_changed_files: Vec<String>,
    /// Files flagged as new.
    pub added_files: Vec<String>,
    /// Files that are neither new, deleted, nor renamed.
    pub changed_files: Vec<String>,
    /// Files flagged as deleted.
    pub deleted_files: Vec<String>,
    /// Files flagged as renamed.
    pub renamed_files: Vec<String>,
    /// At least one file was added.
    pub any_added: bool,
    /// At least one file was modified in place.
    pub any_changed: bool,
    /// At least one file was deleted.
    pub any_deleted: bool,
    /// At least one file was renamed.
    pub any_renamed: bool,
    /// Every file was added (also `true` for an empty comparison).
    pub only_added: bool,
    /// Every file was modified in place (also `true` for an empty comparison).
    pub only_changed: bool,
    /// Every file was deleted (also `true` for an empty comparison).
    pub only_deleted: bool,
    /// Every file was renamed (also `true` for an empty comparison).
    pub only_renamed: bool,
    /// Files whose extension differs between old and new path.
    pub type_changed_files: Vec<String>,
}

impl ClassificationReport {
    /// Returns `true` when no entries were classified.
    pub fn is_empty(&self) -> bool {
        self.all_files.is_empty()
    }

    /// Serialize as JSON pretty-printed with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`BranchDiffError::Serialization`] if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String, BranchDiffError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn categories(&self) -> [(&'static str, &[String]); 5] {
        [
            ("Added", self.added_files.as_slice()),
            ("Changed", self.changed_files.as_slice()),
            ("Deleted", self.deleted_files.as_slice()),
            ("Renamed", self.renamed_files.as_slice()),
            ("Type changed", self.type_changed_files.as_slice()),
        ]
    }

    /// Render the report as a markdown string.
    ///
    /// # Examples
    ///
    /// ```
    /// use branchdiff_classify::classify;
    /// use branchdiff_core::DiffEntry;
    ///
    /// let md = classify(&[DiffEntry::changed("src/lib.rs")]).to_markdown();
    /// assert!(md.contains("# Branch Comparison"));
    /// assert!(md.contains("`src/lib.rs`"));
    /// ```
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Branch Comparison\n\n");

        if self.is_empty() {
            out.push_str("No files differ.\n");
            return out;
        }

        out.push_str("| Category | Files |\n");
        out.push_str("|----------|-------|\n");
        for (label, files) in self.categories() {
            out.push_str(&format!("| {label} | {} |\n", files.len()));
        }
        out.push('\n');

        for (label, files) in self.categories() {
            if files.is_empty() {
                continue;
            }
            out.push_str(&format!("## {label}\n\n"));
            for file in files {
                out.push_str(&format!("- `{file}`\n"));
            }
            out.push('\n');
        }

        out.push_str(&format!("**Summary:** {} files\n", self.all_files.len()));
        out
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Branch Comparison")?;
        writeln!(f, "=================")?;

        if self.is_empty() {
            return writeln!(f, "No files differ.");
        }

        for (label, files) in self.categories() {
            if files.is_empty() {
                continue;
            }
            writeln!(f, "\n{label} ({}):", files.len())?;
            for file in files {
                writeln!(f, "  {file}")?;
            }
        }

        writeln!(
            f,
            "\nSummary: {} files, {} added, {} changed, {} deleted, {} renamed",
            self.all_files.len(),
            self.added_files.len(),
            self.changed_files.len(),
            self.deleted_files.len(),
            self.renamed_files.len(),
        )
    }
}
