use branchdiff_core::DiffEntry;
use serde::Deserialize;

/// Body of `GET /projects/:id/repository/compare`.
///
/// Only the fields branchdiff reads are modelled; everything else GitLab
/// returns (commits, web URL, ...) is ignored.
///
/// # Examples
///
/// ```
/// use branchdiff_gitlab::api::CompareResponse;
///
/// let body = r#"{"diffs": [{"old_path": "a.rs", "new_path": "a.rs"}]}"#;
/// let response: CompareResponse = serde_json::from_str(body).unwrap();
/// assert_eq!(response.into_entries()[0].new_path, "a.rs");
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareResponse {
    /// File-level changes, in GitLab's order.
    #[serde(default)]
    pub diffs: Vec<GitLabDiff>,
    /// GitLab gave up before finishing the comparison.
    #[serde(default)]
    pub compare_timeout: bool,
    /// Both refs point at the same commit.
    #[serde(default)]
    pub compare_same_ref: bool,
}

impl CompareResponse {
    /// Convert the wire diffs into classifier input, preserving order.
    pub fn into_entries(self) -> Vec<DiffEntry> {
        self.diffs.into_iter().map(DiffEntry::from).collect()
    }
}

/// A single entry of the `diffs` array.
///
/// Missing fields decode as empty strings / `false` rather than failing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GitLabDiff {
    pub old_path: String,
    pub new_path: String,
    pub new_file: bool,
    pub renamed_file: bool,
    pub deleted_file: bool,
}

impl From<GitLabDiff> for DiffEntry {
    fn from(diff: GitLabDiff) -> Self {
        DiffEntry {
            old_path: diff.old_path,
            new_path: diff.new_path,
            is_new: diff.new_file,
            is_deleted: diff.deleted_file,
            is_renamed: diff.renamed_file,
        }
    }
}

/// Error payload GitLab sends with non-2xx responses.
///
/// Depending on the endpoint it uses `message` (possibly a nested object)
/// or `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiError {
    /// Best human-readable description found in the payload.
    pub fn description(&self) -> Option<String> {
        match (&self.message, &self.error) {
            (Some(serde_json::Value::String(s)), _) => Some(s.clone()),
            (Some(other), _) if !other.is_null() => Some(other.to_string()),
            (_, Some(e)) => Some(e.clone()),
            _ => None,
        }
    }
}
