use std::path::PathBuf;

use miette::Diagnostic;

/// Errors that can occur while comparing branches and reporting the result.
///
/// Every variant is fatal: the binary reports it on stderr and exits non-zero.
///
/// # Examples
///
/// ```
/// use branchdiff_core::BranchDiffError;
///
/// let err = BranchDiffError::Config("Variable 'GITLAB_API_TOKEN' must be set".into());
/// assert!(err.to_string().contains("GITLAB_API_TOKEN"));
/// ```
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum BranchDiffError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    #[diagnostic(code(branchdiff::io))]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration, including an absent credential.
    #[error("configuration error: {0}")]
    #[diagnostic(code(branchdiff::config))]
    Config(String),

    /// The GitLab API client could not be constructed.
    #[error("failed to create client: {0}")]
    #[diagnostic(
        code(branchdiff::client_init),
        help("check the GitLab base URL and that the token contains no control characters")
    )]
    ClientInit(String),

    /// The remote comparison request failed.
    #[error("failed to compare {source_branch} with {target_branch}. Ensure both branches exist. Error: {cause}")]
    #[diagnostic(code(branchdiff::comparison))]
    Comparison {
        /// Branch holding the candidate changes.
        source_branch: String,
        /// Branch compared against.
        target_branch: String,
        /// Underlying transport or API failure.
        cause: String,
    },

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    #[diagnostic(code(branchdiff::serialization))]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(branchdiff::toml))]
    Toml(#[from] toml::de::Error),

    /// A required file was not found.
    #[error("file not found: {}", .0.display())]
    #[diagnostic(code(branchdiff::file_not_found))]
    FileNotFound(PathBuf),
}
