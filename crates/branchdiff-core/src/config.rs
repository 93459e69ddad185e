use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BranchDiffError;

/// Base URL of the public GitLab REST API.
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.com/api/v4";

/// Environment variable holding the GitLab access token.
pub const DEFAULT_TOKEN_ENV: &str = "GITLAB_API_TOKEN";

/// Name of the config file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = ".branchdiff.toml";

/// Top-level configuration loaded from `.branchdiff.toml`.
///
/// Supports layered resolution: CLI flags > env vars > local config > defaults.
///
/// # Examples
///
/// ```
/// use branchdiff_core::BranchDiffConfig;
///
/// let config = BranchDiffConfig::default();
/// assert_eq!(config.gitlab.base_url, "https://gitlab.com/api/v4");
/// assert_eq!(config.gitlab.token_env, "GITLAB_API_TOKEN");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchDiffConfig {
    /// GitLab connection settings.
    #[serde(default)]
    pub gitlab: GitLabConfig,
}

impl BranchDiffConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BranchDiffError::FileNotFound`] if the file does not exist,
    /// [`BranchDiffError::Io`] if it cannot be read, or
    /// [`BranchDiffError::Toml`] if the content is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self, BranchDiffError> {
        if !path.exists() {
            return Err(BranchDiffError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`BranchDiffError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use branchdiff_core::BranchDiffConfig;
    ///
    /// let toml = r#"
    /// [gitlab]
    /// base_url = "https://gitlab.example.com/api/v4"
    /// "#;
    /// let config = BranchDiffConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.gitlab.base_url, "https://gitlab.example.com/api/v4");
    /// assert_eq!(config.gitlab.token_env, "GITLAB_API_TOKEN");
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, BranchDiffError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load the explicit config file if given, otherwise `.branchdiff.toml`
    /// inside `dir` when present, otherwise defaults.
    ///
    /// # Errors
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, BranchDiffError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = dir.join(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// GitLab connection configuration.
///
/// The token itself never lives in the config file; only the name of the
/// environment variable that holds it.
///
/// # Examples
///
/// ```
/// use branchdiff_core::GitLabConfig;
///
/// let config = GitLabConfig::default();
/// let token = config.resolve_token(|_| Some("glpat-123".into())).unwrap();
/// assert_eq!(token, "glpat-123");
/// assert!(config.resolve_token(|_| None).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitLabConfig {
    /// Base URL of the GitLab REST API, including the `/api/v4` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable that holds the access token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_base_url() -> String {
    DEFAULT_GITLAB_URL.into()
}

fn default_token_env() -> String {
    DEFAULT_TOKEN_ENV.into()
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_env: default_token_env(),
        }
    }
}

impl GitLabConfig {
    /// Replace the base URL when an override (CLI flag or `GITLAB_URL`) is present.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        self
    }

    /// Look up the access token through `lookup`, keyed by [`GitLabConfig::token_env`].
    ///
    /// # Errors
    ///
    /// Returns [`BranchDiffError::Config`] if the variable is unset or empty.
    pub fn resolve_token<F>(&self, lookup: F) -> Result<String, BranchDiffError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        match lookup(&self.token_env) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(BranchDiffError::Config(format!(
                "Variable '{}' must be set.",
                self.token_env
            ))),
        }
    }
}
