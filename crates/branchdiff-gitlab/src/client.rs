use branchdiff_core::{BranchDiffError, ComparisonMode, DiffEntry, GitLabConfig};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;

use crate::api::{ApiError, CompareResponse};

/// Parameters of a single branch comparison.
///
/// # Examples
///
/// ```
/// use branchdiff_core::ComparisonMode;
/// use branchdiff_gitlab::CompareRequest;
///
/// let request = CompareRequest {
///     project_id: 42,
///     source_branch: "feature/login".into(),
///     target_branch: "main".into(),
///     mode: ComparisonMode::MergeBase,
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareRequest {
    /// Numeric GitLab project id.
    pub project_id: u64,
    /// Branch holding the candidate changes (`from`).
    pub source_branch: String,
    /// Branch to diff against (`to`).
    pub target_branch: String,
    /// Straight or merge-base comparison.
    pub mode: ComparisonMode,
}

impl CompareRequest {
    /// Check that both branch names are present.
    ///
    /// # Errors
    ///
    /// Returns [`BranchDiffError::Config`] naming the missing flag.
    pub fn validate(&self) -> Result<(), BranchDiffError> {
        if self.source_branch.trim().is_empty() {
            return Err(BranchDiffError::Config(
                "--source-branch must not be empty".into(),
            ));
        }
        if self.target_branch.trim().is_empty() {
            return Err(BranchDiffError::Config(
                "--target-branch must not be empty".into(),
            ));
        }
        Ok(())
    }

    fn error(&self, cause: impl Into<String>) -> BranchDiffError {
        BranchDiffError::Comparison {
            source_branch: self.source_branch.clone(),
            target_branch: self.target_branch.clone(),
            cause: cause.into(),
        }
    }
}

/// GitLab REST client for repository comparisons.
///
/// The access token is injected by the caller and sent as the
/// `PRIVATE-TOKEN` header on every request.
///
/// # Examples
///
/// ```
/// use branchdiff_core::GitLabConfig;
/// use branchdiff_gitlab::GitLabClient;
///
/// let client = GitLabClient::new(&GitLabConfig::default(), "glpat-xxxx").unwrap();
/// assert_eq!(client.base_url().as_str(), "https://gitlab.com/api/v4/");
/// ```
pub struct GitLabClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GitLabClient {
    /// Build a client for the API at `config.base_url`, authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`BranchDiffError::ClientInit`] if the base URL is invalid, the
    /// token cannot be sent as a header, or the HTTP client cannot be built.
    pub fn new(config: &GitLabConfig, token: &str) -> Result<Self, BranchDiffError> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut token_value = HeaderValue::from_str(token).map_err(|_| {
            BranchDiffError::ClientInit("access token is not a valid HTTP header value".into())
        })?;
        token_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("private-token"), token_value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("branchdiff/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BranchDiffError::ClientInit(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// API root every request is resolved against (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the file-level changes between the two branches of `request`.
    ///
    /// Sends exactly one request; there are no retries.
    ///
    /// # Errors
    ///
    /// Returns [`BranchDiffError::Comparison`] on network failures, non-2xx
    /// responses, or an undecodable body.
    pub async fn compare(&self, request: &CompareRequest) -> Result<Vec<DiffEntry>, BranchDiffError> {
        let url = self
            .base_url
            .join(&format!("projects/{}/repository/compare", request.project_id))
            .map_err(|e| request.error(format!("invalid compare URL: {e}")))?;

        log::debug!(
            "GET {url} from={} to={} mode={}",
            request.source_branch,
            request.target_branch,
            request.mode
        );

        let straight = if request.mode.is_straight() { "true" } else { "false" };
        let response = self
            .http
            .get(url)
            .query(&[
                ("from", request.source_branch.as_str()),
                ("to", request.target_branch.as_str()),
                ("straight", straight),
            ])
            .send()
            .await
            .map_err(|e| request.error(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiError>(&body)
                .ok()
                .and_then(|e| e.description())
                .unwrap_or(body);
            return Err(request.error(format!("GitLab API error {status}: {detail}")));
        }

        let compare: CompareResponse = response
            .json()
            .await
            .map_err(|e| request.error(format!("failed to decode compare response: {e}")))?;

        if compare.compare_timeout {
            log::warn!(
                "GitLab timed out comparing {} with {}; the file list may be incomplete",
                request.source_branch,
                request.target_branch
            );
        }
        if compare.compare_same_ref {
            log::info!(
                "{} and {} point at the same commit",
                request.source_branch,
                request.target_branch
            );
        }

        let entries = compare.into_entries();
        log::debug!("received {} diff entries", entries.len());
        Ok(entries)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, BranchDiffError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{trimmed}/"))
        .map_err(|e| BranchDiffError::ClientInit(format!("invalid GitLab URL '{raw}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(BranchDiffError::ClientInit(format!(
            "invalid GitLab URL '{raw}': scheme must be http or https"
        )));
    }
    Ok(url)
}
