use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One file's change record within a branch comparison.
///
/// The three flags come straight from the hosting service and are not
/// mutually exclusive; a file counts as "changed" only when none is set.
///
/// # Examples
///
/// ```
/// use branchdiff_core::DiffEntry;
///
/// let entry = DiffEntry::changed("src/lib.rs");
/// assert!(entry.is_changed());
///
/// let entry = DiffEntry {
///     is_new: true,
///     ..DiffEntry::changed("src/new.rs")
/// };
/// assert!(!entry.is_changed());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    /// Path before the change.
    pub old_path: String,
    /// Path after the change.
    pub new_path: String,
    /// File did not exist before.
    pub is_new: bool,
    /// File no longer exists after the change.
    pub is_deleted: bool,
    /// File path changed with history preserved.
    pub is_renamed: bool,
}

impl DiffEntry {
    /// An in-place modification of `path`: same old and new path, no flags.
    pub fn changed(path: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            old_path: path.clone(),
            new_path: path,
            ..Self::default()
        }
    }

    /// Returns `true` when the entry is neither new, deleted, nor renamed.
    pub fn is_changed(&self) -> bool {
        !self.is_deleted && !self.is_new && !self.is_renamed
    }
}

/// How the two branches are compared.
///
/// # Examples
///
/// ```
/// use branchdiff_core::ComparisonMode;
///
/// assert_eq!(ComparisonMode::from_straight(true), ComparisonMode::Straight);
/// assert_eq!(ComparisonMode::from_straight(false), ComparisonMode::MergeBase);
/// assert!(!ComparisonMode::MergeBase.is_straight());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonMode {
    /// Direct two-point comparison of the branch tips.
    Straight,
    /// Three-dot comparison against the merge base.
    #[default]
    MergeBase,
}

impl ComparisonMode {
    /// Map the `--straight` flag onto a mode.
    pub fn from_straight(straight: bool) -> Self {
        if straight {
            ComparisonMode::Straight
        } else {
            ComparisonMode::MergeBase
        }
    }

    /// Returns `true` for a direct two-point comparison.
    pub fn is_straight(self) -> bool {
        matches!(self, ComparisonMode::Straight)
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonMode::Straight => write!(f, "straight"),
            ComparisonMode::MergeBase => write!(f, "merge-base"),
        }
    }
}

/// Output format for the classification report.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument parsing.
///
/// # Examples
///
/// ```
/// use branchdiff_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
///
/// let fmt: OutputFormat = "md".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Markdown);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON with snake_case keys, for pipelines.
    #[default]
    Json,
    /// Human-readable summary.
    Text,
    /// Markdown-formatted output.
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
