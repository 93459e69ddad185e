//! Core types, configuration, and error handling for branchdiff.
//!
//! This crate provides the shared foundation used by the other branchdiff crates:
//! - [`BranchDiffError`]: unified error type using `thiserror` and `miette`
//! - [`BranchDiffConfig`]: configuration loaded from `.branchdiff.toml`
//! - Shared types: [`DiffEntry`], [`ComparisonMode`], [`OutputFormat`]

mod config;
mod error;
mod types;

pub use config::{BranchDiffConfig, GitLabConfig, DEFAULT_GITLAB_URL, DEFAULT_TOKEN_ENV};
pub use error::BranchDiffError;
pub use types::{ComparisonMode, DiffEntry, OutputFormat};

/// A convenience `Result` type for branchdiff operations.
pub type Result<T> = std::result::Result<T, BranchDiffError>;
