//! GitLab repository comparison client.
//!
//! Issues the single compare request branchdiff needs and maps GitLab's
//! wire format onto [`branchdiff_core::DiffEntry`].

pub mod api;
pub mod client;

pub use client::{CompareRequest, GitLabClient};
