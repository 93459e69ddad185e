//! File classification for branch comparisons.
//!
//! Turns the raw diff entries returned by the hosting service into a
//! [`report::ClassificationReport`]: per-category file lists, "any" and
//! "only" flags, and files whose extension changed. Pure and independent of
//! the network client.

pub mod classify;
pub mod report;

pub use classify::{classify, file_extension};
pub use report::ClassificationReport;
