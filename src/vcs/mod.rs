//! Version control abstraction layer
//!
//! This module provides a trait-based abstraction over the git operations
//! the release workflow needs, allowing for multiple implementations
//! including real repositories and mock implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [VersionControl] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Vcs]: a real implementation using the `git2` crate
//! - [mock::MockVcs]: a recording implementation for testing
//!
//! Workflow code depends on the trait rather than on `git2` directly, so
//! the confirmation gate and executor are testable without a repository.

pub mod mock;
pub mod repository;

pub use mock::MockVcs;
pub use repository::Git2Vcs;

use crate::error::Result;
use std::fmt;
use std::path::PathBuf;

/// One entry of the short-form status listing.
///
/// `code` is the familiar two-letter `git status --short` column pair
/// (index state then worktree state), e.g. `" M"` for an unstaged
/// modification or `"??"` for an untracked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
    pub code: String,
    pub path: String,
}

impl StatusEntry {
    pub fn new(code: impl Into<String>, path: impl Into<String>) -> Self {
        StatusEntry {
            code: code.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for StatusEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.path)
    }
}

/// Common git operation trait for the release workflow.
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` to allow safe sharing across
/// threads.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to the appropriate
/// [crate::error::ReleaseError] variants.
pub trait VersionControl: Send + Sync {
    /// Enumerate everything that makes the working tree dirty.
    ///
    /// Staged changes, tracked modifications, and untracked files all
    /// produce an entry. An empty vector means the tree is clean.
    fn status_entries(&self) -> Result<Vec<StatusEntry>>;

    /// Name of the branch HEAD currently points at.
    ///
    /// # Returns
    /// * `Ok(String)` - the branch shorthand (e.g. "main")
    /// * `Err` - if HEAD is detached or unborn
    fn current_branch(&self) -> Result<String>;

    /// Stage the given paths (relative to the repository root) in the index.
    fn stage(&self, paths: &[PathBuf]) -> Result<()>;

    /// Create a commit of the staged index on HEAD.
    fn commit(&self, message: &str) -> Result<()>;

    /// Create an annotated tag on the current HEAD commit.
    ///
    /// # Arguments
    /// * `name` - name of the tag to create (e.g. "v1.2.3")
    /// * `message` - annotation message stored with the tag
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push a branch to a remote.
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Push a tag to a remote.
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;

    /// URL the named remote points at.
    fn remote_url(&self, remote: &str) -> Result<String>;
}
