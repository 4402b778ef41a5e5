use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::{ReleaseError, Result};
use crate::vcs::{StatusEntry, VersionControl};

/// A mutating operation recorded by [MockVcs], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsOp {
    Stage(Vec<PathBuf>),
    Commit(String),
    Tag { name: String, message: String },
    PushBranch { remote: String, branch: String },
    PushTag { remote: String, tag: String },
}

/// Step at which [MockVcs] should fail, for fail-fast tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Commit,
    Tag,
    PushBranch,
    PushTag,
}

/// Mock version control for testing without actual git operations.
///
/// Records every mutating call in order; an optional [FailAt] makes one
/// step return an error before being recorded, so tests can assert that
/// nothing runs after a failure.
pub struct MockVcs {
    branch: String,
    remote_url: String,
    dirty: Vec<StatusEntry>,
    fail_at: Option<FailAt>,
    ops: Mutex<Vec<VcsOp>>,
}

impl MockVcs {
    /// Create a clean mock repository on branch "main" with a GitHub remote.
    pub fn new() -> Self {
        MockVcs {
            branch: "main".to_string(),
            remote_url: "git@github.com:acme/widget.git".to_string(),
            dirty: Vec::new(),
            fail_at: None,
            ops: Mutex::new(Vec::new()),
        }
    }

    /// Set the branch HEAD points at.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = branch.into();
        self
    }

    /// Set the URL reported for any remote.
    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = url.into();
        self
    }

    /// Make the working tree dirty with the given entries.
    pub fn with_dirty_entries(mut self, entries: Vec<StatusEntry>) -> Self {
        self.dirty = entries;
        self
    }

    /// Fail at the given step instead of recording it.
    pub fn failing_at(mut self, step: FailAt) -> Self {
        self.fail_at = Some(step);
        self
    }

    /// Snapshot of the recorded operations, in call order.
    pub fn operations(&self) -> Vec<VcsOp> {
        self.ops.lock().expect("ops mutex poisoned").clone()
    }

    fn record(&self, step: Option<FailAt>, op: VcsOp) -> Result<()> {
        if let Some(step) = step {
            if self.fail_at == Some(step) {
                return Err(ReleaseError::remote(format!(
                    "injected failure at {:?}",
                    step
                )));
            }
        }
        self.ops.lock().expect("ops mutex poisoned").push(op);
        Ok(())
    }
}

impl Default for MockVcs {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for MockVcs {
    fn status_entries(&self) -> Result<Vec<StatusEntry>> {
        Ok(self.dirty.clone())
    }

    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        self.record(None, VcsOp::Stage(paths.to_vec()))
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(
            Some(FailAt::Commit),
            VcsOp::Commit(message.to_string()),
        )
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        self.record(
            Some(FailAt::Tag),
            VcsOp::Tag {
                name: name.to_string(),
                message: message.to_string(),
            },
        )
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.record(
            Some(FailAt::PushBranch),
            VcsOp::PushBranch {
                remote: remote.to_string(),
                branch: branch.to_string(),
            },
        )
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.record(
            Some(FailAt::PushTag),
            VcsOp::PushTag {
                remote: remote.to_string(),
                tag: tag.to_string(),
            },
        )
    }

    fn remote_url(&self, _remote: &str) -> Result<String> {
        Ok(self.remote_url.clone())
    }
}
