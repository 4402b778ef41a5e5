use std::path::PathBuf;

/// Invocation context - built once in main, passed everywhere.
///
/// All operations take the working directory and remote from here instead
/// of reading ambient process state, so the whole workflow can be driven
/// against a temporary directory in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseContext {
    /// Directory the release operates in (the repository working tree)
    pub workdir: PathBuf,

    /// Git remote to push to (e.g. "origin")
    pub remote: String,

    /// Preview mode - print the plan, mutate nothing
    pub dry_run: bool,

    /// Skip the confirmation prompt
    pub assume_yes: bool,
}

impl ReleaseContext {
    pub fn new(workdir: PathBuf, remote: impl Into<String>) -> Self {
        ReleaseContext {
            workdir,
            remote: remote.into(),
            dry_run: false,
            assume_yes: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults() {
        let ctx = ReleaseContext::new(PathBuf::from("/tmp/project"), "origin");
        assert_eq!(ctx.remote, "origin");
        assert!(!ctx.dry_run);
        assert!(!ctx.assume_yes);
    }
}
