/// Host and repository path extracted from a git remote URL.
///
/// Understands the three shapes remotes commonly use:
/// - scp-like SSH: `git@github.com:owner/repo.git`
/// - SSH URL: `ssh://git@github.com/owner/repo.git`
/// - HTTP(S): `https://github.com/owner/repo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub host: String,
    pub owner: String,
    pub repo: String,
}

impl RemoteInfo {
    /// Parse a remote URL into host/owner/repo.
    ///
    /// # Returns
    /// * `Some(RemoteInfo)` - recognized hosting-service URL
    /// * `None` - anything else (local paths, bare hosts, ...)
    pub fn parse(url: &str) -> Option<Self> {
        let re = regex::Regex::new(
            r"^(?:(?:https?|ssh)://)?(?:[\w.-]+@)?([\w.-]+)[:/]([\w.-]+)/([\w.-]+?)(?:\.git)?/?$",
        )
        .ok()?;
        let captures = re.captures(url)?;

        let host = captures.get(1)?.as_str();
        let owner = captures.get(2)?.as_str();
        let repo = captures.get(3)?.as_str();

        // A host without a dot is almost certainly a local path component
        if !host.contains('.') {
            return None;
        }

        Some(RemoteInfo {
            host: host.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// URL of the hosting service's CI actions page for this repository.
    pub fn actions_url(&self) -> String {
        format!("https://{}/{}/{}/actions", self.host, self.owner, self.repo)
    }
}
