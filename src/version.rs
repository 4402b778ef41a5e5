use crate::error::{ReleaseError, Result};
use semver::Version;

/// Which semantic version component to increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Patch,
    Minor,
    Major,
}

impl BumpKind {
    /// Apply the increment to a version.
    ///
    /// Standard semantic-version rules: the selected component is
    /// incremented and everything below it resets to 0. Pre-release and
    /// build metadata on the current version are discarded.
    pub fn apply(&self, current: &Version) -> Version {
        match self {
            BumpKind::Major => Version::new(current.major + 1, 0, 0),
            BumpKind::Minor => Version::new(current.major, current.minor + 1, 0),
            BumpKind::Patch => Version::new(current.major, current.minor, current.patch + 1),
        }
    }
}

/// What the user asked to release.
///
/// Produced by a single parse of the command-line argument and matched
/// exhaustively, so the accepted forms live in exactly one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseTarget {
    /// An explicit version given verbatim (e.g. "2.1.0")
    Explicit(Version),
    /// A bump keyword (patch, minor, major) applied to the current version
    Bump(BumpKind),
}

impl ReleaseTarget {
    /// Parse the single command-line argument into a release target.
    ///
    /// Accepts the bump keywords `patch`, `minor`, and `major`, or an
    /// explicit three-part dotted version (`1.2.3`). Anything else is an
    /// [ReleaseError::InvalidTarget] naming the accepted forms.
    pub fn parse(arg: &str) -> Result<Self> {
        match arg {
            "patch" => Ok(ReleaseTarget::Bump(BumpKind::Patch)),
            "minor" => Ok(ReleaseTarget::Bump(BumpKind::Minor)),
            "major" => Ok(ReleaseTarget::Bump(BumpKind::Major)),
            other => {
                let looks_explicit = regex::Regex::new(r"^\d+\.\d+\.\d+$")
                    .map(|re| re.is_match(other))
                    .unwrap_or(false);
                if !looks_explicit {
                    return Err(ReleaseError::InvalidTarget(other.to_string()));
                }
                let version = Version::parse(other).map_err(|e| {
                    ReleaseError::version(format!("cannot parse '{}': {}", other, e))
                })?;
                Ok(ReleaseTarget::Explicit(version))
            }
        }
    }

    /// Resolve the new version from the current one.
    ///
    /// Explicit targets are taken verbatim; bump targets apply the
    /// increment rules to `current`.
    pub fn resolve(&self, current: &Version) -> Version {
        match self {
            ReleaseTarget::Explicit(version) => version.clone(),
            ReleaseTarget::Bump(kind) => kind.apply(current),
        }
    }
}
