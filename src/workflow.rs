//! Release workflow orchestration
//!
//! The whole release is one linear sequence with early exits: validate the
//! working tree, resolve the target version, show the plan, ask for
//! confirmation, then run the mutating steps fail-fast. The first failing
//! step aborts the rest; no compensating actions are attempted.

use semver::Version;
use std::path::PathBuf;

use crate::config::Config;
use crate::context::ReleaseContext;
use crate::error::{ReleaseError, Result};
use crate::manifest::ManifestStore;
use crate::remote::RemoteInfo;
use crate::ui::formatter;
use crate::vcs::VersionControl;
use crate::version::ReleaseTarget;

/// Asks the user whether to go ahead with a planned release.
///
/// The workflow depends on this seam instead of reading stdin, so tests
/// can script the answer.
pub trait Prompt {
    /// # Returns
    /// * `Ok(true)` - proceed with the release
    /// * `Ok(false)` - abort cleanly
    fn confirm_release(&mut self, plan: &ReleasePlan) -> Result<bool>;
}

/// Everything the executor will do, resolved up front.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasePlan {
    pub current: Version,
    pub next: Version,
    pub tag: String,
    pub branch: String,
    pub remote: String,
    pub commit_message: String,
    pub tag_message: String,
    pub files: Vec<PathBuf>,
}

/// How a run ended without an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseOutcome {
    /// All five steps completed
    Completed(ReleasePlan),
    /// User declined the confirmation prompt - a normal termination
    Cancelled,
    /// Dry-run stopped before the confirmation prompt
    DryRun(ReleasePlan),
    /// No argument given; current version and usage examples were printed
    UsageShown,
}

/// Run the release workflow.
///
/// `target` is the raw command-line argument: `None` prints the usage
/// screen, a bump keyword or explicit version goes through
/// [ReleaseTarget::parse]. All repository and manifest access goes through
/// the trait objects so the flow is testable with mocks.
pub fn run_release(
    ctx: &ReleaseContext,
    config: &Config,
    target: Option<&str>,
    vcs: &dyn VersionControl,
    manifest: &mut dyn ManifestStore,
    prompt: &mut dyn Prompt,
) -> Result<ReleaseOutcome> {
    ensure_clean_tree(vcs)?;

    let current = manifest.version()?;

    let raw_target = match target {
        Some(raw) => raw,
        None => {
            formatter::display_usage(&current);
            return Ok(ReleaseOutcome::UsageShown);
        }
    };

    let target = ReleaseTarget::parse(raw_target)?;
    let next = target.resolve(&current);
    let branch = vcs.current_branch()?;
    let tag = config.format_tag(&next);

    let plan = ReleasePlan {
        current,
        next: next.clone(),
        tag: tag.clone(),
        branch,
        remote: ctx.remote.clone(),
        commit_message: config.format_commit_message(&next),
        tag_message: config.format_tag_message(&tag),
        files: manifest.tracked_files(),
    };

    formatter::display_plan(&plan);

    if ctx.dry_run {
        formatter::display_status("Dry run: no changes were made");
        return Ok(ReleaseOutcome::DryRun(plan));
    }

    if !ctx.assume_yes && !prompt.confirm_release(&plan)? {
        formatter::display_status("Release cancelled");
        return Ok(ReleaseOutcome::Cancelled);
    }

    execute(&plan, vcs, manifest)?;
    announce(&plan, vcs);

    Ok(ReleaseOutcome::Completed(plan))
}

/// Abort unless the working tree is clean.
///
/// Prints the short-form status listing before failing so the user can see
/// what is dirty.
fn ensure_clean_tree(vcs: &dyn VersionControl) -> Result<()> {
    let entries = vcs.status_entries()?;
    if entries.is_empty() {
        return Ok(());
    }
    formatter::display_dirty_status(&entries);
    Err(ReleaseError::DirtyWorkTree)
}

/// The five mutating steps, in order, fail-fast.
fn execute(
    plan: &ReleasePlan,
    vcs: &dyn VersionControl,
    manifest: &mut dyn ManifestStore,
) -> Result<()> {
    formatter::display_status(&format!("Updating manifest to {}", plan.next));
    manifest.set_version(&plan.next)?;
    vcs.stage(&plan.files)?;

    formatter::display_status(&format!("Committing: {}", plan.commit_message));
    vcs.commit(&plan.commit_message)?;

    formatter::display_status(&format!("Creating annotated tag {}", plan.tag));
    vcs.create_annotated_tag(&plan.tag, &plan.tag_message)?;

    formatter::display_status(&format!("Pushing {} to {}", plan.branch, plan.remote));
    vcs.push_branch(&plan.remote, &plan.branch)?;
    formatter::display_success(&format!("Pushed {} to {}", plan.branch, plan.remote));

    formatter::display_status(&format!("Pushing tag {} to {}", plan.tag, plan.remote));
    vcs.push_tag(&plan.remote, &plan.tag)?;
    formatter::display_success(&format!("Pushed tag {} to {}", plan.tag, plan.remote));

    Ok(())
}

/// Success message plus the CI actions link derived from the remote URL.
///
/// The release is already complete here, so an unrecognizable remote URL
/// only downgrades the link to a note.
fn announce(plan: &ReleasePlan, vcs: &dyn VersionControl) {
    formatter::display_success(&format!("Released {}", plan.tag));

    match vcs.remote_url(&plan.remote) {
        Ok(url) => match RemoteInfo::parse(&url) {
            Some(info) => formatter::display_publish_note(&info.actions_url()),
            None => formatter::display_status(&format!(
                "Publishing continues automatically once CI sees the tag (remote: {})",
                url
            )),
        },
        Err(_) => formatter::display_status(
            "Publishing continues automatically once CI sees the tag",
        ),
    }
}
