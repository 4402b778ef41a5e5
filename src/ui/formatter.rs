//! Pure formatting functions for UI output.
//!
//! All display logic lives here, separated from user interaction. Colors
//! are cosmetic; nothing downstream parses this output.

use console::style;
use semver::Version;

use crate::vcs::StatusEntry;
use crate::workflow::ReleasePlan;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print the short-form listing of everything dirtying the working tree.
pub fn display_dirty_status(entries: &[StatusEntry]) {
    eprintln!("{}", style("Uncommitted changes:").bold());
    for entry in entries {
        eprintln!("  {}", entry);
    }
}

/// Print the current version and usage examples for the no-argument case.
pub fn display_usage(current: &Version) {
    println!("Current version: {}", style(current).bold());
    println!();
    println!("Usage: git-release <patch|minor|major|X.Y.Z>");
    println!();
    println!("Examples:");
    println!("  git-release patch     bump the patch version");
    println!("  git-release minor     bump the minor version");
    println!("  git-release 2.0.0     release an explicit version");
}

/// Print the release summary and the ordered list of actions to follow.
pub fn display_plan(plan: &ReleasePlan) {
    println!();
    println!("{}", style("Release summary:").bold());
    println!(
        "  Version: {} -> {}",
        style(&plan.current).red(),
        style(&plan.next).green()
    );
    println!("  Tag:     {}", style(&plan.tag).green());
    println!("  Branch:  {} ({})", plan.branch, plan.remote);
    println!();

    let files = plan
        .files
        .iter()
        .map(|f| f.display().to_string())
        .collect::<Vec<_>>()
        .join(" and ");

    println!("This will:");
    println!("  1. Update {} to {}", files, plan.next);
    println!("  2. Commit: {}", plan.commit_message);
    println!("  3. Create annotated tag {}", plan.tag);
    println!(
        "  4. Push {} and {} to {}",
        plan.branch, plan.tag, plan.remote
    );
    println!("  5. Trigger the automated publish from CI");
}

/// Point the user at the CI run that publishes the release.
pub fn display_publish_note(url: &str) {
    println!(
        "{} Publishing continues automatically: {}",
        style("→").yellow(),
        style(url).cyan()
    );
}
