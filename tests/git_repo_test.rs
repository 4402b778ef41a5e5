// tests/git_repo_test.rs
//
// Exercises the git2-backed implementation against real temporary
// repositories.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use git2::Repository;
use semver::Version;
use serial_test::serial;
use tempfile::TempDir;

use git_release::error::ReleaseError;
use git_release::manifest::{ManifestStore, NpmManifest};
use git_release::vcs::{Git2Vcs, VersionControl};

// Helper to set up a temporary repository with a committed package.json
fn setup_test_repo(version: &str) -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");

    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    let body = format!(
        "{{\n  \"name\": \"widget\",\n  \"version\": \"{}\"\n}}\n",
        version
    );
    fs::write(temp_dir.path().join("package.json"), body).expect("Could not write package.json");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new("package.json"))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");

    repo.commit(
        Some("HEAD"),
        &repo.signature().expect("Could not get sig"),
        &repo.signature().expect("Could not get sig"),
        "Initial commit",
        &tree,
        &[],
    )
    .expect("Could not create commit");

    temp_dir
}

#[test]
fn test_discover_in_repository() {
    let temp_dir = setup_test_repo("1.0.0");
    let vcs = Git2Vcs::discover(temp_dir.path());
    assert!(vcs.is_ok());
}

#[test]
fn test_discover_outside_repository_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = Git2Vcs::discover(temp_dir.path());
    assert!(matches!(result, Err(ReleaseError::NotARepository(_))));
}

#[test]
fn test_current_branch_after_initial_commit() {
    let temp_dir = setup_test_repo("1.0.0");
    let vcs = Git2Vcs::discover(temp_dir.path()).unwrap();
    let branch = vcs.current_branch().unwrap();
    // libgit2 default branch name depends on host configuration
    assert!(
        branch == "main" || branch == "master",
        "unexpected branch name {}",
        branch
    );
}

#[test]
fn test_clean_tree_has_no_status_entries() {
    let temp_dir = setup_test_repo("1.0.0");
    let vcs = Git2Vcs::discover(temp_dir.path()).unwrap();
    assert!(vcs.status_entries().unwrap().is_empty());
}

#[test]
fn test_untracked_file_dirties_the_tree() {
    let temp_dir = setup_test_repo("1.0.0");
    fs::write(temp_dir.path().join("notes.txt"), "scratch\n").unwrap();

    let vcs = Git2Vcs::discover(temp_dir.path()).unwrap();
    let entries = vcs.status_entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].code, "??");
    assert_eq!(entries[0].path, "notes.txt");
}

#[test]
fn test_modified_file_dirties_the_tree() {
    let temp_dir = setup_test_repo("1.0.0");
    fs::write(
        temp_dir.path().join("package.json"),
        "{\n  \"name\": \"widget\",\n  \"version\": \"1.0.1\"\n}\n",
    )
    .unwrap();

    let vcs = Git2Vcs::discover(temp_dir.path()).unwrap();
    let entries = vcs.status_entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].code, " M");
    assert_eq!(entries[0].path, "package.json");
}

#[test]
fn test_stage_commit_and_annotated_tag_round_trip() {
    let temp_dir = setup_test_repo("1.2.3");
    let vcs = Git2Vcs::discover(temp_dir.path()).unwrap();
    let mut manifest = NpmManifest::open(temp_dir.path()).unwrap();

    manifest.set_version(&Version::new(2, 0, 0)).unwrap();
    vcs.stage(&[PathBuf::from("package.json")]).unwrap();
    vcs.commit("chore: bump version to 2.0.0").unwrap();
    vcs.create_annotated_tag("v2.0.0", "Release v2.0.0").unwrap();

    // tree is clean again after the release commit
    assert!(vcs.status_entries().unwrap().is_empty());

    let repo = Repository::open(temp_dir.path()).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message().unwrap(), "chore: bump version to 2.0.0");

    let reference = repo.find_reference("refs/tags/v2.0.0").unwrap();
    let tag = reference.peel_to_tag().expect("tag should be annotated");
    assert_eq!(tag.message().unwrap(), "Release v2.0.0");
    assert_eq!(tag.target_id(), head.id());

    // the manifest on disk matches the released version
    assert_eq!(manifest.version().unwrap(), Version::new(2, 0, 0));
}

#[test]
fn test_detached_head_is_a_branch_error() {
    let temp_dir = setup_test_repo("1.0.0");

    let repo = Repository::open(temp_dir.path()).unwrap();
    let head_oid = repo.head().unwrap().peel_to_commit().unwrap().id();
    repo.set_head_detached(head_oid).unwrap();

    let vcs = Git2Vcs::discover(temp_dir.path()).unwrap();
    assert!(matches!(
        vcs.current_branch(),
        Err(ReleaseError::Branch(_))
    ));
}

#[test]
fn test_remote_url_lookup() {
    let temp_dir = setup_test_repo("1.0.0");

    let repo = Repository::open(temp_dir.path()).unwrap();
    repo.remote("origin", "git@github.com:acme/widget.git")
        .unwrap();

    let vcs = Git2Vcs::discover(temp_dir.path()).unwrap();
    assert_eq!(
        vcs.remote_url("origin").unwrap(),
        "git@github.com:acme/widget.git"
    );
    assert!(matches!(
        vcs.remote_url("upstream"),
        Err(ReleaseError::Remote(_))
    ));
}

#[test]
#[serial]
fn test_discover_from_current_directory() {
    let temp_dir = setup_test_repo("1.0.0");
    let original_dir = env::current_dir().unwrap();

    env::set_current_dir(temp_dir.path()).expect("Could not change to temp dir");

    let vcs = Git2Vcs::discover(Path::new("."));
    assert!(
        vcs.is_ok(),
        "Git2Vcs::discover should succeed in a git directory"
    );

    env::set_current_dir(original_dir).unwrap();
}
