use git2::{Repository, Status, StatusOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{ReleaseError, Result};
use crate::vcs::{StatusEntry, VersionControl};

/// Real [VersionControl] implementation backed by the `git2` crate.
///
/// Discovers the repository containing a directory and exposes the
/// status/stage/commit/tag/push operations the release workflow needs.
pub struct Git2Vcs {
    repo: Mutex<Repository>,
}

impl Git2Vcs {
    /// Discover the repository containing `path` (or one of its parents).
    ///
    /// # Returns
    /// * `Ok(Git2Vcs)` - successfully initialized repository wrapper
    /// * `Err(ReleaseError::NotARepository)` - if no repository is found
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)
            .map_err(|e| ReleaseError::NotARepository(e.message().to_string()))?;
        Ok(Git2Vcs {
            repo: Mutex::new(repo),
        })
    }

    /// Credentials callback shared by the push operations.
    ///
    /// Tries SSH key files under ~/.ssh in order of preference, then the
    /// SSH agent, then whatever default credentials git2 can find.
    fn remote_callbacks() -> git2::RemoteCallbacks<'static> {
        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });
        callbacks
    }

    /// Push a single refspec to a remote, reporting per-reference failures.
    fn push_refspec(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let repo = self.repo.lock().unwrap();
        let mut remote = repo.find_remote(remote_name).map_err(|_| {
            ReleaseError::remote(format!("No remote named '{}' found", remote_name))
        })?;

        let mut callbacks = Self::remote_callbacks();
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                eprintln!(
                    "Warning: Could not update reference {}: {}",
                    refname, status
                );
                Err(git2::Error::from_str(&format!(
                    "Push failed for {}",
                    refname
                )))
            } else {
                Ok(())
            }
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        match remote.push(&[refspec], Some(&mut push_options)) {
            Ok(_) => Ok(()),
            Err(e) => {
                if e.class() == git2::ErrorClass::Net {
                    Err(ReleaseError::remote(format!(
                        "Network error during push: {}",
                        e
                    )))
                } else if e.class() == git2::ErrorClass::Reference {
                    Err(ReleaseError::remote(format!(
                        "Reference error during push: {}",
                        e
                    )))
                } else {
                    Err(ReleaseError::remote(format!(
                        "Failed to push '{}': {}",
                        refspec, e
                    )))
                }
            }
        }
    }
}

/// Two-letter short code for a status (index column, then worktree column).
fn short_code(status: Status) -> String {
    if status.contains(Status::CONFLICTED) {
        return "UU".to_string();
    }
    if status.contains(Status::WT_NEW) && !status.contains(Status::INDEX_NEW) {
        return "??".to_string();
    }

    let index = if status.contains(Status::INDEX_NEW) {
        'A'
    } else if status.contains(Status::INDEX_MODIFIED) {
        'M'
    } else if status.contains(Status::INDEX_DELETED) {
        'D'
    } else if status.contains(Status::INDEX_RENAMED) {
        'R'
    } else if status.contains(Status::INDEX_TYPECHANGE) {
        'T'
    } else {
        ' '
    };

    let worktree = if status.contains(Status::WT_MODIFIED) {
        'M'
    } else if status.contains(Status::WT_DELETED) {
        'D'
    } else if status.contains(Status::WT_RENAMED) {
        'R'
    } else if status.contains(Status::WT_TYPECHANGE) {
        'T'
    } else {
        ' '
    };

    format!("{}{}", index, worktree)
}

impl VersionControl for Git2Vcs {
    fn status_entries(&self) -> Result<Vec<StatusEntry>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true).recurse_untracked_dirs(true);

        let repo = self.repo.lock().unwrap();
        let statuses = repo.statuses(Some(&mut opts))?;
        let mut entries = Vec::new();

        for entry in statuses.iter() {
            let status = entry.status();
            if status.contains(Status::IGNORED) {
                continue;
            }
            entries.push(StatusEntry::new(
                short_code(status),
                entry.path().unwrap_or("<non-utf8 path>"),
            ));
        }

        Ok(entries)
    }

    fn current_branch(&self) -> Result<String> {
        let repo = self.repo.lock().unwrap();
        let head = repo.head()?;
        if !head.is_branch() {
            return Err(ReleaseError::branch(
                "HEAD is detached; check out a branch before releasing",
            ));
        }
        head.shorthand()
            .map(|name| name.to_string())
            .ok_or_else(|| ReleaseError::branch("HEAD reference has a non-UTF-8 name"))
    }

    fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        let repo = self.repo.lock().unwrap();
        let mut index = repo.index()?;
        for path in paths {
            index.add_path(path)?;
        }
        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let repo = self.repo.lock().unwrap();
        let mut index = repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;

        let signature = repo.signature()?;
        let parent = repo.head()?.peel_to_commit()?;

        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let repo = self.repo.lock().unwrap();
        let head = repo.head()?.peel_to_commit()?;
        let signature = repo.signature()?;
        repo.tag(name, head.as_object(), &signature, message, false)?;
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.push_refspec(remote, &format!("refs/heads/{}", branch))
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.push_refspec(remote, &format!("refs/tags/{}", tag))
    }

    fn remote_url(&self, remote: &str) -> Result<String> {
        let repo = self.repo.lock().unwrap();
        let remote = repo
            .find_remote(remote)
            .map_err(|_| ReleaseError::remote(format!("No remote named '{}' found", remote)))?;
        remote
            .url()
            .map(|url| url.to_string())
            .ok_or_else(|| ReleaseError::remote("Remote URL is not valid UTF-8"))
    }
}
