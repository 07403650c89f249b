use crate::error::{Result, TagBumpError};
use git2::{Cred, CredentialType, ErrorCode, PushOptions, RemoteCallbacks, Repository as Git2Repo};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository at or above `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            TagBumpError::repository(format!("Not a git repository '{}': {}", path.display(), e))
        })?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn list_tag_names(&self) -> Result<Vec<String>> {
        let tags = self
            .repo
            .tag_names(None)
            .map_err(|e| TagBumpError::repository(format!("Cannot list tags: {}", e)))?;

        let names: Vec<String> = tags.iter().flatten().map(|s| s.to_string()).collect();
        debug!(count = names.len(), "listed repository tags");
        Ok(names)
    }

    fn current_branch_name(&self) -> Result<String> {
        let head = self.repo.head().map_err(|e| match e.code() {
            ErrorCode::UnbornBranch => {
                TagBumpError::repository("HEAD points to a branch without commits")
            }
            _ => TagBumpError::repository(format!("Cannot read HEAD: {}", e)),
        })?;

        if !head.is_branch() {
            return Err(TagBumpError::repository(
                "HEAD is detached; pass a branch name explicitly",
            ));
        }

        head.shorthand()
            .map(|name| name.to_string())
            .ok_or_else(|| TagBumpError::repository("Branch name is not valid UTF-8"))
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .map_err(|e| TagBumpError::tag(format!("Cannot resolve HEAD commit: {}", e)))?;

        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .map_err(|e| TagBumpError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        debug!(tag = name, commit = %head.id(), "created lightweight tag");
        Ok(())
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|_| TagBumpError::remote(format!("No remote named '{}' found", remote)))?;

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(CredentialType::SSH_KEY) {
                for key_path in ssh_key_candidates() {
                    if key_path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &key_path, None) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }

            Cred::default()
        });

        // A rejected ref update is reported here rather than as a push error
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{}:refs/tags/{}", name, name);
        remote_handle
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    TagBumpError::remote(format!("Network error during push: {}", e))
                }
                _ => TagBumpError::remote(format!("Failed to push tag '{}': {}", name, e)),
            })?;

        debug!(tag = name, remote, "pushed tag");
        Ok(())
    }
}

/// SSH private keys tried in order of preference
fn ssh_key_candidates() -> Vec<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };

    ["id_ed25519", "id_rsa", "id_ecdsa"]
        .iter()
        .map(|key| home.join(".ssh").join(key))
        .collect()
}
