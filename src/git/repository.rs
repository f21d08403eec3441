use crate::error::{BumpError, Result};
use git2::{Repository as Git2Repo, StatusOptions};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo: Mutex::new(repo),
        }
    }

    fn repo(&self) -> MutexGuard<'_, Git2Repo> {
        self.repo.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Express `path` relative to the repository working directory.
fn relative_to_workdir(repo: &Git2Repo, path: &Path) -> Result<PathBuf> {
    if path.is_relative() {
        return Ok(path.to_path_buf());
    }

    let workdir = repo
        .workdir()
        .ok_or_else(|| BumpError::manifest("repository has no working directory"))?;

    let workdir = workdir.canonicalize()?;
    let absolute = path.canonicalize()?;

    absolute
        .strip_prefix(&workdir)
        .map(Path::to_path_buf)
        .map_err(|_| {
            BumpError::manifest(format!(
                "{} is outside the repository at {}",
                path.display(),
                workdir.display()
            ))
        })
}

fn credentials(
    url: &str,
    username_from_url: Option<&str>,
    allowed_types: git2::CredentialType,
) -> std::result::Result<git2::Cred, git2::Error> {
    let username = username_from_url.unwrap_or("git");

    if allowed_types.contains(git2::CredentialType::SSH_KEY) {
        if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
            return Ok(cred);
        }

        if let Some(home) = dirs::home_dir() {
            for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                let path = home.join(".ssh").join(key);
                if path.exists() {
                    if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                        return Ok(cred);
                    }
                }
            }
        }
    }

    if allowed_types.contains(git2::CredentialType::USER_PASS_PLAINTEXT) {
        if let Ok(config) = git2::Config::open_default() {
            if let Ok(cred) = git2::Cred::credential_helper(&config, url, username_from_url) {
                return Ok(cred);
            }
        }
    }

    git2::Cred::default()
}

impl super::Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let repo = self.repo();

        let branch = match repo.head() {
            Ok(head) if head.is_branch() => head.shorthand().unwrap_or("HEAD").to_string(),
            Ok(_) => "HEAD".to_string(),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                // No commits yet: HEAD is a symbolic ref to a branch that doesn't exist
                let head = repo.find_reference("HEAD")?;
                let target = head.symbolic_target().unwrap_or("HEAD");
                target.trim_start_matches("refs/heads/").to_string()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(branch)
    }

    fn status_entries(&self) -> Result<Vec<String>> {
        let repo = self.repo();

        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = repo.statuses(Some(&mut options))?;

        let entries: Vec<String> = statuses
            .iter()
            .filter(|entry| entry.status() != git2::Status::CURRENT)
            .filter_map(|entry| entry.path().map(|p| p.to_string()))
            .collect();

        Ok(entries)
    }

    fn stage(&self, paths: &[PathBuf]) -> Result<()> {
        let repo = self.repo();
        let mut index = repo.index()?;

        for path in paths {
            let relative = relative_to_workdir(&repo, path)?;
            tracing::debug!(path = %relative.display(), "staging");
            index.add_path(&relative)?;
        }

        index.write()?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String> {
        let repo = self.repo();

        let signature = repo.signature()?;
        let mut index = repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = repo.find_tree(tree_id)?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => None,
            Err(e) => return Err(e.into()),
        };
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        tracing::info!(commit = %oid, message, "created release commit");
        Ok(oid.to_string())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let repo = self.repo();

        let head = repo.head()?.peel_to_commit()?;
        let signature = repo.signature()?;

        repo.tag(name, head.as_object(), &signature, message, false)?;

        tracing::info!(tag = name, "created annotated tag");
        Ok(())
    }

    fn push_with_tags(&self, remote: &str, tag: &str) -> Result<()> {
        let branch = self.current_branch()?;
        let repo = self.repo();

        let mut remote_handle = repo
            .find_remote(remote)
            .map_err(|_| BumpError::remote(format!("No remote named '{}' found", remote)))?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(credentials);
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "Push rejected for {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspecs = [
            format!("refs/heads/{0}:refs/heads/{0}", branch),
            format!("refs/tags/{0}:refs/tags/{0}", tag),
        ];

        remote_handle
            .push(&refspecs, Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => BumpError::remote(format!("Network error during push: {}", e)),
                _ => BumpError::remote(format!("Failed to push to '{}': {}", remote, e)),
            })?;

        tracing::info!(remote, branch = %branch, tag, "pushed release");
        Ok(())
    }
}
