use anyhow::{Context, Result};
use git2::{BranchType, Repository};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

use super::VersionControl;

/// git2-backed [`VersionControl`].
///
/// The repository is opened lazily: until `workdir` is a git repository every
/// query reports "no branch yet" instead of failing.
pub struct GitTracker {
    workdir: PathBuf,
    repo: Mutex<Option<Repository>>,
}

impl GitTracker {
    /// Open the repository containing `project_dir`.
    pub fn new(project_dir: &Path) -> Result<Self> {
        let repo = Repository::discover(project_dir).context("Failed to open git repository")?;
        Ok(Self {
            workdir: project_dir.to_path_buf(),
            repo: Mutex::new(Some(repo)),
        })
    }

    /// Track `project_dir` without requiring a repository to exist yet.
    pub fn lazy(project_dir: &Path) -> Self {
        Self {
            workdir: project_dir.to_path_buf(),
            repo: Mutex::new(None),
        }
    }

    fn with_repo<T>(&self, f: impl FnOnce(&Repository) -> Result<T>) -> Result<T> {
        let mut guard = self.repo.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_none() {
            let repo = Repository::discover(&self.workdir).with_context(|| {
                format!("No git repository at {}", self.workdir.display())
            })?;
            debug!(path = %self.workdir.display(), "opened git repository");
            *guard = Some(repo);
        }
        match guard.as_ref() {
            Some(repo) => f(repo),
            None => anyhow::bail!("No git repository at {}", self.workdir.display()),
        }
    }

    /// Get the HEAD commit if it exists (returns None for unborn branches)
    fn head_commit(repo: &Repository) -> Result<git2::Commit<'_>> {
        repo.head()
            .and_then(|head| head.peel_to_commit())
            .context("HEAD does not point at a commit")
    }
}

impl VersionControl for GitTracker {
    fn current_branch_name(&self) -> Option<String> {
        self.with_repo(|repo| {
            // Read HEAD symbolically so unborn branches still report a name.
            let head = repo.find_reference("HEAD")?;
            Ok(head
                .symbolic_target()
                .and_then(|target| target.strip_prefix("refs/heads/"))
                .map(str::to_string))
        })
        .ok()
        .flatten()
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        self.with_repo(|repo| match repo.find_branch(name, BranchType::Local) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to look up branch {}", name)),
        })
    }

    fn checkout(&self, name: &str) -> Result<()> {
        self.with_repo(|repo| {
            let refname = format!("refs/heads/{}", name);
            let target = repo
                .revparse_single(&refname)
                .with_context(|| format!("Branch {} not found", name))?;
            repo.checkout_tree(&target, Some(git2::build::CheckoutBuilder::new().safe()))
                .with_context(|| format!("Failed to update working tree to {}", name))?;
            repo.set_head(&refname)
                .with_context(|| format!("Failed to move HEAD to {}", name))?;
            info!(branch = name, "checked out branch");
            Ok(())
        })
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.with_repo(|repo| {
            let commit = Self::head_commit(repo)?;
            repo.branch(name, &commit, false)
                .with_context(|| format!("Failed to create branch {}", name))?;
            repo.set_head(&format!("refs/heads/{}", name))
                .with_context(|| format!("Failed to move HEAD to {}", name))?;
            info!(branch = name, "created branch");
            Ok(())
        })
    }
}
