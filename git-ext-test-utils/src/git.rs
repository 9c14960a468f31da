//! Git repository management for testing
//!
//! Builds temporary repositories with git2 so tests can point the real git
//! executable at them.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use git2::{BranchType, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

/// A temporary git repository whose first branch is `main`.
///
/// The directory is removed when the guard is dropped.
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
}

impl GitRepoTestGuard {
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let temp_path = temp_dir.path();

    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(temp_path, &opts).expect("Failed to initialize git repository");

    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "git-ext Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "git-ext-test@example.com")
      .expect("Failed to set user.email");
    config
      .set_bool("commit.gpgsign", false)
      .expect("Failed to disable commit signing");

    assert!(
      temp_path.join(".git").exists(),
      "Git repository was not properly initialized"
    );

    Self { temp_dir, repo }
  }

  /// Get the path to the git repository
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

/// Write `file_name` and commit it on top of HEAD
pub fn create_commit(repo: &Repository, file_name: &str, content: &str, message: &str) -> Result<()> {
  let repo_path = repo.workdir().context("Repository has no working directory")?;
  fs::write(repo_path.join(file_name), content)?;

  let mut index = repo.index()?;
  index.add_path(Path::new(file_name))?;
  index.write()?;

  let tree_id = index.write_tree()?;
  let tree = repo.find_tree(tree_id)?;
  let signature = Signature::now("Test User", "test@example.com")?;

  match repo.head().ok().and_then(|head| head.peel_to_commit().ok()) {
    Some(parent) => repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?,
    None => repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[])?,
  };

  Ok(())
}

/// Create a local branch at `start_point`, or at HEAD when `None`
pub fn create_branch(repo: &Repository, branch_name: &str, start_point: Option<&str>) -> Result<()> {
  let head = if let Some(start) = start_point {
    repo
      .find_branch(start, BranchType::Local)?
      .into_reference()
      .peel_to_commit()?
  } else {
    repo.head()?.peel_to_commit()?
  };

  repo.branch(branch_name, &head, false)?;
  Ok(())
}

/// Check out a local branch
pub fn checkout_branch(repo: &Repository, branch_name: &str) -> Result<()> {
  let obj = repo
    .revparse_single(&format!("refs/heads/{branch_name}"))?
    .peel_to_commit()?;

  repo.checkout_tree(&obj.into_object(), None)?;
  repo.set_head(&format!("refs/heads/{branch_name}"))?;

  Ok(())
}

/// Make the local branch `branch_name` track the local branch `upstream`
pub fn set_upstream(repo: &Repository, branch_name: &str, upstream: &str) -> Result<()> {
  let mut branch = repo.find_branch(branch_name, BranchType::Local)?;
  branch.set_upstream(Some(upstream))?;
  Ok(())
}
