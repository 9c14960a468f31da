//! # Workflows
//!
//! The multi-step git sequences behind each subcommand. Every workflow runs
//! against a [`Session`] so it can be exercised with a scripted executor.

use anyhow::Result;
use tracing::debug;

use crate::config::GitExtConfig;
use crate::error::WorkflowError;
use crate::runner::{GitExecutor, GitRunner, SystemGit};

pub mod commit;
pub mod purge;
pub mod remote;
pub mod tree;
pub mod upstream;

/// A git runner plus the user's configuration.
#[derive(Debug, Clone)]
pub struct Session<E = SystemGit> {
  pub git: GitRunner<E>,
  pub config: GitExtConfig,
}

impl<E: GitExecutor> Session<E> {
  pub const fn new(git: GitRunner<E>, config: GitExtConfig) -> Self {
    Self { git, config }
  }
}

/// Full hash of the HEAD commit.
pub fn last_hash<E: GitExecutor>(session: &Session<E>) -> Result<String> {
  Ok(session.git.query(&["log", "-n", "1", "--pretty=format:%H"])?)
}

/// Upstream of the checked-out branch, e.g. `origin/main`.
pub fn upstream_of_head<E: GitExecutor>(session: &Session<E>) -> Result<String> {
  Ok(
    session
      .git
      .query(&["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"])?,
  )
}

/// Name of the checked-out branch.
pub fn current_branch<E: GitExecutor>(session: &Session<E>) -> Result<String> {
  Ok(session.git.query(&["rev-parse", "--abbrev-ref", "HEAD"])?)
}

/// Fail unless the working tree has no staged, unstaged or untracked changes.
pub fn ensure_clean<E: GitExecutor>(session: &Session<E>) -> Result<()> {
  let status = session.git.run(&["status", "--porcelain"], false)?;
  if !status.is_empty() {
    return Err(WorkflowError::DirtyWorkingTree { status }.into());
  }
  Ok(())
}

/// Bring submodules in line with the new HEAD.
pub fn update_submodules<E: GitExecutor>(session: &Session<E>, verbose: bool) -> Result<()> {
  if !session.config.update_submodules {
    debug!("submodule update disabled by config");
    return Ok(());
  }
  session.git.run(&["submodule", "init"], verbose)?;
  session.git.run(&["submodule", "update", "--recursive"], verbose)?;
  Ok(())
}

/// Check out `branch` and update submodules.
pub fn checkout<E: GitExecutor>(session: &Session<E>, branch: &str, verbose: bool) -> Result<()> {
  session.git.run(&["checkout", branch], verbose)?;
  update_submodules(session, verbose)
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;
  use std::collections::VecDeque;
  use std::io;

  use super::*;
  use crate::runner::ProcessOutput;

  struct Replies(RefCell<VecDeque<ProcessOutput>>);

  impl GitExecutor for Replies {
    fn program(&self) -> &str {
      "git"
    }

    fn execute(&self, _args: &[&str]) -> io::Result<ProcessOutput> {
      Ok(self.0.borrow_mut().pop_front().unwrap_or_default())
    }
  }

  fn session(replies: Vec<ProcessOutput>) -> Session<Replies> {
    Session::new(
      GitRunner::new(Replies(RefCell::new(replies.into())), false),
      GitExtConfig::default(),
    )
  }

  #[test]
  fn test_ensure_clean_accepts_empty_status() {
    assert!(ensure_clean(&session(vec![ProcessOutput::ok("")])).is_ok());
  }

  #[test]
  fn test_ensure_clean_rejects_changes() {
    let err = ensure_clean(&session(vec![ProcessOutput::ok(" M src/lib.rs\n?? notes.txt\n")])).unwrap_err();
    match err.downcast_ref::<WorkflowError>() {
      Some(WorkflowError::DirtyWorkingTree { status }) => assert!(status.contains("notes.txt")),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn test_submodules_skipped_when_disabled() {
    let mut s = session(vec![]);
    s.config.update_submodules = false;
    assert!(update_submodules(&s, false).is_ok());
  }
}
