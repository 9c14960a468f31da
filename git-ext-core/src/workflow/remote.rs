//! Workflows that talk to the configured remote.

use anyhow::Result;
use tracing::info;

use super::{Session, current_branch, ensure_clean};
use crate::runner::GitExecutor;

/// Force-push the checked-out branch to the same name on the remote.
pub fn push_origin<E: GitExecutor>(session: &Session<E>) -> Result<()> {
  let branch = current_branch(session)?;
  let remote = &session.config.remote;
  info!(%branch, %remote, "force pushing");
  session.git.loud(&["push", "-f", remote, &branch])?;
  Ok(())
}

/// Stage everything, fold it into the tip commit and force-push.
pub fn add_amend_push_origin<E: GitExecutor>(session: &Session<E>) -> Result<()> {
  session.git.loud(&["add", "."])?;
  session.git.loud(&["commit", "--amend", "--no-edit"])?;
  push_origin(session)
}

/// Discard local history and match the remote copy of the checked-out
/// branch.
pub fn reset_hard_origin<E: GitExecutor>(session: &Session<E>) -> Result<()> {
  let branch = current_branch(session)?;
  ensure_clean(session)?;

  let remote = &session.config.remote;
  session.git.loud(&["fetch", remote])?;
  session.git.loud(&["reset", "--hard", &format!("{remote}/{branch}")])?;
  Ok(())
}
