//! Splitting the tip commit off into its own branch.

use anyhow::Result;
use tracing::info;

use super::{Session, current_branch, ensure_clean, update_submodules};
use crate::error::WorkflowError;
use crate::runner::GitExecutor;

/// Move HEAD's commit onto a new branch `name` stacked on the current one.
///
/// The current branch is reset to `HEAD~1`, `name` keeps the commit and is
/// left checked out, tracking the branch it was split from.
pub fn commit_branch<E: GitExecutor>(session: &Session<E>, name: &str) -> Result<()> {
  if name.trim().is_empty() {
    return Err(WorkflowError::EmptyBranchName.into());
  }
  ensure_clean(session)?;

  session.git.loud(&["branch", name])?;
  session.git.loud(&["reset", "--hard", "HEAD~1"])?;
  let parent = current_branch(session)?;
  info!(branch = %name, %parent, "split tip commit into new branch");

  session.git.loud(&["checkout", name])?;
  session.git.loud(&["branch", "--set-upstream-to", &parent])?;
  update_submodules(session, true)
}
