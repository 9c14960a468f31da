//! Re-applying the tip commit of a branch onto its upstream, for one branch
//! or a whole stack.

use std::collections::HashSet;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use super::remote::push_origin;
use super::{Session, checkout, current_branch, ensure_clean, last_hash, update_submodules, upstream_of_head};
use crate::error::CycleError;
use crate::runner::GitExecutor;

/// Make the checked-out branch track `target` and consist of `target` plus
/// the branch's latest commit.
///
/// The tip commit is cherry-picked on top of a hard reset to `target`, so
/// only single-commit branches survive intact.
pub fn fix_upstream<E: GitExecutor>(session: &Session<E>, target: &str) -> Result<()> {
  let commit = last_hash(session)?;
  info!(%target, %commit, "moving tip commit onto upstream");

  ensure_clean(session)?;
  session.git.loud(&["branch", "--set-upstream-to", target])?;
  session.git.loud(&["reset", "--hard", target, "--"])?;
  update_submodules(session, true)?;
  session
    .git
    .loud(&["cherry-pick", &commit])
    .with_context(|| format!("Failed to re-apply {commit} onto {target}"))?;
  update_submodules(session, true)
}

/// [`fix_upstream`] onto the branch's current upstream.
pub fn fix_current_upstream<E: GitExecutor>(session: &Session<E>) -> Result<()> {
  let upstream = upstream_of_head(session).context("The current branch has no upstream to fix onto")?;
  fix_upstream(session, &upstream)
}

/// Walk up the stack from the checked-out branch until `terminal` is
/// reached, then fix every branch on the way back down.
///
/// Returns the branches that were rewritten, nearest to `terminal` first.
pub fn rec_fix_upstream<E: GitExecutor>(session: &Session<E>, terminal: &str, push: bool) -> Result<Vec<String>> {
  let remote_marker = session.config.remote_marker();
  let mut stack: Vec<String> = Vec::new();
  let mut seen: HashSet<String> = HashSet::new();

  loop {
    let branch = current_branch(session)?;
    if branch == terminal {
      break;
    }
    if branch == "HEAD" {
      bail!("HEAD is detached; cannot walk upstreams towards {terminal}");
    }
    if !seen.insert(branch.clone()) {
      let mut path: Vec<String> = stack.iter().rev().cloned().collect();
      path.push(branch);
      return Err(CycleError { path }.into());
    }

    let upstream = upstream_of_head(session).with_context(|| format!("{branch} has no upstream"))?;
    if upstream.starts_with(&remote_marker) {
      bail!("reached remote branch {upstream} from {branch} without finding {terminal}");
    }

    debug!(%branch, %upstream, "walking up");
    checkout(session, &upstream, false)?;
    stack.insert(0, branch);
  }

  for branch in &stack {
    checkout(session, branch, true)?;
    fix_current_upstream(session)?;
    if push {
      push_origin(session)?;
    }
  }

  Ok(stack)
}

/// Fast-forward `base` (default: the configured base branch), then rebuild
/// the checked-out branch on top of it.
pub fn rebase_onto_latest<E: GitExecutor>(session: &Session<E>, base: Option<&str>) -> Result<()> {
  let base = base.unwrap_or(&session.config.default_base);
  let branch = current_branch(session)?;
  info!(%branch, %base, "rebasing onto latest");

  session.git.loud(&["checkout", base])?;
  session.git.loud(&["pull", "--ff-only"])?;
  session.git.loud(&["checkout", &branch])?;
  fix_upstream(session, base)
}
