//! Deleting local branches whose remote counterparts are gone.

use anyhow::{Context, Result};
use regex::Regex;
use tracing::{info, warn};

use super::Session;
use crate::error::PurgeError;
use crate::runner::GitExecutor;

/// Local branch names under `prefix` that `git remote prune` would drop
/// remote-tracking refs for.
pub fn find_purgeable<E: GitExecutor>(session: &Session<E>, prefix: &str) -> Result<Vec<String>> {
  let remote = &session.config.remote;
  let pattern = format!(r"{}/{}/(\S+)", regex::escape(remote), regex::escape(prefix));
  let re = Regex::new(&pattern).with_context(|| format!("Invalid purge prefix: {prefix}"))?;

  let listing = session.git.query(&["remote", "prune", remote, "-n"])?;
  Ok(stale_branches(&listing, &re, prefix))
}

fn stale_branches(listing: &str, re: &Regex, prefix: &str) -> Vec<String> {
  let mut branches: Vec<String> = Vec::new();
  for caps in listing.lines().filter_map(|line| re.captures(line.trim())) {
    let name = format!("{prefix}/{}", &caps[1]);
    if !branches.contains(&name) {
      branches.push(name);
    }
  }
  branches
}

/// Force-delete every branch, then prune the remote-tracking refs.
///
/// All deletions are attempted. If any of them fails the prune is skipped
/// and a [`PurgeError`] lists each failure.
pub fn purge_branches<E: GitExecutor>(session: &Session<E>, branches: &[String]) -> Result<()> {
  let mut failures = Vec::new();
  for branch in branches {
    match session.git.loud(&["branch", "-D", branch]) {
      Ok(_) => info!(%branch, "deleted"),
      Err(err) => {
        warn!(%branch, error = %err, "could not delete branch");
        failures.push((branch.clone(), err));
      }
    }
  }

  if !failures.is_empty() {
    return Err(PurgeError { failures }.into());
  }

  session.git.loud(&["remote", "prune", &session.config.remote])?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn origin_re(prefix: &str) -> Regex {
    Regex::new(&format!(r"origin/{}/(\S+)", regex::escape(prefix))).unwrap()
  }

  #[test]
  fn test_stale_branches_from_dry_run() {
    let listing = "Pruning origin\nURL: git@example.com:repo.git\n * [would prune] origin/jdoe/fix-login\n * [would prune] origin/jdoe/ci_tweaks\n * [would prune] origin/other/thing";
    assert_eq!(
      stale_branches(listing, &origin_re("jdoe"), "jdoe"),
      vec!["jdoe/fix-login".to_string(), "jdoe/ci_tweaks".to_string()]
    );
  }

  #[test]
  fn test_stale_branches_keeps_nested_names() {
    let listing = " * [would prune] origin/me/area/topic";
    assert_eq!(stale_branches(listing, &origin_re("me"), "me"), vec!["me/area/topic".to_string()]);
  }

  #[test]
  fn test_prefix_is_matched_literally() {
    let listing = " * [would prune] origin/a.b/x\n * [would prune] origin/axb/y";
    assert_eq!(stale_branches(listing, &origin_re("a.b"), "a.b"), vec!["a.b/x".to_string()]);
  }

  #[test]
  fn test_nothing_to_prune() {
    assert!(stale_branches("", &origin_re("me"), "me").is_empty());
  }
}
