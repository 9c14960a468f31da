//! Loading the local branch graph from git.

use anyhow::{Context, Result};
use tracing::debug;

use super::Session;
use crate::branch::{BranchGraph, parse_branch_listing};
use crate::runner::GitExecutor;

/// Parse `git branch -vv` into a graph, rejecting upstream cycles.
pub fn load_branch_graph<E: GitExecutor>(session: &Session<E>) -> Result<BranchGraph> {
  let listing = session.git.query(&["branch", "-vv", "--no-color"])?;
  let descriptors = parse_branch_listing(&listing).context("Failed to read the branch listing")?;
  debug!(count = descriptors.len(), "parsed branch listing");

  let graph = BranchGraph::build(descriptors);
  graph.check_acyclic()?;
  Ok(graph)
}
