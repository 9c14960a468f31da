//! # Commit Branch Command

use anyhow::Result;
use clap::Args;
use git_ext_core::output::{format_branch, print_success};
use git_ext_core::workflow::Session;
use git_ext_core::workflow::commit::commit_branch;

/// Arguments for the commit-br command
#[derive(Args)]
pub struct CommitBranchArgs {
  /// Name of the new branch that takes over the tip commit
  #[arg(value_name = "NAME")]
  pub name: String,
}

pub(crate) fn handle_commit_branch_command(session: &Session, args: CommitBranchArgs) -> Result<()> {
  commit_branch(session, &args.name)?;
  print_success(&format!("Moved the tip commit to {}", format_branch(&args.name)));
  Ok(())
}
