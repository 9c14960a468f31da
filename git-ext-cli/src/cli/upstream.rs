//! # Upstream Commands
//!
//! Commands that rebuild a branch, or a stack of branches, on top of the
//! branch it tracks.

use anyhow::Result;
use clap::Args;
use git_ext_core::output::{format_branch, print_success};
use git_ext_core::workflow::Session;
use git_ext_core::workflow::upstream::{fix_current_upstream, fix_upstream, rebase_onto_latest, rec_fix_upstream};

/// Arguments for the up command
#[derive(Args)]
pub struct UpArgs {
  /// Branch to track and rebuild on
  #[arg(value_name = "BRANCH")]
  pub branch: String,
}

/// Arguments for the rec-fix-up command
#[derive(Args)]
pub struct RecFixUpArgs {
  /// Stop walking upstreams at this branch
  #[arg(value_name = "TERMINAL")]
  pub terminal: String,

  /// Force-push every rebuilt branch
  #[arg(long)]
  pub push: bool,
}

/// Arguments for the rebase-onto-latest command
#[derive(Args)]
pub struct RebaseOntoLatestArgs {
  /// Base branch to pull before rebuilding (defaults to the configured base)
  #[arg(value_name = "BRANCH")]
  pub branch: Option<String>,
}

pub(crate) fn handle_fix_up_command(session: &Session) -> Result<()> {
  fix_current_upstream(session)?;
  print_success("Rebuilt the current branch on its upstream");
  Ok(())
}

pub(crate) fn handle_up_command(session: &Session, args: UpArgs) -> Result<()> {
  fix_upstream(session, &args.branch)?;
  print_success(&format!("Now tracking {}", format_branch(&args.branch)));
  Ok(())
}

pub(crate) fn handle_rec_fix_up_command(session: &Session, args: RecFixUpArgs) -> Result<()> {
  let fixed = rec_fix_upstream(session, &args.terminal, args.push)?;
  if fixed.is_empty() {
    print_success(&format!("Already on {}", format_branch(&args.terminal)));
  } else {
    print_success(&format!(
      "Rebuilt {} branch(es) down from {}",
      fixed.len(),
      format_branch(&args.terminal)
    ));
  }
  Ok(())
}

pub(crate) fn handle_rebase_onto_latest_command(session: &Session, args: RebaseOntoLatestArgs) -> Result<()> {
  rebase_onto_latest(session, args.branch.as_deref())
}
