//! # Remote Commands
//!
//! Pushing to, resetting from and pruning against the configured remote.

use anyhow::Result;
use clap::Args;
use dialoguer::Confirm;
use git_ext_core::output::{format_branch, format_command, print_info, print_success};
use git_ext_core::workflow::Session;
use git_ext_core::workflow::purge::{find_purgeable, purge_branches};
use git_ext_core::workflow::remote::{add_amend_push_origin, push_origin, reset_hard_origin};

/// Arguments for the purge command
#[derive(Args)]
pub struct PurgeArgs {
  /// Only branches named `<PREFIX>/...` are considered
  #[arg(value_name = "PREFIX")]
  pub prefix: String,

  /// Delete without asking for confirmation
  #[arg(short = 'y', long = "yes")]
  pub yes: bool,
}

pub(crate) fn handle_push_origin_command(session: &Session) -> Result<()> {
  push_origin(session)
}

pub(crate) fn handle_add_amend_push_origin_command(session: &Session) -> Result<()> {
  add_amend_push_origin(session)
}

pub(crate) fn handle_reset_hard_origin_command(session: &Session) -> Result<()> {
  reset_hard_origin(session)
}

#[allow(clippy::print_stdout)]
pub(crate) fn handle_purge_command(session: &Session, args: PurgeArgs) -> Result<()> {
  let branches = find_purgeable(session, &args.prefix)?;
  if branches.is_empty() {
    print_info("No branches to purge.");
    return Ok(());
  }

  println!("These branches are gone from {}:", session.config.remote);
  for branch in &branches {
    println!("  {}", format_branch(branch));
  }

  if !args.yes {
    let confirmed = Confirm::new()
      .with_prompt("Delete them?")
      .default(false)
      .interact()?;
    if !confirmed {
      print_info(&format!(
        "Cancelled. Rerun with {} to skip this prompt.",
        format_command("--yes")
      ));
      return Ok(());
    }
  }

  purge_branches(session, &branches)?;
  print_success(&format!("Purged {} branch(es)", branches.len()));
  Ok(())
}
