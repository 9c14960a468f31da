//! # Query Commands
//!
//! Read-only lookups that print a single value, suitable for scripting.

use anyhow::Result;
use git_ext_core::workflow::{Session, last_hash, upstream_of_head};

#[allow(clippy::print_stdout)]
pub(crate) fn handle_lasthash_command(session: &Session) -> Result<()> {
  println!("{}", last_hash(session)?);
  Ok(())
}

#[allow(clippy::print_stdout)]
pub(crate) fn handle_show_up_command(session: &Session) -> Result<()> {
  println!("{}", upstream_of_head(session)?);
  Ok(())
}
