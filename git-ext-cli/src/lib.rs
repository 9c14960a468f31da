//! # git-ext CLI Library
//!
//! Argument parsing and command handlers for the `git-ext` binary. The git
//! work itself lives in `git-ext-core`.

pub mod cli;
pub mod completion;
