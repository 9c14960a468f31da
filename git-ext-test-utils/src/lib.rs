//! Test utilities shared across the git-ext workspace
//!
//! - Throwaway git repositories built with git2 ([`GitRepoTestGuard`])
//! - A scripted [`git_ext_core::GitExecutor`] that records every call
//!   ([`ScriptedGit`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod git;
pub mod scripted;

pub use git::{GitRepoTestGuard, checkout_branch, create_branch, create_commit, set_upstream};
pub use scripted::ScriptedGit;
