//! # git-ext Core Library
//!
//! Branch stack helpers behind the `git-ext` command: a git runner, the
//! `git branch -vv` parser, the upstream graph and its tree rendering, and
//! the history-rewriting workflows.

pub mod branch;
pub mod config;
pub mod consts;
pub mod error;
pub mod output;
pub mod runner;
pub mod workflow;

pub use branch::{BranchDescriptor, BranchGraph, BranchNode, TreeRenderer, parse_branch_entry, parse_branch_listing};
pub use config::{ConfigDirs, GitExtConfig, TreeStyle};
pub use error::{CommandError, CycleError, ParseError, PurgeError, WorkflowError};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
pub use runner::{GitExecutor, GitRunner, ProcessOutput, SystemGit};
pub use workflow::Session;
