//! # Error Types
//!
//! Typed failures raised by the git runner, the branch listing parser, the
//! branch graph and the workflows. Command handlers wrap these in
//! [`anyhow::Error`] with extra context.

use std::fmt;
use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// A git invocation that did not complete successfully.
#[derive(Debug, Error)]
pub enum CommandError {
  /// Callers must always pass at least one argument.
  #[error("refusing to run git without arguments")]
  EmptyArgs,
  /// The executable could not be started at all.
  #[error("failed to run `{program}`")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },
  /// git ran and exited with a non-zero status.
  #[error("`{command}` exited with {}: {}", describe_code(.code), .stderr.trim())]
  Exited {
    command: String,
    code: Option<i32>,
    stderr: String,
  },
  /// git printed something that is not UTF-8 on stdout.
  #[error("`{command}` produced output that is not valid UTF-8")]
  InvalidOutput {
    command: String,
    #[source]
    source: FromUtf8Error,
  },
}

impl CommandError {
  /// Exit code of the failed process, if it exited normally.
  pub const fn code(&self) -> Option<i32> {
    match self {
      CommandError::Exited { code, .. } => *code,
      _ => None,
    }
  }

  /// Captured standard error, empty for failures that never ran git.
  pub fn stderr(&self) -> &str {
    match self {
      CommandError::Exited { stderr, .. } => stderr,
      _ => "",
    }
  }
}

fn describe_code(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("status {code}"),
    None => "no status (terminated by signal)".to_string(),
  }
}

/// Why a branch listing line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
  /// Fewer than name, sha and remainder.
  MissingFields,
  /// The remainder did not match `[upstream: status] message`.
  UnparseableRemainder,
}

impl fmt::Display for ParseFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParseFailure::MissingFields => write!(f, "expected a name, a hash and a commit message"),
      ParseFailure::UnparseableRemainder => write!(f, "could not read the upstream and commit message"),
    }
  }
}

/// A line of `git branch -vv` output that did not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to parse branch line `{line}` ({reason})")]
pub struct ParseError {
  pub line: String,
  pub reason: ParseFailure,
}

impl ParseError {
  pub fn new(line: &str, reason: ParseFailure) -> Self {
    Self {
      line: line.to_string(),
      reason,
    }
  }
}

/// The upstream relation loops back on itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("branch upstreams form a cycle: {}", .path.join(" -> "))]
pub struct CycleError {
  /// Branch names in traversal order; the last entry repeats an earlier one.
  pub path: Vec<String>,
}

/// Every local branch deletion that failed during a purge.
#[derive(Debug, Error)]
#[error("failed to delete {} branch(es): {}", .failures.len(), join_names(.failures))]
pub struct PurgeError {
  pub failures: Vec<(String, CommandError)>,
}

impl PurgeError {
  pub fn branch_names(&self) -> Vec<&str> {
    self.failures.iter().map(|(name, _)| name.as_str()).collect()
  }
}

fn join_names(failures: &[(String, CommandError)]) -> String {
  failures
    .iter()
    .map(|(name, _)| name.as_str())
    .collect::<Vec<_>>()
    .join(", ")
}

/// Preconditions a workflow checks before rewriting history.
#[derive(Debug, Error)]
pub enum WorkflowError {
  #[error("working tree has uncommitted changes:\n{status}")]
  DirtyWorkingTree { status: String },
  #[error("branch name must not be empty")]
  EmptyBranchName,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_exited_error_reports_code_and_stderr() {
    let err = CommandError::Exited {
      command: "git checkout nope".to_string(),
      code: Some(1),
      stderr: "error: pathspec 'nope' did not match\n".to_string(),
    };

    assert_eq!(err.code(), Some(1));
    assert!(err.stderr().contains("pathspec"));
    assert_eq!(
      err.to_string(),
      "`git checkout nope` exited with status 1: error: pathspec 'nope' did not match"
    );
  }

  #[test]
  fn test_signal_exit_has_no_code() {
    let err = CommandError::Exited {
      command: "git log".to_string(),
      code: None,
      stderr: String::new(),
    };

    assert_eq!(err.code(), None);
    assert!(err.to_string().contains("terminated by signal"));
  }

  #[test]
  fn test_cycle_error_lists_path() {
    let err = CycleError {
      path: vec!["a".into(), "b".into(), "a".into()],
    };
    assert_eq!(err.to_string(), "branch upstreams form a cycle: a -> b -> a");
  }

  #[test]
  fn test_purge_error_names_every_branch() {
    let err = PurgeError {
      failures: vec![
        ("feat/one".to_string(), CommandError::EmptyArgs),
        ("feat/two".to_string(), CommandError::EmptyArgs),
      ],
    };
    assert_eq!(err.branch_names(), vec!["feat/one", "feat/two"]);
    assert_eq!(err.to_string(), "failed to delete 2 branch(es): feat/one, feat/two");
  }
}
