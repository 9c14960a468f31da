//! # Git Runner
//!
//! Runs the git executable with an argument list and turns its exit status
//! into a [`CommandError`]. Process execution sits behind [`GitExecutor`] so
//! workflows can be driven by a scripted executor in tests.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, trace};

use crate::consts;
use crate::error::CommandError;
use crate::output::print_git_invocation;

/// Exit status and captured streams of one finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
  /// Exit code, `None` when the process was terminated by a signal.
  pub status: Option<i32>,
  pub stdout: Vec<u8>,
  pub stderr: Vec<u8>,
}

impl ProcessOutput {
  /// Successful output with the given stdout text.
  pub fn ok(stdout: &str) -> Self {
    Self {
      status: Some(0),
      stdout: stdout.as_bytes().to_vec(),
      stderr: Vec::new(),
    }
  }

  /// Failed output with the given exit code and stderr text.
  pub fn failed(code: i32, stderr: &str) -> Self {
    Self {
      status: Some(code),
      stdout: Vec::new(),
      stderr: stderr.as_bytes().to_vec(),
    }
  }

  pub const fn success(&self) -> bool {
    matches!(self.status, Some(0))
  }
}

/// Synchronously runs git with the given arguments.
pub trait GitExecutor {
  /// Name of the executable, used in messages.
  fn program(&self) -> &str;

  /// Run git and wait for it to exit.
  fn execute(&self, args: &[&str]) -> io::Result<ProcessOutput>;
}

/// Executes the real git binary via [`std::process::Command`].
#[derive(Debug, Clone)]
pub struct SystemGit {
  program: String,
  work_dir: Option<PathBuf>,
}

impl SystemGit {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      work_dir: None,
    }
  }

  /// Run every command inside `dir` instead of the current directory.
  pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.work_dir = Some(dir.into());
    self
  }

  pub fn work_dir(&self) -> Option<&Path> {
    self.work_dir.as_deref()
  }
}

impl Default for SystemGit {
  fn default() -> Self {
    Self::new(consts::GIT_EXECUTABLE)
  }
}

impl GitExecutor for SystemGit {
  fn program(&self) -> &str {
    &self.program
  }

  fn execute(&self, args: &[&str]) -> io::Result<ProcessOutput> {
    let mut command = Command::new(&self.program);
    command.args(args);
    if let Some(dir) = &self.work_dir {
      command.current_dir(dir);
    }

    let output = command.output()?;
    Ok(ProcessOutput {
      status: output.status.code(),
      stdout: output.stdout,
      stderr: output.stderr,
    })
  }
}

/// Front door for every git call a workflow makes.
///
/// `verbose` echoes the command line and its output to the console. Queries
/// go through [`GitRunner::query`] and follow the session's verbosity, while
/// history-rewriting steps use [`GitRunner::loud`] so the user always sees
/// them.
#[derive(Debug, Clone)]
pub struct GitRunner<E = SystemGit> {
  executor: E,
  verbose: bool,
}

impl<E: GitExecutor> GitRunner<E> {
  pub const fn new(executor: E, verbose: bool) -> Self {
    Self { executor, verbose }
  }

  pub const fn executor(&self) -> &E {
    &self.executor
  }

  /// Run git with `args`, returning trimmed stdout.
  #[allow(clippy::print_stdout)]
  pub fn run(&self, args: &[&str], verbose: bool) -> Result<String, CommandError> {
    if args.is_empty() {
      return Err(CommandError::EmptyArgs);
    }

    let command_line = format!("{} {}", self.executor.program(), args.join(" "));
    debug!(command = %command_line, "running git");
    if verbose {
      print_git_invocation(self.executor.program(), args);
    }

    let output = self.executor.execute(args).map_err(|source| CommandError::Spawn {
      program: self.executor.program().to_string(),
      source,
    })?;

    if !output.success() {
      let stderr = String::from_utf8_lossy(&output.stderr).to_string();
      debug!(command = %command_line, code = ?output.status, "git failed");
      return Err(CommandError::Exited {
        command: command_line,
        code: output.status,
        stderr,
      });
    }

    let stdout = String::from_utf8(output.stdout).map_err(|source| CommandError::InvalidOutput {
      command: command_line.clone(),
      source,
    })?;
    let trimmed = stdout.trim();
    trace!(command = %command_line, stdout = %trimmed);

    if verbose && !trimmed.is_empty() {
      println!("{trimmed}");
    }

    Ok(trimmed.to_string())
  }

  /// Run a read-only query at the session's verbosity.
  pub fn query(&self, args: &[&str]) -> Result<String, CommandError> {
    self.run(args, self.verbose)
  }

  /// Run a step that changes the repository, always echoed.
  pub fn loud(&self, args: &[&str]) -> Result<String, CommandError> {
    self.run(args, true)
  }
}

#[cfg(test)]
mod tests {
  use std::cell::RefCell;

  use super::*;

  struct FixedGit {
    reply: ProcessOutput,
    seen: RefCell<Vec<Vec<String>>>,
  }

  impl FixedGit {
    fn new(reply: ProcessOutput) -> Self {
      Self {
        reply,
        seen: RefCell::new(Vec::new()),
      }
    }
  }

  impl GitExecutor for FixedGit {
    fn program(&self) -> &str {
      "git"
    }

    fn execute(&self, args: &[&str]) -> io::Result<ProcessOutput> {
      self
        .seen
        .borrow_mut()
        .push(args.iter().map(|arg| arg.to_string()).collect());
      Ok(self.reply.clone())
    }
  }

  struct BrokenGit;

  impl GitExecutor for BrokenGit {
    fn program(&self) -> &str {
      "definitely-not-git"
    }

    fn execute(&self, _args: &[&str]) -> io::Result<ProcessOutput> {
      Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
  }

  #[test]
  fn test_run_trims_stdout() {
    let runner = GitRunner::new(FixedGit::new(ProcessOutput::ok("  abc123\n\n")), false);
    let out = runner.run(&["rev-parse", "HEAD"], false).unwrap();
    assert_eq!(out, "abc123");
    assert_eq!(
      runner.executor().seen.borrow().as_slice(),
      &[vec!["rev-parse".to_string(), "HEAD".to_string()]]
    );
  }

  #[test]
  fn test_run_reports_exit_code_and_stderr() {
    let runner = GitRunner::new(FixedGit::new(ProcessOutput::failed(128, "fatal: no upstream\n")), false);
    let err = runner.run(&["rev-parse", "@{u}"], false).unwrap_err();

    assert_eq!(err.code(), Some(128));
    assert_eq!(err.stderr(), "fatal: no upstream\n");
    match err {
      CommandError::Exited { command, .. } => assert_eq!(command, "git rev-parse @{u}"),
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn test_run_rejects_empty_args() {
    let runner = GitRunner::new(FixedGit::new(ProcessOutput::ok("")), false);
    assert!(matches!(runner.run(&[], false), Err(CommandError::EmptyArgs)));
    assert!(runner.executor().seen.borrow().is_empty());
  }

  #[test]
  fn test_spawn_failure_names_program() {
    let runner = GitRunner::new(BrokenGit, false);
    let err = runner.query(&["status"]).unwrap_err();
    assert!(matches!(err, CommandError::Spawn { ref program, .. } if program == "definitely-not-git"));
  }

  #[test]
  fn test_invalid_utf8_output_is_an_error() {
    let reply = ProcessOutput {
      status: Some(0),
      stdout: vec![0xff, 0xfe],
      stderr: Vec::new(),
    };
    let runner = GitRunner::new(FixedGit::new(reply), false);
    assert!(matches!(
      runner.query(&["log"]),
      Err(CommandError::InvalidOutput { .. })
    ));
  }

  #[test]
  fn test_system_git_runs_in_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let git = SystemGit::default().in_dir(dir.path());
    assert_eq!(git.work_dir(), Some(dir.path()));
    assert_eq!(git.program(), consts::GIT_EXECUTABLE);
  }
}
