//! A [`GitExecutor`] that answers from a script instead of running git.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use git_ext_core::{GitExecutor, GitExtConfig, GitRunner, ProcessOutput, Session};

/// Replies to git invocations by exact argument match and records every call.
///
/// Replies registered for the same arguments are handed out in order, and the
/// last one repeats. Unscripted calls succeed with empty output.
#[derive(Default)]
pub struct ScriptedGit {
  replies: RefCell<Vec<(String, VecDeque<ProcessOutput>)>>,
  calls: RefCell<Vec<String>>,
}

impl ScriptedGit {
  pub fn new() -> Self {
    Self::default()
  }

  /// Answer `args` with `output`.
  pub fn reply(self, args: &str, output: ProcessOutput) -> Self {
    {
      let mut replies = self.replies.borrow_mut();
      match replies.iter_mut().find(|(key, _)| key == args) {
        Some((_, queue)) => queue.push_back(output),
        None => replies.push((args.to_string(), VecDeque::from([output]))),
      }
    }
    self
  }

  /// Answer `args` successfully with `stdout`.
  pub fn ok(self, args: &str, stdout: &str) -> Self {
    self.reply(args, ProcessOutput::ok(stdout))
  }

  /// Answer `args` with a failure.
  pub fn fail(self, args: &str, code: i32, stderr: &str) -> Self {
    self.reply(args, ProcessOutput::failed(code, stderr))
  }

  /// Every invocation so far, arguments joined with single spaces.
  pub fn calls(&self) -> Vec<String> {
    self.calls.borrow().clone()
  }

  /// Wrap in a quiet [`Session`] with default configuration.
  pub fn into_session(self) -> Session<ScriptedGit> {
    Session::new(GitRunner::new(self, false), GitExtConfig::default())
  }
}

impl GitExecutor for ScriptedGit {
  fn program(&self) -> &str {
    "git"
  }

  fn execute(&self, args: &[&str]) -> io::Result<ProcessOutput> {
    let key = args.join(" ");
    self.calls.borrow_mut().push(key.clone());

    let mut replies = self.replies.borrow_mut();
    let reply = match replies.iter_mut().find(|(k, _)| *k == key) {
      Some((_, queue)) if queue.len() > 1 => queue.pop_front(),
      Some((_, queue)) => queue.front().cloned(),
      None => None,
    };
    Ok(reply.unwrap_or_else(|| ProcessOutput::ok("")))
  }
}
