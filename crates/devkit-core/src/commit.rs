//! Conventional-commit message composition and the commit/retry state machine.

use crate::autofix::AutoFixer;
use crate::config::Config;
use crate::error::{DevkitError, Result};
use crate::git::Git;
use crate::types::{Branch, CommitType};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Input mode
// ---------------------------------------------------------------------------

/// How the type and description are obtained, chosen by argument count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// No arguments: suggest a type, then prompt for type and description.
    Interactive,
    /// One argument: the description; the type comes from the classifier.
    Described(String),
    /// Two arguments: explicit type and description; no classification.
    Explicit(CommitType, String),
}

impl Mode {
    pub fn from_args(args: &[String]) -> Result<Self> {
        match args {
            [] => Ok(Mode::Interactive),
            [description] => Ok(Mode::Described(non_empty_description(description)?)),
            [commit_type, description] => Ok(Mode::Explicit(
                commit_type.trim().parse()?,
                non_empty_description(description)?,
            )),
            _ => Err(DevkitError::Usage(format!(
                "expected at most 2 arguments ([type] [description]), got {}",
                args.len()
            ))),
        }
    }
}

/// Trim a description, rejecting it when nothing is left.
pub fn non_empty_description(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(DevkitError::MissingDescription)
    } else {
        Ok(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// CommitMessage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitMessage {
    pub commit_type: CommitType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub description: String,
}

impl CommitMessage {
    /// Scope is the branch label unless the branch is protected.
    pub fn compose(
        commit_type: CommitType,
        branch: &Branch,
        description: &str,
        config: &Config,
    ) -> Result<Self> {
        let description = non_empty_description(description)?;
        let scope = if config.is_protected(branch) {
            None
        } else {
            Some(branch.label(&config.detached_label).to_string())
        };
        Ok(Self {
            commit_type,
            scope,
            description,
        })
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            Some(scope) => write!(f, "{}({}): {}", self.commit_type, scope, self.description),
            None => write!(f, "{}: {}", self.commit_type, self.description),
        }
    }
}

// ---------------------------------------------------------------------------
// Commit state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitState {
    FirstAttempt,
    Retry,
    Done,
    Failed,
}

/// The side effects the state machine needs.
pub trait CommitBackend {
    /// Attempt the commit; `Ok(false)` means git (or a hook) rejected it.
    fn commit(&mut self, message: &str) -> Result<bool>;

    fn autofix_available(&self) -> bool;

    /// Run the auto-fix tool; its outcome is informational only.
    fn run_autofix(&mut self) -> bool;

    /// Re-stage files the auto-fix tool modified and return them.
    fn restage_fixed(&mut self) -> Result<Vec<String>>;
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitReport {
    pub attempts: u32,
    pub autofix_ran: bool,
    pub restaged: Vec<String>,
    pub state: CommitState,
}

/// Commit once; on rejection, auto-fix (when available), re-stage, and
/// commit exactly once more.
pub fn run_commit<B: CommitBackend>(backend: &mut B, message: &str) -> Result<CommitReport> {
    let mut report = CommitReport {
        attempts: 0,
        autofix_ran: false,
        restaged: Vec::new(),
        state: CommitState::FirstAttempt,
    };

    loop {
        let state = report.state;
        let next = match state {
            CommitState::FirstAttempt => {
                report.attempts += 1;
                if backend.commit(message)? {
                    CommitState::Done
                } else {
                    tracing::info!("commit rejected, retrying once");
                    CommitState::Retry
                }
            }
            CommitState::Retry => {
                if backend.autofix_available() {
                    backend.run_autofix();
                    report.autofix_ran = true;
                    match backend.restage_fixed() {
                        Ok(files) => report.restaged = files,
                        Err(e) => tracing::warn!("could not re-stage fixed files: {e}"),
                    }
                } else {
                    tracing::info!("no auto-fix tool available, retrying commit as-is");
                }
                report.attempts += 1;
                if backend.commit(message)? {
                    CommitState::Done
                } else {
                    CommitState::Failed
                }
            }
            CommitState::Done => return Ok(report),
            CommitState::Failed => return Err(DevkitError::CommitFailed),
        };
        tracing::debug!(from = ?state, to = ?next, "commit state transition");
        report.state = next;
    }
}

// ---------------------------------------------------------------------------
// Git-backed implementation
// ---------------------------------------------------------------------------

/// Fingerprints of the staged files' working-tree copies.
type Fingerprints = HashMap<String, Option<String>>;

pub struct GitCommitBackend<'a> {
    git: &'a Git,
    fixer: Option<AutoFixer>,
    staged: &'a [String],
    /// Taken just before the fixer runs; only files that differ afterwards
    /// are re-staged.
    before_fix: Option<Fingerprints>,
}

impl<'a> GitCommitBackend<'a> {
    pub fn new(git: &'a Git, fixer: Option<AutoFixer>, staged: &'a [String]) -> Self {
        Self {
            git,
            fixer,
            staged,
            before_fix: None,
        }
    }
}

impl CommitBackend for GitCommitBackend<'_> {
    fn commit(&mut self, message: &str) -> Result<bool> {
        self.git.commit(message)
    }

    fn autofix_available(&self) -> bool {
        self.fixer.as_ref().is_some_and(AutoFixer::is_available)
    }

    fn run_autofix(&mut self) -> bool {
        let Some(fixer) = &self.fixer else {
            return false;
        };
        self.before_fix = match self.git.worktree_hashes(self.staged) {
            Ok(hashes) => Some(hashes),
            Err(e) => {
                tracing::warn!("could not fingerprint staged files, nothing will be re-staged: {e}");
                None
            }
        };
        fixer.run(self.git.dir(), self.staged)
    }

    fn restage_fixed(&mut self) -> Result<Vec<String>> {
        let Some(before) = self.before_fix.take() else {
            return Ok(Vec::new());
        };
        let after = self.git.worktree_hashes(self.staged)?;
        let fixed = changed_paths(self.staged, &before, &after);
        self.git.add(&fixed)?;
        Ok(fixed)
    }
}

/// Paths from `staged`, in order, whose fingerprint differs between the two maps.
fn changed_paths(staged: &[String], before: &Fingerprints, after: &Fingerprints) -> Vec<String> {
    staged
        .iter()
        .filter(|path| before.get(*path) != after.get(*path))
        .cloned()
        .collect()
}
