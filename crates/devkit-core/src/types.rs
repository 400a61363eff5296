use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// CommitType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitType {
    #[default]
    Feat,
    Fix,
    Refactor,
    Docs,
    Style,
    Test,
    Chore,
}

impl CommitType {
    pub fn all() -> &'static [CommitType] {
        &[
            CommitType::Feat,
            CommitType::Fix,
            CommitType::Refactor,
            CommitType::Docs,
            CommitType::Style,
            CommitType::Test,
            CommitType::Chore,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Refactor => "refactor",
            CommitType::Docs => "docs",
            CommitType::Style => "style",
            CommitType::Test => "test",
            CommitType::Chore => "chore",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CommitType {
    type Err = crate::error::DevkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feat" => Ok(CommitType::Feat),
            "fix" => Ok(CommitType::Fix),
            "refactor" => Ok(CommitType::Refactor),
            "docs" => Ok(CommitType::Docs),
            "style" => Ok(CommitType::Style),
            "test" => Ok(CommitType::Test),
            "chore" => Ok(CommitType::Chore),
            "" => Err(crate::error::DevkitError::MissingType),
            other => Err(crate::error::DevkitError::UnknownCommitType(
                other.to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Branch
// ---------------------------------------------------------------------------

/// The branch HEAD points at when a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Branch {
    Named(String),
    Detached,
}

impl Branch {
    /// Build from `git branch --show-current` output; empty means detached.
    pub fn from_show_current(output: &str) -> Self {
        let name = output.trim();
        if name.is_empty() {
            Branch::Detached
        } else {
            Branch::Named(name.to_string())
        }
    }

    pub fn label<'a>(&'a self, detached_label: &'a str) -> &'a str {
        match self {
            Branch::Named(name) => name,
            Branch::Detached => detached_label,
        }
    }
}

// ---------------------------------------------------------------------------
// RepoSnapshot
// ---------------------------------------------------------------------------

/// Repository state captured once at the start of a commit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoSnapshot {
    pub branch: Branch,
    /// Staged paths in the order git reports them.
    pub staged_files: Vec<String>,
    /// Full `git diff --cached` output.
    pub diff: String,
}

impl RepoSnapshot {
    pub fn has_staged_changes(&self) -> bool {
        !self.staged_files.is_empty()
    }
}
