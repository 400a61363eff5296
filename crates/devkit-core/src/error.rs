use thiserror::Error;

#[derive(Debug, Error)]
pub enum DevkitError {
    #[error("usage: {0}")]
    Usage(String),

    #[error("invalid issue URL '{0}': expected https://github.com/<owner>/<repo>/issues/<number>")]
    InvalidIssueUrl(String),

    #[error("unknown commit type '{0}': expected one of feat, fix, refactor, docs, style, test, chore")]
    UnknownCommitType(String),

    #[error("commit type is required")]
    MissingType,

    #[error("commit description is required")]
    MissingDescription,

    #[error("not a git repository")]
    NotARepository,

    #[error("no staged changes; stage files with 'git add' first\n{status}")]
    NoStagedChanges { status: String },

    #[error("could not fetch issue: {0}")]
    IssueLookup(String),

    #[error("commit failed after auto-fix retry; resolve the issues manually and commit again")]
    CommitFailed,

    #[error("aborted by user")]
    Declined,

    #[error("failed to run '{program}': {reason}")]
    CommandSpawn { program: String, reason: String },

    #[error("'{command}' exited with {code}: {stderr}")]
    CommandFailed {
        command: String,
        code: String,
        stderr: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Broad category of a [`DevkitError`], used to decide how it is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad argument count, format or value.
    Usage,
    /// The working tree is not in a state the command can act on.
    Precondition,
    /// An external lookup (issue title) failed or came back empty.
    ExternalLookup,
    /// The commit was rejected twice.
    CommitRejected,
    /// The operator declined the confirmation.
    Aborted,
    /// Process spawning, I/O or (de)serialization failures.
    Internal,
}

impl DevkitError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DevkitError::Usage(_)
            | DevkitError::InvalidIssueUrl(_)
            | DevkitError::UnknownCommitType(_)
            | DevkitError::MissingType
            | DevkitError::MissingDescription => ErrorKind::Usage,
            DevkitError::NotARepository | DevkitError::NoStagedChanges { .. } => {
                ErrorKind::Precondition
            }
            DevkitError::IssueLookup(_) => ErrorKind::ExternalLookup,
            DevkitError::CommitFailed => ErrorKind::CommitRejected,
            DevkitError::Declined => ErrorKind::Aborted,
            DevkitError::CommandSpawn { .. }
            | DevkitError::CommandFailed { .. }
            | DevkitError::Io(_)
            | DevkitError::Yaml(_)
            | DevkitError::Json(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, DevkitError>;
