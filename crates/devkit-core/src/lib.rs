pub mod autofix;
pub mod branch;
pub mod classifier;
pub mod commit;
pub mod config;
pub mod error;
pub mod gh;
pub mod git;
pub mod issue;
pub mod paths;
pub mod rules;
pub mod types;
pub mod worktree;

pub use error::{DevkitError, ErrorKind, Result};
