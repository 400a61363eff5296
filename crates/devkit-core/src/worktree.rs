use crate::branch::issue_branch_name;
use crate::config::Config;
use crate::error::Result;
use crate::git::Git;
use crate::issue::IssueRef;
use crate::paths::worktree_path;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Everything needed to create an issue worktree, computed up front.
#[derive(Debug, Clone, Serialize)]
pub struct WorktreePlan {
    pub issue: IssueRef,
    pub title: String,
    pub branch: String,
    pub path: PathBuf,
}

impl WorktreePlan {
    pub fn new(issue: IssueRef, title: &str, cwd: &Path, config: &Config) -> Self {
        let branch = issue_branch_name(&issue, title, config.branch_max_len);
        let path = worktree_path(cwd, &config.worktree_root, &branch);
        Self {
            issue,
            title: title.to_string(),
            branch,
            path,
        }
    }

    /// Create the parent directory, then the branch and worktree.
    pub fn create(&self, git: &Git) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        tracing::info!(branch = %self.branch, path = %self.path.display(), "creating worktree");
        git.worktree_add(&self.branch, &self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_derives_branch_and_path() {
        let issue = IssueRef::parse("https://github.com/acme/widgets/issues/17").unwrap();
        let plan = WorktreePlan::new(
            issue,
            "Support dark mode",
            Path::new("/src/widgets"),
            &Config::default(),
        );
        assert_eq!(plan.branch, "issue-17-support-dark-mode");
        assert_eq!(
            plan.path,
            PathBuf::from("/src/widgets/../worktree/widgets/issue-17-support-dark-mode")
        );
    }

    #[test]
    fn plan_honours_configured_max_len() {
        let issue = IssueRef::parse("https://github.com/acme/widgets/issues/17").unwrap();
        let cfg = Config {
            branch_max_len: 12,
            ..Config::default()
        };
        let plan = WorktreePlan::new(issue, "Support dark mode", Path::new("/src/w"), &cfg);
        assert_eq!(plan.branch, "issue-17-sup");
    }
}
