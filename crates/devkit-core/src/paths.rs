use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CONFIG_FILE: &str = ".devkit.yaml";
pub const GIT_DIR: &str = ".git";

pub const DEFAULT_WORKTREE_ROOT: &str = "../worktree";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Where the worktree for `branch` lives:
/// `<worktree_root>/<basename(cwd)>/<branch>`, with a relative
/// `worktree_root` resolved against `cwd`.
pub fn worktree_path(cwd: &Path, worktree_root: &Path, branch: &str) -> PathBuf {
    let project = cwd
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "repo".to_string());
    let base = if worktree_root.is_absolute() {
        worktree_root.to_path_buf()
    } else {
        cwd.join(worktree_root)
    };
    base.join(project).join(branch)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_worktree_root_is_sibling_of_cwd() {
        let cwd = Path::new("/home/dev/src/widgets");
        assert_eq!(
            worktree_path(cwd, Path::new(DEFAULT_WORKTREE_ROOT), "issue-42-fix"),
            PathBuf::from("/home/dev/src/widgets/../worktree/widgets/issue-42-fix")
        );
    }

    #[test]
    fn absolute_worktree_root_is_used_as_is() {
        let cwd = Path::new("/home/dev/src/widgets");
        assert_eq!(
            worktree_path(cwd, Path::new("/tmp/wt"), "issue-1"),
            PathBuf::from("/tmp/wt/widgets/issue-1")
        );
    }

    #[test]
    fn config_path_is_at_root() {
        assert_eq!(
            config_path(Path::new("/tmp/proj")),
            PathBuf::from("/tmp/proj/.devkit.yaml")
        );
    }
}
