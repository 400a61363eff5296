//! Thin wrapper over the `git` command line.
//!
//! Every call runs `git` in the wrapper's directory and captures output,
//! except `commit`, which sends git and hook output to stderr so stdout
//! stays free for the caller's own output.

use crate::error::{DevkitError, Result};
use crate::types::{Branch, RepoSnapshot};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

pub struct Git {
    dir: PathBuf,
}

impl Git {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new("git");
        // Keep non-ASCII paths unquoted so they match on-disk names.
        cmd.args(["-c", "core.quotepath=off"]);
        cmd.current_dir(&self.dir);
        cmd
    }

    fn output(&self, args: &[&str]) -> Result<Output> {
        tracing::debug!(dir = %self.dir.display(), "git {}", args.join(" "));
        self.command()
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| DevkitError::CommandSpawn {
                program: "git".to_string(),
                reason: e.to_string(),
            })
    }

    /// Run and return stdout; a non-zero exit is an error carrying stderr.
    fn stdout(&self, args: &[&str]) -> Result<String> {
        let output = self.output(args)?;
        if !output.status.success() {
            return Err(DevkitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                code: exit_code(&output.status),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn is_repository(&self) -> bool {
        self.output(&["rev-parse", "--is-inside-work-tree"])
            .map(|o| o.status.success() && String::from_utf8_lossy(&o.stdout).trim() == "true")
            .unwrap_or(false)
    }

    pub fn ensure_repository(&self) -> Result<()> {
        if self.is_repository() {
            Ok(())
        } else {
            Err(DevkitError::NotARepository)
        }
    }

    pub fn staged_files(&self) -> Result<Vec<String>> {
        Ok(lines(&self.stdout(&["diff", "--cached", "--name-only"])?))
    }

    /// Blob ids of the working-tree copies of `paths`; missing files map to `None`.
    pub fn worktree_hashes(&self, paths: &[String]) -> Result<HashMap<String, Option<String>>> {
        let mut hashes: HashMap<String, Option<String>> =
            paths.iter().map(|p| (p.clone(), None)).collect();
        let present: Vec<&str> = paths
            .iter()
            .filter(|p| self.dir.join(p).is_file())
            .map(String::as_str)
            .collect();
        if present.is_empty() {
            return Ok(hashes);
        }
        let mut args = vec!["hash-object", "--"];
        args.extend(present.iter().copied());
        let out = self.stdout(&args)?;
        for (path, hash) in present.iter().zip(lines(&out)) {
            hashes.insert(path.to_string(), Some(hash));
        }
        Ok(hashes)
    }

    pub fn staged_diff(&self) -> Result<String> {
        self.stdout(&["diff", "--cached"])
    }

    pub fn current_branch(&self) -> Result<Branch> {
        let out = self.stdout(&["branch", "--show-current"])?;
        Ok(Branch::from_show_current(&out))
    }

    pub fn status_short(&self) -> Result<String> {
        self.stdout(&["status", "--short"])
    }

    pub fn recent_log(&self, count: usize) -> Result<String> {
        let n = count.to_string();
        self.stdout(&["log", "--oneline", "-n", &n])
    }

    /// Capture branch, staged paths and staged diff in one go.
    ///
    /// Fails with `NoStagedChanges` (carrying `git status --short`) when the
    /// index matches HEAD.
    pub fn snapshot(&self) -> Result<RepoSnapshot> {
        self.ensure_repository()?;
        let snapshot = RepoSnapshot {
            branch: self.current_branch()?,
            staged_files: self.staged_files()?,
            diff: self.staged_diff()?,
        };
        if !snapshot.has_staged_changes() {
            let status = self.status_short().unwrap_or_default();
            return Err(DevkitError::NoStagedChanges { status });
        }
        Ok(snapshot)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// `git commit -m <message>`; returns whether git accepted the commit.
    pub fn commit(&self, message: &str) -> Result<bool> {
        tracing::debug!(dir = %self.dir.display(), "git commit -m {message:?}");
        let status = self
            .command()
            .args(["commit", "-m", message])
            .stdout(std::io::stderr())
            .status()
            .map_err(|e| DevkitError::CommandSpawn {
                program: "git".to_string(),
                reason: e.to_string(),
            })?;
        Ok(status.success())
    }

    pub fn add(&self, paths: &[String]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.stdout(&args)?;
        Ok(())
    }

    /// `git worktree add -b <branch> <path>`.
    pub fn worktree_add(&self, branch: &str, path: &Path) -> Result<()> {
        let path = path.to_string_lossy();
        self.stdout(&["worktree", "add", "-b", branch, &path])?;
        Ok(())
    }
}

fn lines(s: &str) -> Vec<String> {
    s.lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn exit_code(status: &std::process::ExitStatus) -> String {
    status
        .code()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "signal".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn git_available() -> bool {
        which::which("git").is_ok()
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    fn init_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        git(dir.path(), &["init", "-q", "-b", "main"]);
        git(dir.path(), &["config", "user.email", "dev@example.com"]);
        git(dir.path(), &["config", "user.name", "Dev"]);
        git(dir.path(), &["config", "commit.gpgsign", "false"]);
        dir
    }

    #[test]
    fn lines_drops_blanks() {
        assert_eq!(lines("a\n\nb \n"), vec!["a", "b"]);
        assert!(lines("").is_empty());
    }

    #[test]
    fn plain_directory_is_not_a_repository() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let g = Git::new(dir.path());
        assert!(!g.is_repository());
        assert!(matches!(
            g.ensure_repository(),
            Err(DevkitError::NotARepository)
        ));
    }

    #[test]
    fn snapshot_requires_staged_changes() {
        if !git_available() {
            return;
        }
        let dir = init_repo();
        std::fs::write(dir.path().join("a.txt"), "hello\n").unwrap();
        let g = Git::new(dir.path());
        match g.snapshot() {
            Err(DevkitError::NoStagedChanges { status }) => assert!(status.contains("a.txt")),
            other => panic!("expected NoStagedChanges, got {other:?}"),
        }
    }

    #[test]
    fn snapshot_captures_branch_files_and_diff() {
        if !git_available() {
            return;
        }
        let dir = init_repo();
        std::fs::write(dir.path().join("README.md"), "# Title\n").unwrap();
        git(dir.path(), &["add", "README.md"]);
        let g = Git::new(dir.path());
        let snap = g.snapshot().unwrap();
        assert_eq!(snap.branch, Branch::Named("main".into()));
        assert_eq!(snap.staged_files, vec!["README.md"]);
        assert!(snap.diff.contains("+# Title"));
    }

    #[test]
    fn commit_and_log() {
        if !git_available() {
            return;
        }
        let dir = init_repo();
        std::fs::write(dir.path().join("a.txt"), "x\n").unwrap();
        let g = Git::new(dir.path());
        g.add(&["a.txt".to_string()]).unwrap();
        assert!(g.commit("chore: initial").unwrap());
        assert!(g.recent_log(5).unwrap().contains("chore: initial"));
        assert!(g.staged_files().unwrap().is_empty());
    }

    #[test]
    fn worktree_hashes_track_content_changes() {
        if !git_available() {
            return;
        }
        let dir = init_repo();
        std::fs::write(dir.path().join("a.txt"), "one\n").unwrap();
        let g = Git::new(dir.path());
        let files = vec!["a.txt".to_string(), "gone.txt".to_string()];

        let before = g.worktree_hashes(&files).unwrap();
        assert!(before["a.txt"].is_some());
        assert_eq!(before["gone.txt"], None);

        assert_eq!(g.worktree_hashes(&files).unwrap(), before);
        std::fs::write(dir.path().join("a.txt"), "two\n").unwrap();
        assert_ne!(g.worktree_hashes(&files).unwrap()["a.txt"], before["a.txt"]);
    }
}
