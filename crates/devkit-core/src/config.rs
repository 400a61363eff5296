use crate::branch::DEFAULT_MAX_LEN;
use crate::error::Result;
use crate::paths;
use crate::types::Branch;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// AutofixConfig
// ---------------------------------------------------------------------------

/// The tool run on staged files after a rejected commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutofixConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_autofix_program")]
    pub program: String,
    #[serde(default = "default_autofix_args")]
    pub args: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_autofix_program() -> String {
    "npx".to_string()
}

fn default_autofix_args() -> Vec<String> {
    vec![
        "biome".to_string(),
        "check".to_string(),
        "--write".to_string(),
    ]
}

impl Default for AutofixConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: default_autofix_program(),
            args: default_autofix_args(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Branches that never get a `(scope)` in the commit message.
    #[serde(default = "default_protected_branches")]
    pub protected_branches: Vec<String>,
    #[serde(default = "default_branch_max_len")]
    pub branch_max_len: usize,
    /// Parent directory for issue worktrees; relative paths resolve
    /// against the current directory.
    #[serde(default = "default_worktree_root")]
    pub worktree_root: PathBuf,
    /// Number of `git log --oneline` entries shown after a commit.
    #[serde(default = "default_history_lines")]
    pub history_lines: usize,
    #[serde(default = "default_detached_label")]
    pub detached_label: String,
    #[serde(default)]
    pub autofix: AutofixConfig,
}

fn default_protected_branches() -> Vec<String> {
    vec![
        "main".to_string(),
        "master".to_string(),
        "develop".to_string(),
    ]
}

fn default_branch_max_len() -> usize {
    DEFAULT_MAX_LEN
}

fn default_worktree_root() -> PathBuf {
    PathBuf::from(paths::DEFAULT_WORKTREE_ROOT)
}

fn default_history_lines() -> usize {
    5
}

fn default_detached_label() -> String {
    "detached".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protected_branches: default_protected_branches(),
            branch_max_len: default_branch_max_len(),
            worktree_root: default_worktree_root(),
            history_lines: default_history_lines(),
            detached_label: default_detached_label(),
            autofix: AutofixConfig::default(),
        }
    }
}

impl Config {
    /// Load `<root>/.devkit.yaml`, falling back to defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn is_protected(&self, branch: &Branch) -> bool {
        match branch {
            Branch::Named(name) => self.protected_branches.iter().any(|p| p == name),
            Branch::Detached => false,
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.branch_max_len == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "branch_max_len is 0; branch names would be empty".to_string(),
            });
        }

        if self.autofix.enabled && self.autofix.program.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "autofix.enabled is set but autofix.program is empty".to_string(),
            });
        }

        if self.detached_label.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "detached_label is empty; detached commits get an empty scope"
                    .to_string(),
            });
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.branch_max_len, 50);
        assert_eq!(cfg.protected_branches, ["main", "master", "develop"]);
        assert_eq!(cfg.autofix.program, "npx");
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".devkit.yaml"), "\n").unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".devkit.yaml"),
            "protected_branches: [trunk]\nautofix:\n  enabled: false\n",
        )
        .unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.protected_branches, ["trunk"]);
        assert!(!cfg.autofix.enabled);
        assert_eq!(cfg.autofix.program, "npx");
        assert_eq!(cfg.history_lines, 5);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".devkit.yaml"), "branch_max_len: [oops").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn protected_branch_check() {
        let cfg = Config::default();
        assert!(cfg.is_protected(&Branch::Named("main".into())));
        assert!(cfg.is_protected(&Branch::Named("develop".into())));
        assert!(!cfg.is_protected(&Branch::Named("feature/login".into())));
        assert!(!cfg.is_protected(&Branch::Detached));
    }

    #[test]
    fn validate_default_has_no_warnings() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_zero_length_and_empty_program() {
        let mut cfg = Config::default();
        cfg.branch_max_len = 0;
        cfg.autofix.program = String::new();
        let warnings = cfg.validate();
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("branch_max_len")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("autofix.program")));
    }
}
