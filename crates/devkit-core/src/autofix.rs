//! Best-effort auto-fix tool run between commit attempts.
//!
//! The tool rewrites staged files in place (by default `npx biome check
//! --write <files>`). Its exit status is ignored; only whether it could be
//! found on PATH matters.

use crate::config::AutofixConfig;
use std::path::Path;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoFixer {
    program: String,
    args: Vec<String>,
}

impl AutoFixer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `None` when auto-fixing is disabled or no program is configured.
    pub fn from_config(cfg: &AutofixConfig) -> Option<Self> {
        if !cfg.enabled || cfg.program.trim().is_empty() {
            return None;
        }
        Some(Self::new(cfg.program.clone(), cfg.args.clone()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    /// Run the tool on `files` inside `dir`. Returns whether it exited
    /// successfully; spawn errors are logged and reported as `false`.
    pub fn run(&self, dir: &Path, files: &[String]) -> bool {
        tracing::info!(
            "running {} {} on {} file(s)",
            self.program,
            self.args.join(" "),
            files.len()
        );
        let result = Command::new(&self.program)
            .args(&self.args)
            .args(files)
            .current_dir(dir)
            .stdin(Stdio::null())
            .status();
        match result {
            Ok(status) => {
                if !status.success() {
                    tracing::warn!("{} exited with {status}; continuing", self.program);
                }
                status.success()
            }
            Err(e) => {
                tracing::warn!("failed to run {}: {e}; continuing", self.program);
                false
            }
        }
    }
}
