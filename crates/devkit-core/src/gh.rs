use crate::error::{DevkitError, Result};
use crate::git::exit_code;
use crate::issue::IssueRef;
use std::process::{Command, Stdio};

/// Fetch an issue title through the GitHub CLI.
///
/// Any failure (gh missing, not authenticated, issue not found) and an empty
/// title all surface as `IssueLookup`.
pub fn fetch_issue_title(issue: &IssueRef) -> Result<String> {
    let url = issue.url();
    tracing::debug!("gh issue view {url} --json title --jq .title");
    let output = Command::new("gh")
        .args(["issue", "view", &url, "--json", "title", "--jq", ".title"])
        .stdin(Stdio::null())
        .output()
        .map_err(|e| DevkitError::IssueLookup(format!("failed to run gh: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(DevkitError::IssueLookup(format!(
            "gh exited with {} for {issue}: {stderr}",
            exit_code(&output.status)
        )));
    }

    parse_title(&String::from_utf8_lossy(&output.stdout))
        .ok_or_else(|| DevkitError::IssueLookup(format!("empty title for {issue}")))
}

fn parse_title(stdout: &str) -> Option<String> {
    let title = stdout.trim();
    if title.is_empty() || title == "null" {
        None
    } else {
        Some(title.to_string())
    }
}
