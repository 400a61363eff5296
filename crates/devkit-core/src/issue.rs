use crate::error::{DevkitError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

static ISSUE_URL_RE: OnceLock<Regex> = OnceLock::new();

fn issue_url_re() -> &'static Regex {
    ISSUE_URL_RE.get_or_init(|| {
        Regex::new(r"^https://github\.com/([^/\s]+)/([^/\s]+)/issues/([0-9]+)$").unwrap()
    })
}

/// A GitHub issue addressed by owner, repository and number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl IssueRef {
    /// Parse `https://github.com/<owner>/<repo>/issues/<number>`.
    ///
    /// The whole string must match; trailing paths, query strings and
    /// fragments are rejected, as is issue number 0.
    pub fn parse(url: &str) -> Result<Self> {
        let invalid = || DevkitError::InvalidIssueUrl(url.to_string());
        let caps = issue_url_re().captures(url).ok_or_else(invalid)?;
        let number: u64 = caps[3].parse().map_err(|_| invalid())?;
        if number == 0 {
            return Err(invalid());
        }
        Ok(Self {
            owner: caps[1].to_string(),
            repo: caps[2].to_string(),
            number,
        })
    }

    pub fn url(&self) -> String {
        format!(
            "https://github.com/{}/{}/issues/{}",
            self.owner, self.repo, self.number
        )
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}
