//! Branch-name derivation for issue worktrees.
//!
//! `slugify` must stay byte-for-byte stable: existing worktrees and branches
//! were named with it, and re-running it on an issue must land on the same
//! branch.

use crate::issue::IssueRef;
use regex::Regex;
use std::sync::OnceLock;

/// Default maximum branch-name length.
pub const DEFAULT_MAX_LEN: usize = 50;

/// Replace every non-ASCII-alphanumeric character with `-`, collapse runs of
/// `-`, strip leading and trailing `-`, lowercase, and truncate to `max_len`.
///
/// Truncation can expose a trailing `-`; it is stripped again so the result
/// never ends with one.
pub fn slugify(input: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    // ASCII only from here on, so byte indices are char indices.
    out.truncate(max_len);
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Branch name for an issue: `issue-<number>-<title>`, slugified.
pub fn issue_branch_name(issue: &IssueRef, title: &str, max_len: usize) -> String {
    slugify(&format!("issue-{}-{}", issue.number, title), max_len)
}

static BRANCH_SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn branch_slug_re() -> &'static Regex {
    BRANCH_SLUG_RE
        .get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap())
}

/// True when `name` already satisfies every `slugify` invariant.
pub fn is_normalized(name: &str, max_len: usize) -> bool {
    name.len() <= max_len && branch_slug_re().is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(n: u64) -> IssueRef {
        IssueRef {
            owner: "acme".into(),
            repo: "widgets".into(),
            number: n,
        }
    }

    #[test]
    fn derives_issue_branch() {
        assert_eq!(
            issue_branch_name(&issue(42), "Fix login: crash on empty password!", 50),
            "issue-42-fix-login-crash-on-empty-password"
        );
    }

    #[test]
    fn collapses_and_strips_hyphens() {
        assert_eq!(slugify("--Hello,,  World--", 50), "hello-world");
        assert_eq!(slugify("a___b", 50), "a-b");
    }

    #[test]
    fn non_ascii_becomes_separator() {
        assert_eq!(slugify("Café crème", 50), "caf-cr-me");
    }

    #[test]
    fn empty_and_punctuation_titles() {
        assert_eq!(issue_branch_name(&issue(7), "", 50), "issue-7");
        assert_eq!(issue_branch_name(&issue(7), "?!#$%^&*()", 50), "issue-7");
        assert_eq!(slugify("", 50), "");
        assert_eq!(slugify("!!!", 50), "");
    }

    #[test]
    fn truncates_to_max_len() {
        let title = "a".repeat(80);
        let name = issue_branch_name(&issue(1), &title, 50);
        assert_eq!(name.len(), 50);
        assert!(name.starts_with("issue-1-aaaa"));
    }

    #[test]
    fn truncation_never_leaves_trailing_hyphen() {
        // "issue-1-" + 41 chars puts a hyphen at index 49.
        let title = format!("{} tail", "b".repeat(41));
        let name = issue_branch_name(&issue(1), &title, 50);
        assert!(!name.ends_with('-'), "{name}");
        assert_eq!(name.len(), 49);
    }

    #[test]
    fn idempotent() {
        for title in [
            "Add OAuth2 support (GitHub + Google)",
            "   ",
            "Überlange Überschrift mit Sonderzeichen äöü und mehr Text als erlaubt ist",
            "x",
        ] {
            let once = issue_branch_name(&issue(123), title, 50);
            assert_eq!(slugify(&once, 50), once);
        }
    }

    #[test]
    fn invariants_hold_for_awkward_inputs() {
        let inputs = [
            String::new(),
            "-".repeat(100),
            "a-".repeat(60),
            "ab ".repeat(40),
            "Ünïcödé only".into(),
            "UPPER_case/with\\slashes".into(),
            format!("{}-{}", "x".repeat(49), "y"),
        ];
        for input in &inputs {
            let out = slugify(input, 50);
            assert!(out.len() <= 50, "{out}");
            assert!(!out.starts_with('-'), "{out}");
            assert!(!out.ends_with('-'), "{out}");
            assert!(!out.contains("--"), "{out}");
            assert!(out.is_empty() || is_normalized(&out, 50), "{out}");
        }
    }

    #[test]
    fn normalized_check() {
        assert!(is_normalized("issue-1-fix", 50));
        assert!(!is_normalized("-issue", 50));
        assert!(!is_normalized("issue--1", 50));
        assert!(!is_normalized("Issue-1", 50));
        assert!(!is_normalized("abc", 2));
    }
}
