use crate::rules::default_rules;
use crate::types::{CommitType, RepoSnapshot};
use serde::Serialize;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// FileContext
// ---------------------------------------------------------------------------

/// One staged path together with the lines the staged diff adds to it.
pub struct FileContext<'a> {
    pub path: &'a str,
    /// Added lines (without the leading `+`), newline-joined.
    pub added: &'a str,
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// What a rule looks at.
pub enum Condition {
    /// Evaluated once per staged file, in staging order.
    Path(fn(&FileContext) -> bool),
    /// Evaluated once over the whole staged diff.
    Content(fn(&str) -> bool),
}

/// A fn-pointer rule: when `condition` holds, the type becomes `commit_type`.
pub struct Rule {
    pub id: &'static str,
    pub condition: Condition,
    pub commit_type: CommitType,
}

// ---------------------------------------------------------------------------
// Classification (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub commit_type: CommitType,
    /// Ids of every rule that assigned a type, in evaluation order.
    pub matched: Vec<&'static str>,
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Ordered rule table.
///
/// The path pass walks staged files in order; for each file the first
/// matching path rule assigns its type, and later files overwrite earlier
/// ones. The content pass then runs every content rule in table order, each
/// match overwriting the previous one, so the last matching family wins.
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl Classifier {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn classify(&self, snapshot: &RepoSnapshot) -> Classification {
        let mut commit_type = CommitType::default();
        let mut matched = Vec::new();

        let added = added_lines_by_file(&snapshot.diff);
        for path in &snapshot.staged_files {
            let ctx = FileContext {
                path,
                added: added.get(path.as_str()).map(String::as_str).unwrap_or(""),
            };
            let hit = self.rules.iter().find(|rule| match rule.condition {
                Condition::Path(f) => f(&ctx),
                Condition::Content(_) => false,
            });
            if let Some(rule) = hit {
                tracing::debug!(path = %path, rule = rule.id, "path rule matched");
                commit_type = rule.commit_type;
                matched.push(rule.id);
            }
        }

        for rule in &self.rules {
            if let Condition::Content(f) = rule.condition {
                if f(&snapshot.diff) {
                    tracing::debug!(rule = rule.id, "content rule matched");
                    commit_type = rule.commit_type;
                    matched.push(rule.id);
                }
            }
        }

        Classification {
            commit_type,
            matched,
        }
    }
}

// ---------------------------------------------------------------------------
// Diff parsing
// ---------------------------------------------------------------------------

/// Split a unified `git diff` into the added lines of each file, keyed by the
/// post-image path.
pub fn added_lines_by_file(diff: &str) -> HashMap<&str, String> {
    let mut out: HashMap<&str, String> = HashMap::new();
    let mut current: Option<&str> = None;
    let mut in_header = false;

    for line in diff.lines() {
        if let Some(rest) = line.strip_prefix("diff --git ") {
            in_header = true;
            current = rest.rsplit_once(" b/").map(|(_, p)| p);
            continue;
        }
        if in_header {
            if let Some(target) = line.strip_prefix("+++ ") {
                if let Some(p) = target.strip_prefix("b/") {
                    current = Some(p);
                }
                in_header = false;
            } else if line.starts_with("@@") {
                in_header = false;
            }
            continue;
        }
        if let (Some(path), Some(added)) = (current, line.strip_prefix('+')) {
            let buf = out.entry(path).or_default();
            buf.push_str(added);
            buf.push('\n');
        }
    }
    out
}
