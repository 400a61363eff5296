use crate::classifier::{Condition, FileContext, Rule};
use crate::types::CommitType;
use regex::Regex;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Pattern table
// ---------------------------------------------------------------------------

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        fn $name() -> &'static Regex {
            static RE: OnceLock<Regex> = OnceLock::new();
            RE.get_or_init(|| Regex::new($re).unwrap())
        }
    };
}

pattern!(
    docs_path,
    r"(?i)(\.(md|mdx|markdown|rst|adoc|txt)$|(^|/)docs?/|(^|/)(readme|changelog|license)[^/]*$)"
);

pattern!(
    test_path,
    r"(?i)(\.(test|spec)\.[^/]+$|_test\.[^/]+$|(^|/)test_[^/]+\.py$|(^|/)(tests?|__tests__|spec)/)"
);

pattern!(
    chore_path,
    r"(?ix)
    (^|/)(package\.json|package-lock\.json|yarn\.lock|pnpm-lock\.yaml|bun\.lockb?
         |cargo\.toml|cargo\.lock|go\.mod|go\.sum|makefile|dockerfile)$
    | \.(lock|toml|ini|cfg|ya?ml)$
    | \.config\.[^/]+$
    | (^|/)tsconfig[^/]*\.json$
    | (^|/)biome\.jsonc?$
    | (^|/)\.(gitignore|gitattributes|editorconfig|npmrc|nvmrc|prettierrc[^/]*|eslintrc[^/]*)$
    | (^|/)\.github/
    "
);

pattern!(stylesheet_path, r"(?i)\.(css|scss|sass|less|styl)$");

pattern!(
    formatting_words,
    r"(?i)\b(format|formatting|formatted|indent|indentation|spacing|whitespace|prettier|lint)\b"
);

pattern!(
    fix_words,
    r"(?i)\b(fix|fixed|fixes|bug|bugs|bugfix|hotfix|patch)\b"
);

pattern!(
    refactor_words,
    r"(?i)\b(refactor|refactored|refactoring|restructure|cleanup|simplify|rename)\b"
);

pattern!(
    feat_words,
    r"(?i)\b(add|added|adds|implement|implemented|implements|introduce|feature)\b"
);

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

fn is_docs(ctx: &FileContext) -> bool {
    docs_path().is_match(ctx.path)
}

fn is_test(ctx: &FileContext) -> bool {
    test_path().is_match(ctx.path)
}

fn is_config(ctx: &FileContext) -> bool {
    chore_path().is_match(ctx.path)
}

fn is_stylesheet(ctx: &FileContext) -> bool {
    stylesheet_path().is_match(ctx.path)
}

fn is_stylesheet_formatting(ctx: &FileContext) -> bool {
    is_stylesheet(ctx) && formatting_words().is_match(ctx.added)
}

fn mentions_fix(diff: &str) -> bool {
    fix_words().is_match(diff)
}

fn mentions_refactor(diff: &str) -> bool {
    refactor_words().is_match(diff)
}

fn mentions_feature(diff: &str) -> bool {
    feat_words().is_match(diff)
}

// ---------------------------------------------------------------------------
// Default rule table
// ---------------------------------------------------------------------------

/// Path rules in per-file priority order, then content rules in override
/// order (a later match replaces an earlier one).
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "docs-path",
            condition: Condition::Path(is_docs),
            commit_type: CommitType::Docs,
        },
        Rule {
            id: "test-path",
            condition: Condition::Path(is_test),
            commit_type: CommitType::Test,
        },
        Rule {
            id: "chore-config",
            condition: Condition::Path(is_config),
            commit_type: CommitType::Chore,
        },
        Rule {
            id: "stylesheet-formatting",
            condition: Condition::Path(is_stylesheet_formatting),
            commit_type: CommitType::Style,
        },
        Rule {
            id: "stylesheet",
            condition: Condition::Path(is_stylesheet),
            commit_type: CommitType::Feat,
        },
        Rule {
            id: "content-fix",
            condition: Condition::Content(mentions_fix),
            commit_type: CommitType::Fix,
        },
        Rule {
            id: "content-refactor",
            condition: Condition::Content(mentions_refactor),
            commit_type: CommitType::Refactor,
        },
        Rule {
            id: "content-feat",
            condition: Condition::Content(mentions_feature),
            commit_type: CommitType::Feat,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> FileContext<'_> {
        FileContext { path, added: "" }
    }

    #[test]
    fn docs_paths() {
        for p in [
            "README.md",
            "docs/setup.html",
            "doc/api/index.rst",
            "CHANGELOG",
            "LICENSE-MIT",
            "notes.txt",
            "guide/Intro.MDX",
        ] {
            assert!(is_docs(&file(p)), "expected docs: {p}");
        }
        for p in ["src/docsearch.rs", "src/lib.rs", "mydocs/x.rs"] {
            assert!(!is_docs(&file(p)), "expected not docs: {p}");
        }
    }

    #[test]
    fn test_paths() {
        for p in [
            "src/login.test.ts",
            "src/login.spec.tsx",
            "pkg/server_test.go",
            "test_parser.py",
            "tests/integration.rs",
            "crates/x/tests/it.rs",
            "src/__tests__/a.js",
            "spec/models/user_spec.rb",
        ] {
            assert!(is_test(&file(p)), "expected test: {p}");
        }
        for p in ["src/testing.rs", "src/contest/a.rs", "latest/x.rs"] {
            assert!(!is_test(&file(p)), "expected not test: {p}");
        }
    }

    #[test]
    fn config_paths() {
        for p in [
            "package.json",
            "web/package-lock.json",
            "yarn.lock",
            "Cargo.toml",
            "Cargo.lock",
            "go.sum",
            "pyproject.toml",
            ".github/workflows/ci.yml",
            "config/app.yaml",
            "vite.config.ts",
            "tsconfig.build.json",
            "biome.json",
            ".gitignore",
            ".prettierrc.json",
            "Makefile",
            "docker/Dockerfile",
        ] {
            assert!(is_config(&file(p)), "expected chore: {p}");
        }
        for p in ["src/config.rs", "src/package.rs", "data.json"] {
            assert!(!is_config(&file(p)), "expected not chore: {p}");
        }
    }

    #[test]
    fn stylesheet_paths() {
        for p in ["a.css", "b.SCSS", "c.sass", "d.less", "e.styl"] {
            assert!(is_stylesheet(&file(p)), "expected stylesheet: {p}");
        }
        assert!(!is_stylesheet(&file("a.css.map")));
    }

    #[test]
    fn stylesheet_formatting_needs_keyword_in_added_lines() {
        let ctx = FileContext {
            path: "a.css",
            added: "/* fix indentation */\n",
        };
        assert!(is_stylesheet_formatting(&ctx));
        let ctx = FileContext {
            path: "a.css",
            added: ".x { color: blue; }\n",
        };
        assert!(!is_stylesheet_formatting(&ctx));
        let ctx = FileContext {
            path: "a.rs",
            added: "// formatting\n",
        };
        assert!(!is_stylesheet_formatting(&ctx));
    }

    #[test]
    fn keyword_families() {
        assert!(mentions_fix("Fixes #12"));
        assert!(mentions_fix("hotfix for BUG"));
        assert!(!mentions_fix("prefix suffix fixture"));
        assert!(mentions_refactor("Refactoring the loop"));
        assert!(!mentions_refactor("renamed"));
        assert!(mentions_feature("Added a flag"));
        assert!(mentions_feature("new feature"));
        assert!(!mentions_feature("address padding"));
    }

    #[test]
    fn default_table_order() {
        let ids: Vec<&str> = default_rules().iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![
                "docs-path",
                "test-path",
                "chore-config",
                "stylesheet-formatting",
                "stylesheet",
                "content-fix",
                "content-refactor",
                "content-feat",
            ]
        );
    }
}
