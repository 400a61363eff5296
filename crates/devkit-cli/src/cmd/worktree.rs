use crate::output::print_json;
use anyhow::Context;
use devkit_core::{branch, gh, git::Git, issue::IssueRef, worktree::WorktreePlan};
use std::path::Path;

pub struct WorktreeOptions<'a> {
    /// Use this title instead of asking `gh`.
    pub title: Option<&'a str>,
    pub dry_run: bool,
    pub json: bool,
}

pub fn run(root: &Path, cwd: &Path, url: &str, opts: WorktreeOptions) -> anyhow::Result<()> {
    let issue = IssueRef::parse(url)?;
    let config = super::load_config(root)?;

    let git = Git::new(cwd);
    git.ensure_repository()?;

    let title = match opts.title {
        Some(t) => t.to_string(),
        None => gh::fetch_issue_title(&issue)?,
    };

    let plan = WorktreePlan::new(issue, &title, cwd, &config);
    if !branch::is_normalized(&plan.branch, config.branch_max_len) {
        anyhow::bail!(
            "derived branch name '{}' is not usable; check branch_max_len in the config",
            plan.branch
        );
    }

    if opts.dry_run {
        if opts.json {
            print_json(&plan)?;
        } else {
            println!("Would create branch '{}' at {}", plan.branch, plan.path.display());
        }
        return Ok(());
    }

    plan.create(&git)
        .with_context(|| format!("failed to create worktree for {}", plan.issue))?;

    if opts.json {
        print_json(&plan)?;
    } else {
        println!("Created worktree for {}: {}", plan.issue, plan.title);
        println!("  branch: {}", plan.branch);
        println!("  path:   {}", plan.path.display());
    }

    Ok(())
}
