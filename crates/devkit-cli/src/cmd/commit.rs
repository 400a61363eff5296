use crate::output::{print_indented, print_json};
use crate::prompt::Prompter;
use devkit_core::{
    autofix::AutoFixer,
    classifier::{Classification, Classifier},
    commit::{non_empty_description, run_commit, CommitMessage, GitCommitBackend, Mode},
    git::Git,
    types::{CommitType, RepoSnapshot},
    DevkitError,
};
use std::io::{BufRead, Write};
use std::path::Path;

pub struct CommitOptions {
    pub yes: bool,
    pub dry_run: bool,
    pub json: bool,
    pub no_autofix: bool,
}

pub fn run<R: BufRead, W: Write>(
    root: &Path,
    cwd: &Path,
    args: &[String],
    opts: CommitOptions,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let git = Git::new(cwd);
    let snapshot = git.snapshot()?;
    let mode = Mode::from_args(args)?;

    let (commit_type, description, classification) = resolve(mode, &snapshot, prompter)?;
    let message = CommitMessage::compose(commit_type, &snapshot.branch, &description, &config)?;
    let rendered = message.to_string();

    if opts.dry_run {
        if opts.json {
            print_json(&serde_json::json!({
                "message": rendered,
                "commit": message,
                "branch": snapshot.branch,
                "staged_files": snapshot.staged_files,
                "classification": classification,
            }))?;
        } else {
            println!("{rendered}");
        }
        return Ok(());
    }

    prompter.say(&format!("Commit message: {rendered}"))?;
    if !opts.yes && !prompter.confirm("Proceed with commit?")? {
        return Err(DevkitError::Declined.into());
    }

    let fixer = if opts.no_autofix {
        None
    } else {
        AutoFixer::from_config(&config.autofix)
    };
    let mut backend = GitCommitBackend::new(&git, fixer, &snapshot.staged_files);
    let report = run_commit(&mut backend, &rendered)?;

    let history = git.recent_log(config.history_lines).unwrap_or_else(|e| {
        tracing::warn!("could not read history: {e}");
        String::new()
    });

    if opts.json {
        print_json(&serde_json::json!({
            "message": rendered,
            "attempts": report.attempts,
            "autofix_ran": report.autofix_ran,
            "restaged": report.restaged,
            "history": history.lines().collect::<Vec<_>>(),
        }))?;
    } else {
        if report.autofix_ran {
            println!("Committed after auto-fix retry: {rendered}");
        } else if report.attempts > 1 {
            println!("Committed on retry: {rendered}");
        } else {
            println!("Committed: {rendered}");
        }
        println!("Recent commits:");
        print_indented(&history);
    }

    Ok(())
}

/// Settle type and description for the chosen mode.
fn resolve<R: BufRead, W: Write>(
    mode: Mode,
    snapshot: &RepoSnapshot,
    prompter: &mut Prompter<R, W>,
) -> anyhow::Result<(CommitType, String, Option<Classification>)> {
    match mode {
        Mode::Explicit(commit_type, description) => Ok((commit_type, description, None)),
        Mode::Described(description) => {
            let classification = Classifier::default().classify(snapshot);
            Ok((classification.commit_type, description, Some(classification)))
        }
        Mode::Interactive => {
            let classification = Classifier::default().classify(snapshot);
            let suggested = classification.commit_type;
            prompter.say(&format!("Suggested type: {suggested}"))?;

            let answer = prompter
                .ask("Commit type", Some(suggested.as_str()))?
                .ok_or(DevkitError::MissingType)?;
            let commit_type: CommitType = answer.parse()?;

            let description = prompter
                .ask("Description", None)?
                .ok_or(DevkitError::MissingDescription)?;
            let description = non_empty_description(&description)?;

            Ok((commit_type, description, Some(classification)))
        }
    }
}
