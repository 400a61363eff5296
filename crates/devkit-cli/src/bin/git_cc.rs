use anyhow::Context;
use clap::Parser;
use devkit_cli::{cmd, prompt::Prompter, root};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "git-cc",
    about = "Commit staged changes with a conventional-commit message",
    long_about = "Commit staged changes with a conventional-commit message.\n\n\
        With no arguments, suggests a type from the staged changes and prompts for \
        type and description. With one argument, it is the description and the type \
        is detected. With two, they are the type and the description.\n\n\
        If the commit is rejected (e.g. by a pre-commit hook), the auto-fix tool is \
        run on the staged files and the commit is retried once.",
    version
)]
struct Cli {
    /// [type] [description]
    #[arg(value_name = "ARGS")]
    args: Vec<String>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    yes: bool,

    /// Print the composed message without committing
    #[arg(long)]
    dry_run: bool,

    /// Output as JSON
    #[arg(long, short = 'j')]
    json: bool,

    /// Do not run the auto-fix tool before retrying a rejected commit
    #[arg(long)]
    no_autofix: bool,

    /// Directory holding .devkit.yaml (default: auto-detect)
    #[arg(long, env = "DEVKIT_ROOT")]
    root: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() {
    let cli: Cli = devkit_cli::parse_args();
    devkit_cli::init_tracing(cli.verbose);
    devkit_cli::exit_on_error(run(cli));
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let root = root::resolve_root(cli.root.as_deref(), &cwd);

    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stderr());

    cmd::commit::run(
        &root,
        &cwd,
        &cli.args,
        cmd::commit::CommitOptions {
            yes: cli.yes,
            dry_run: cli.dry_run,
            json: cli.json,
            no_autofix: cli.no_autofix,
        },
        &mut prompter,
    )
}
