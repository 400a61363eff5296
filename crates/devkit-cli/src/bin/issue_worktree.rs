use anyhow::Context;
use clap::Parser;
use devkit_cli::{cmd, root};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "issue-worktree",
    about = "Create a git worktree and branch for a GitHub issue",
    version
)]
struct Cli {
    /// https://github.com/<owner>/<repo>/issues/<number>
    url: String,

    /// Use this title instead of fetching it with gh
    #[arg(long)]
    title: Option<String>,

    /// Print the branch and path without creating anything
    #[arg(long)]
    dry_run: bool,

    /// Output as JSON
    #[arg(long, short = 'j')]
    json: bool,

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

    cmd::worktree::run(
        &root,
        &cwd,
        &cli.url,
        cmd::worktree::WorktreeOptions {
            title: cli.title.as_deref(),
            dry_run: cli.dry_run,
            json: cli.json,
        },
    )
}
