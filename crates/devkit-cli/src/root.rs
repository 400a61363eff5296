use devkit_core::paths::{CONFIG_FILE, GIT_DIR};
use std::path::{Path, PathBuf};

/// Resolve the directory whose `.devkit.yaml` applies.
///
/// Priority:
/// 1. `--root` flag / `DEVKIT_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.devkit.yaml`
/// 3. Walk upward from `cwd` looking for `.git` (a directory, or a file in
///    linked worktrees)
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    if let Some(dir) = find_upward(cwd, |d| d.join(CONFIG_FILE).is_file()) {
        return dir;
    }

    if let Some(dir) = find_upward(cwd, |d| d.join(GIT_DIR).exists()) {
        return dir;
    }

    cwd.to_path_buf()
}

fn find_upward(start: &Path, hit: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    start.ancestors().find(|d| hit(d)).map(Path::to_path_buf)
}
