use std::path::{Path, PathBuf};

/// Expand a leading `~` to the invoking user's home directory.
/// `~user` forms and paths without a tilde are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(rest) = path.strip_prefix('~') else {
        return PathBuf::from(path);
    };
    if !rest.is_empty() && !rest.starts_with('/') {
        return PathBuf::from(path);
    }
    match dirs::home_dir() {
        Some(home) => join_home(&home, rest),
        None => PathBuf::from(path),
    }
}

fn join_home(home: &Path, rest: &str) -> PathBuf {
    let rest = rest.trim_start_matches('/');
    if rest.is_empty() {
        home.to_path_buf()
    } else {
        home.join(rest)
    }
}
