use crate::system_io::LogFs;
use crate::types::{LogCategory, LogEntry, ScanProblem, TypeFilter};
use glob::Pattern;
use std::cmp::Reverse;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

const LOG_PATTERN: &str = "*.log";

#[derive(Debug, Default)]
pub struct Catalog {
    pub entries: Vec<LogEntry>,
    pub problems: Vec<ScanProblem>,
}

/// Subdirectories of `root` covered by `filter`, raw first.
#[must_use]
pub fn search_dirs(root: &Path, filter: TypeFilter) -> Vec<PathBuf> {
    match filter {
        TypeFilter::Raw => vec![root.join("raw")],
        TypeFilter::Clean => vec![root.join("clean")],
        TypeFilter::All => vec![root.join("raw"), root.join("clean")],
    }
}

/// Anything with "raw" anywhere in its path counts as raw, including
/// `clean/raw-backup.log`.
#[must_use]
pub fn classify(path: &Path) -> LogCategory {
    if path.to_string_lossy().contains("raw") {
        LogCategory::Raw
    } else {
        LogCategory::Clean
    }
}

/// `*.log` children of `dir`, newest-first by file name. Directories are
/// dropped; entries that cannot be stat'ed are kept so callers report them.
pub fn log_files(fs: &dyn LogFs, dir: &Path) -> io::Result<Vec<PathBuf>> {
    let pattern = Pattern::new(LOG_PATTERN).map_err(io::Error::other)?;
    let mut files: Vec<PathBuf> = fs
        .list_dir(dir)?
        .into_iter()
        .filter(|p| {
            p.file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
        })
        .filter(|p| !fs.stat(p).is_ok_and(|stat| stat.is_dir))
        .collect();
    files.sort_by_key(|p| Reverse(p.file_name().map(OsString::from)));
    Ok(files)
}

/// Catalog every log file under the selected subdirectories.
///
/// Entries are grouped per directory (raw before clean) and sorted by
/// descending file name inside each group; they are not merged by time.
/// A missing root yields one problem and no entries; a missing
/// subdirectory is skipped without comment.
#[must_use]
pub fn list_logs(fs: &dyn LogFs, root: &Path, filter: TypeFilter) -> Catalog {
    let mut catalog = Catalog::default();

    if !fs.exists(root) {
        catalog.problems.push(ScanProblem::MissingRoot(root.to_path_buf()));
        return catalog;
    }

    for dir in search_dirs(root, filter) {
        if !fs.exists(&dir) {
            log::debug!("Skipping missing directory {}", dir.display());
            continue;
        }
        log::debug!("Listing {}", dir.display());

        let files = match log_files(fs, &dir) {
            Ok(files) => files,
            Err(e) => {
                log::warn!("Cannot list {}: {e}", dir.display());
                catalog.problems.push(ScanProblem::Unreadable {
                    path: dir,
                    message: e.to_string(),
                });
                continue;
            }
        };

        for path in files {
            let stat = match fs.stat(&path) {
                Ok(stat) => stat,
                Err(e) => {
                    log::warn!("Skipping {}: {e}", path.display());
                    catalog.problems.push(ScanProblem::Unreadable {
                        path,
                        message: e.to_string(),
                    });
                    continue;
                }
            };
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let category = classify(&path);
            catalog
                .entries
                .push(LogEntry::new(name, path, stat.size, stat.modified, category));
        }
    }

    catalog
}
