use crate::reader::for_each_line;
use crate::scanner::{classify, log_files, search_dirs};
use crate::system_io::LogFs;
use crate::types::{ScanProblem, SearchMatch, TypeFilter};
use std::path::Path;

pub const DEFAULT_MAX_RESULTS: usize = 50;

#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub matches: Vec<SearchMatch>,
    pub problems: Vec<ScanProblem>,
}

/// Case-insensitive substring search over every log file in scope.
///
/// The cap is checked after each match is recorded and only abandons the
/// file being read. Once it has been reached, every later file that has a
/// match still contributes its first one, so the total can exceed
/// `max_results` by one per remaining matching file.
#[must_use]
pub fn search_logs(
    fs: &dyn LogFs,
    root: &Path,
    query: &str,
    max_results: usize,
    filter: TypeFilter,
) -> SearchOutcome {
    let mut outcome = SearchOutcome::default();

    if !fs.exists(root) {
        outcome.problems.push(ScanProblem::MissingRoot(root.to_path_buf()));
        return outcome;
    }

    let needle = query.to_lowercase();

    for dir in search_dirs(root, filter) {
        if !fs.exists(&dir) {
            continue;
        }

        let files = match log_files(fs, &dir) {
            Ok(files) => files,
            Err(e) => {
                log::warn!("Cannot list {}: {e}", dir.display());
                outcome.problems.push(ScanProblem::Unreadable {
                    path: dir,
                    message: e.to_string(),
                });
                continue;
            }
        };

        for path in files {
            let file = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let category = classify(&path);
            let before = outcome.matches.len();

            let scanned = fs.open_for_read(&path).and_then(|reader| {
                let mut line_no = 0;
                for_each_line(reader, |line| {
                    line_no += 1;
                    if !line.to_lowercase().contains(&needle) {
                        return true;
                    }
                    outcome.matches.push(SearchMatch {
                        file: file.clone(),
                        line: line_no,
                        content: line,
                        category,
                    });
                    outcome.matches.len() < max_results
                })
            });

            match scanned {
                Ok(()) => log::debug!(
                    "{}: {} matches",
                    path.display(),
                    outcome.matches.len() - before
                ),
                Err(e) => {
                    log::warn!("Skipping {}: {e}", path.display());
                    outcome.problems.push(ScanProblem::Unreadable {
                        path,
                        message: e.to_string(),
                    });
                }
            }
        }
    }

    outcome
}
