use chrono::{DateTime, Local};
use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

const BYTES_PER_MB: f64 = 1_024.0 * 1_024.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Raw,
    Clean,
}

impl LogCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogCategory::Raw => "raw",
            LogCategory::Clean => "clean",
        }
    }
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which subdirectories of the log root get scanned (`--type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TypeFilter {
    Raw,
    Clean,
    #[default]
    All,
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeFilter::Raw => "raw",
            TypeFilter::Clean => "clean",
            TypeFilter::All => "all",
        })
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub name: String,
    #[allow(dead_code)]
    pub path: PathBuf,
    pub size: u64,
    pub modified: DateTime<Local>,
    pub size_mb: f64,
    pub category: LogCategory,
}

impl LogEntry {
    #[must_use]
    pub fn new(
        name: String,
        path: PathBuf,
        size: u64,
        modified: DateTime<Local>,
        category: LogCategory,
    ) -> Self {
        LogEntry {
            name,
            path,
            size,
            modified,
            size_mb: size_in_mb(size),
            category,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchMatch {
    pub file: String,
    pub line: usize,
    pub content: String,
    pub category: LogCategory,
}

/// Something that went wrong while scanning; reported, never fatal.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanProblem {
    MissingRoot(PathBuf),
    Unreadable { path: PathBuf, message: String },
}

impl fmt::Display for ScanProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanProblem::MissingRoot(dir) => {
                write!(f, "Log directory {} does not exist", dir.display())
            }
            ScanProblem::Unreadable { path, message } => {
                write!(f, "Error reading {}: {message}", path.display())
            }
        }
    }
}

/// Bytes to megabytes, rounded to two decimals.
#[must_use]
pub fn size_in_mb(size: u64) -> f64 {
    (size as f64 / BYTES_PER_MB * 100.0).round() / 100.0
}
