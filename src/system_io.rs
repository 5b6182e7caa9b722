use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy)]
pub struct FileStat {
    pub size: u64,
    pub modified: DateTime<Local>,
    pub is_dir: bool,
}

/// The filesystem calls the lister, reader and searcher depend on.
pub trait LogFs {
    fn exists(&self, path: &Path) -> bool;

    /// Direct children of `dir`, in no particular order.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    fn stat(&self, path: &Path) -> io::Result<FileStat>;

    fn open_for_read(&self, path: &Path) -> io::Result<Box<dyn BufRead>>;
}

/// The real disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFs;

impl LogFs for OsFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut children = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(io::Error::from)?;
            children.push(entry.into_path());
        }
        Ok(children)
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = fs::metadata(path)?;
        // UNIX_EPOCH rather than now() so an unreadable mtime never looks recent
        let modified: DateTime<Local> = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH).into();
        Ok(FileStat {
            size: metadata.len(),
            modified,
            is_dir: metadata.is_dir(),
        })
    }

    fn open_for_read(&self, path: &Path) -> io::Result<Box<dyn BufRead>> {
        let file = File::open(path)?;
        Ok(Box::new(BufReader::new(file)))
    }
}
