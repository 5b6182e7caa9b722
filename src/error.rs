use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Log file {} not found", .0.display())]
    NotFound(PathBuf),
}

impl ViewerError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ViewerError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
