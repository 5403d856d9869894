use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum ScaffoldError {
    #[error("{0}")]
    Usage(String),

    #[error("Title {0:?} produced an empty slug")]
    EmptySlug(String),

    #[error("Page file {} already exists", .0.display())]
    PageExists(PathBuf),

    #[error("Content file {} already exists", .0.display())]
    ContentExists(PathBuf),

    #[error("Directory {} does not exist", .0.display())]
    MissingDirectory(PathBuf),

    #[error("I/O error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
