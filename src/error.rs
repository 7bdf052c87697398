use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A file path is outside the entry directory or is not a markdown file.
    #[error("base directory {} does not contain markdown file path {}", root.display(), path.display())]
    PathContainment { root: PathBuf, path: PathBuf },

    #[error("failed to {op} {}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list files under {}", root.display())]
    Listing {
        root: PathBuf,
        #[source]
        source: fs_extra::error::Error,
    },

    /// `customUrl` or `id` was absent where a write needs it.
    #[error("article has no {0}")]
    MissingField(&'static str),

    #[error("customUrl {url:?} contains forbidden segment {segment:?}")]
    UnsafeUrl { url: String, segment: String },

    #[error("invalid front-matter in {}", path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Error {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
