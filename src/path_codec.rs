//! Mapping between an entry's `customUrl` and its markdown file.
//!
//! `2020/05/12/today-blog` lives at `<root>/2020/05/12/today-blog.md`.

use std::path::{Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};

use crate::error::{Error, Result};

const EXTENSION: &str = ".md";

#[derive(Debug, Clone)]
pub struct PathCodec {
    root: PathBuf,
    /// `root` followed by exactly one separator; every entry file starts with it.
    prefix: String,
}

impl PathCodec {
    /// An empty root means the working directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let mut root = root.into();
        if root.as_os_str().is_empty() {
            root = PathBuf::from(".");
        }
        let text = root.to_string_lossy();
        let prefix = format!("{}{}", text.trim_end_matches(MAIN_SEPARATOR), MAIN_SEPARATOR);
        PathCodec { root, prefix }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Does not reject `..` or absolute URLs; see [`PathCodec::validate_url`].
    pub fn url_to_path(&self, custom_url: &str) -> PathBuf {
        let custom_path = custom_url.replace('/', MAIN_SEPARATOR_STR);
        self.root.join(custom_path + EXTENSION)
    }

    pub fn path_to_url(&self, file_path: &Path) -> Result<String> {
        let contained = || Error::PathContainment {
            root: self.root.clone(),
            path: file_path.to_path_buf(),
        };

        let custom_path = file_path
            .to_str()
            .and_then(|s| s.strip_prefix(&self.prefix))
            .and_then(|s| s.strip_suffix(EXTENSION))
            .ok_or_else(contained)?;

        let custom_url = custom_path.replace(MAIN_SEPARATOR, "/");
        // `root/../x.md` or `root//a.md` would give a URL outside the entry directory
        Self::validate_url(&custom_url).map_err(|_| contained())?;
        Ok(custom_url)
    }

    /// Rejects URLs that would escape the entry directory or collapse onto
    /// another entry: empty URLs and `""`, `.` or `..` segments.
    pub fn validate_url(custom_url: &str) -> Result<()> {
        for segment in custom_url.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(Error::UnsafeUrl {
                    url: custom_url.to_string(),
                    segment: segment.to_string(),
                });
            }
        }
        Ok(())
    }
}
