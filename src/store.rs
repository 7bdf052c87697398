//! Reading and writing [`Article`]s as markdown files under the entry directory.

use std::{
    fs::{self, File, FileTimes},
    io::Write,
    path::{Path, PathBuf},
    time::SystemTime,
};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde_yaml::Value;

use crate::{
    article::{Article, PLACEHOLDER_TITLE},
    error::{Error, Result},
    path_codec::PathCodec,
    text::normalize_line_endings,
};

mod frontmatter;
mod listing;

#[derive(Debug, Clone)]
pub struct ArticleCodec {
    paths: PathCodec,
}

impl ArticleCodec {
    pub fn new(entry_dir: impl Into<PathBuf>) -> Self {
        ArticleCodec {
            paths: PathCodec::new(entry_dir),
        }
    }

    pub fn paths(&self) -> &PathCodec {
        &self.paths
    }

    pub fn read(&self, file_path: &Path) -> Result<Article> {
        let content =
            fs::read_to_string(file_path).map_err(|e| Error::io("read", file_path, e))?;
        let frontmatter::FrontMatter { attributes, body } =
            frontmatter::parse(&content).map_err(|source| Error::FrontMatter {
                path: file_path.to_path_buf(),
                source,
            })?;

        let title = attributes
            .get("title")
            .and_then(frontmatter::scalar_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| PLACEHOLDER_TITLE.to_string());
        let date = match attributes.get("date") {
            None | Some(Value::Null) => Utc::now(),
            Some(value) => frontmatter::parse_date(value).unwrap_or_else(|| {
                warn!("{file_path:?}: unreadable date {value:?}, using the current time");
                Utc::now()
            }),
        };
        let categories = attributes
            .get("categories")
            .map(frontmatter::string_list)
            .unwrap_or_default();
        let id = attributes.get("id").and_then(frontmatter::scalar_text);

        let custom_url = self.paths.path_to_url(file_path)?;
        let edited_date = fs::metadata(file_path)
            .and_then(|m| m.modified())
            .map(DateTime::<Utc>::from)
            .map_err(|e| Error::io("stat", file_path, e))?;

        debug!("read {file_path:?} as {custom_url}");
        Ok(Article {
            title,
            custom_url: Some(custom_url),
            date,
            edited_date,
            id,
            categories,
            text: normalize_line_endings(&body),
        })
    }

    /// Reads the entry stored for `custom_url`.
    pub fn read_url(&self, custom_url: &str) -> Result<Article> {
        PathCodec::validate_url(custom_url)?;
        self.read(&self.paths.url_to_path(custom_url))
    }

    /// Reads every entry under the entry directory, ordered by `customUrl`.
    /// Fails as a whole if any single file cannot be read.
    pub fn reads(&self) -> Result<Vec<Article>> {
        let files = listing::list_markdown_files(self.paths.root())?;
        let mut articles = files
            .par_iter()
            .map(|file_path| self.read(file_path))
            .collect::<Result<Vec<_>>>()?;
        articles.sort_by(|a, b| a.custom_url.cmp(&b.custom_url));

        info!(
            "read {} articles from {:?}",
            articles.len(),
            self.paths.root()
        );
        Ok(articles)
    }

    /// Writes `article` to its file and stamps the file with `edited_date`.
    pub fn write(&self, article: &Article) -> Result<PathBuf> {
        let custom_url = article
            .custom_url
            .as_deref()
            .ok_or(Error::MissingField("customUrl"))?;
        PathCodec::validate_url(custom_url)?;
        let file_string = to_file_string(article)?;

        let file_path = self.paths.url_to_path(custom_url);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io("create directory", parent, e))?;
        }

        let mut file = File::create(&file_path).map_err(|e| Error::io("write", &file_path, e))?;
        file.write_all(file_string.as_bytes())
            .map_err(|e| Error::io("write", &file_path, e))?;
        // keep the remote edit time instead of the time of this sync
        let times = FileTimes::new()
            .set_accessed(SystemTime::now())
            .set_modified(article.edited_date.into());
        file.set_times(times)
            .map_err(|e| Error::io("set times of", &file_path, e))?;

        debug!("wrote {custom_url} to {file_path:?}");
        Ok(file_path)
    }

    pub fn delete(&self, article: &Article) -> Result<PathBuf> {
        let custom_url = article
            .custom_url
            .as_deref()
            .ok_or(Error::MissingField("customUrl"))?;
        self.delete_url(custom_url)
    }

    /// Removes the file for `custom_url`. A missing file is an error.
    pub fn delete_url(&self, custom_url: &str) -> Result<PathBuf> {
        PathCodec::validate_url(custom_url)?;

        let file_path = self.paths.url_to_path(custom_url);
        fs::remove_file(&file_path).map_err(|e| Error::io("remove", &file_path, e))?;

        info!("deleted {custom_url} ({file_path:?})");
        Ok(file_path)
    }
}

/// The exact file content [`ArticleCodec::write`] stores for `article`.
pub fn to_file_string(article: &Article) -> Result<String> {
    let id = article.id.as_deref().ok_or(Error::MissingField("id"))?;
    Ok(frontmatter::render(article, id))
}
