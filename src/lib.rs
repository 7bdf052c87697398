//! Markdown storage for blog entries.
//!
//! Each [`Article`] lives at `<entry_dir>/<customUrl>.md` as a YAML
//! front-matter header followed by the body. [`PathCodec`] maps between
//! `customUrl`s and file paths; [`ArticleCodec`] reads and writes the files.

pub mod article;
pub mod error;
pub mod path_codec;
pub mod store;
pub mod text;

pub use article::Article;
pub use error::{Error, Result};
pub use path_codec::PathCodec;
pub use store::{to_file_string, ArticleCodec};
