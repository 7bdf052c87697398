use chrono::{DateTime, Utc};

/// Title used when an entry file carries none.
pub const PLACEHOLDER_TITLE: &str = "No Title";

/// One blog entry, as stored in `<entry_dir>/<custom_url>.md`.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    /// Slash-separated path below the entry directory, without `.md`.
    pub custom_url: Option<String>,
    pub date: DateTime<Utc>,
    /// Mirrored to the file's modification time.
    pub edited_date: DateTime<Utc>,
    pub id: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    pub text: String,
}
