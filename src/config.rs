use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use log::info;

pub(crate) const DEFAULT_ENTRY_DIR: &str = "entry";

#[derive(serde::Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Config {
    pub entry_dir: Option<PathBuf>,
}

impl Config {
    /// `--entry-dir` (or its env var) wins over the config file.
    pub fn entry_dir(&self, from_args: Option<&PathBuf>) -> PathBuf {
        from_args
            .or(self.entry_dir.as_ref())
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENTRY_DIR))
    }
}

pub(crate) fn load_config(config_path: &Path) -> anyhow::Result<Config> {
    if !config_path.exists() {
        info!("Config file({config_path:?}) does not exist. ignoring...");
        return Ok(Config::default());
    }

    let fd = File::open(config_path).with_context(|| format!("opening {config_path:?}"))?;
    let reader = BufReader::new(fd);
    let mut config: Config =
        serde_json::from_reader(reader).with_context(|| format!("parsing {config_path:?}"))?;

    // relative to the config file, not to the working directory
    if let (Some(entry_dir), Some(base)) = (&config.entry_dir, config_path.parent()) {
        if entry_dir.is_relative() {
            config.entry_dir = Some(base.join(entry_dir));
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("blogfs.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.entry_dir(None), PathBuf::from(DEFAULT_ENTRY_DIR));
    }

    #[test]
    fn relative_entry_dir_follows_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blogfs.json");
        std::fs::write(&path, r#"{ "entryDir": "posts" }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.entry_dir(None), dir.path().join("posts"));

        let flag = PathBuf::from("/elsewhere");
        assert_eq!(config.entry_dir(Some(&flag)), flag);
    }

    #[test]
    fn malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blogfs.json");
        std::fs::write(&path, "{ entryDir").unwrap();
        assert!(load_config(&path).is_err());
    }
}
