use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Every `*.md` file below `root`, at any depth.
pub(super) fn list_markdown_files(root: &Path) -> Result<Vec<PathBuf>> {
    let content = fs_extra::dir::get_dir_content(root).map_err(|source| Error::Listing {
        root: root.to_path_buf(),
        source,
    })?;

    Ok(content
        .files
        .into_iter()
        .map(PathBuf::from)
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_markdown_at_any_depth() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("2020/05")).unwrap();
        std::fs::write(dir.path().join("top.md"), "").unwrap();
        std::fs::write(dir.path().join("2020/05/deep.md"), "").unwrap();
        std::fs::write(dir.path().join("2020/notes.txt"), "").unwrap();

        let mut files = list_markdown_files(dir.path()).unwrap();
        files.sort();
        assert_eq!(
            files,
            vec![dir.path().join("2020/05/deep.md"), dir.path().join("top.md")]
        );
    }

    #[test]
    fn missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_markdown_files(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::Listing { .. }));
    }
}
