//! Writes generated page source into an output directory

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Directory under the output root that receives the page file
pub const PAGE_DIR: &str = "src";

/// File name of the generated page component
pub const PAGE_FILE_NAME: &str = "App.jsx";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to move {from} into place at {to}: {source}")]
    Replace {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Staging file the page is written to before it replaces the real one
fn staging_path(dir: &Path) -> PathBuf {
    dir.join(format!(".{}.tmp", PAGE_FILE_NAME))
}

/// Path the page file is written to for a given output root
pub fn page_path(output_root: &Path) -> PathBuf {
    output_root.join(PAGE_DIR).join(PAGE_FILE_NAME)
}

/// Write the page source to `<output_root>/src/App.jsx`.
///
/// Creates missing directories and replaces the file if present. The source is staged
/// in a sibling file and renamed over the target, so a failed write never leaves a
/// truncated page behind. Nothing else under the output root is read, removed, or
/// changed. Any `\r\n` is written as `\n`.
pub fn write_page(source: &str, output_root: &Path) -> Result<PathBuf, WriteError> {
    let dir = output_root.join(PAGE_DIR);
    fs::create_dir_all(&dir).map_err(|source| WriteError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    let path = dir.join(PAGE_FILE_NAME);
    let staging = staging_path(&dir);
    let contents = source.replace("\r\n", "\n");
    fs::write(&staging, contents.as_bytes()).map_err(|source| {
        let _ = fs::remove_file(&staging);
        WriteError::Write {
            path: staging.clone(),
            source,
        }
    })?;

    fs::rename(&staging, &path).map_err(|source| {
        let _ = fs::remove_file(&staging);
        WriteError::Replace {
            from: staging.clone(),
            to: path.clone(),
            source,
        }
    })?;

    info!(path = %path.display(), bytes = contents.len(), "wrote page source");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_path() {
        let path = page_path(Path::new("/tmp/site"));
        assert_eq!(path, PathBuf::from("/tmp/site/src/App.jsx"));
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("out");
        let path = write_page("export default App;\n", &root).expect("Should write");
        assert_eq!(path, root.join("src").join("App.jsx"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "export default App;\n");
    }

    #[test]
    fn test_write_is_idempotent_and_leaves_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("index.css"), "body {}").unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        write_page("a\n", dir.path()).unwrap();
        let first = fs::read(page_path(dir.path())).unwrap();
        write_page("a\n", dir.path()).unwrap();
        let second = fs::read(page_path(dir.path())).unwrap();
        assert_eq!(first, second);

        let mut names: Vec<_> = fs::read_dir(&src)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, vec!["App.jsx", "index.css"]);
        assert_eq!(fs::read_to_string(src.join("index.css")).unwrap(), "body {}");
        assert_eq!(fs::read_to_string(dir.path().join("package.json")).unwrap(), "{}");
    }

    #[test]
    fn test_failed_replace_keeps_target_and_cleans_staging() {
        let dir = tempfile::tempdir().unwrap();
        let occupied = page_path(dir.path());
        fs::create_dir_all(occupied.join("keep")).unwrap();

        let result = write_page("export default App;\n", dir.path());
        assert!(matches!(result, Err(WriteError::Replace { .. })));
        assert!(occupied.join("keep").is_dir());

        let names: Vec<_> = fs::read_dir(dir.path().join(PAGE_DIR))
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec![PAGE_FILE_NAME.to_string()]);
    }

    #[test]
    fn test_write_replaces_existing_page() {
        let dir = tempfile::tempdir().unwrap();
        write_page("first version with more text\n", dir.path()).unwrap();
        let path = write_page("second\n", dir.path()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        assert!(!staging_path(&dir.path().join(PAGE_DIR)).exists());
    }

    #[test]
    fn test_write_strips_carriage_returns() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_page("line\r\nnext\r\n", dir.path()).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "line\nnext\n");
    }
}
