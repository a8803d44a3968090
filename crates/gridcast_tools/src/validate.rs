//! Level config validation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::load_level_config;
use crate::error::{Result, ToolError};

/// Validate one `.ron` level config, or every `.ron` file directly inside a
/// directory.
///
/// Returns the files that were checked, in sorted order.
///
/// # Errors
///
/// Returns the first read, parse or validation failure.
pub fn validate_path(path: &Path) -> Result<Vec<PathBuf>> {
    let files = if path.is_dir() {
        ron_files_in(path)?
    } else {
        vec![path.to_path_buf()]
    };

    for file in &files {
        let config = load_level_config(file)?;
        tracing::info!(
            file = %file.display(),
            width = config.width,
            height = config.height,
            "Level config ok"
        );
    }
    Ok(files)
}

fn ron_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source: std::io::Error| ToolError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "ron") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_of_configs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.ron"), "(width: 4, height: 4)").unwrap();
        fs::write(dir.path().join("a.ron"), "(seed: 7)").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a config").unwrap();

        let checked = validate_path(dir.path()).unwrap();
        let names: Vec<_> = checked
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.ron", "b.ron"]);
    }

    #[test]
    fn test_empty_directory_checks_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_path(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_bad_file_fails_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("good.ron"), "()").unwrap();
        fs::write(dir.path().join("bad.ron"), "(width: \"wide\")").unwrap();

        let err = validate_path(dir.path()).unwrap_err();
        assert!(matches!(err, ToolError::Config { .. }));
    }

    #[test]
    fn test_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("level.ron");
        fs::write(&file, "(width: 3, height: 2, seed: 1)").unwrap();
        assert_eq!(validate_path(&file).unwrap(), vec![file]);
    }
}
