//! Level config loading.

use std::fs;
use std::path::Path;

use gridcast_core::level::LevelConfig;

use crate::error::{Result, ToolError};

/// Read and validate a RON level config.
///
/// # Errors
///
/// Returns [`ToolError::Io`] if the file cannot be read and
/// [`ToolError::Config`] if it does not parse or fails validation.
pub fn load_level_config(path: &Path) -> Result<LevelConfig> {
    let text = fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = LevelConfig::from_ron_str(&text)
        .and_then(|config| config.validate().map(|()| config))
        .map_err(|source| ToolError::Config {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        path = %path.display(),
        width = config.width,
        height = config.height,
        seed = config.seed,
        "Loaded level config"
    );
    Ok(config)
}

/// The config at `path`, or the defaults when no path is given.
///
/// # Errors
///
/// See [`load_level_config`].
pub fn resolve_level_config(path: Option<&Path>) -> Result<LevelConfig> {
    path.map_or_else(|| Ok(LevelConfig::default()), load_level_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_path_uses_defaults() {
        assert_eq!(resolve_level_config(None).unwrap(), LevelConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(width: 10, height: 6, seed: 99)").unwrap();

        let config = load_level_config(file.path()).unwrap();
        assert_eq!((config.width, config.height, config.seed), (10, 6, 99));
        assert_eq!(config.palette, LevelConfig::default().palette);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_level_config(&dir.path().join("absent.ron")).unwrap_err();
        assert!(matches!(err, ToolError::Io { .. }));
    }

    #[test]
    fn test_zero_width_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(width: 0)").unwrap();

        let err = load_level_config(file.path()).unwrap_err();
        assert!(matches!(err, ToolError::Config { .. }));
        assert!(err.to_string().contains("Invalid grid dimensions"));
    }
}
