//! Markdown file exporter.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Default export file name.
pub const DEFAULT_FILE_NAME: &str = "strategy_canvas.md";

/// Errors from writing an export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("could not create output directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Writes rendered canvases to `<directory>/<file_name>`.
///
/// An existing export is replaced. The content is first written to a
/// sibling `.tmp` file and renamed into place, so a failed write never
/// leaves a truncated canvas behind.
#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    directory: PathBuf,
    file_name: String,
}

impl MarkdownExporter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Path the export is written to.
    pub fn target(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    pub fn export(&self, rendered: &str) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.directory).map_err(|source| ExportError::CreateDir {
            path: self.directory.clone(),
            source,
        })?;

        let target = self.target();
        let staging = staging_path(&target);
        let write_err = |source| ExportError::Write {
            path: target.clone(),
            source,
        };
        fs::write(&staging, rendered).map_err(write_err)?;
        if let Err(source) = fs::rename(&staging, &target) {
            let _ = fs::remove_file(&staging);
            return Err(write_err(source));
        }

        info!("Exported canvas to {}", target.display());
        Ok(target)
    }
}

fn staging_path(target: &Path) -> PathBuf {
    let mut name = target.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    target.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = MarkdownExporter::new(dir.path().join("canvases"));

        let path = exporter.export("# Strategy Canvas\n").unwrap();

        assert_eq!(path, dir.path().join("canvases").join("strategy_canvas.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Strategy Canvas\n");
        assert!(!path.with_file_name("strategy_canvas.md.tmp").exists());
    }

    #[test]
    fn test_export_replaces_previous() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = MarkdownExporter::new(dir.path()).with_file_name("bakery.md");

        exporter.export("first").unwrap();
        let path = exporter.export("second").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "second");
    }

    #[test]
    fn test_export_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let err = MarkdownExporter::new(&blocker).export("content").unwrap_err();
        assert!(matches!(err, ExportError::CreateDir { .. }));
    }
}
