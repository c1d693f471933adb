//! Temporary file handling for tests
//!
//! Files live in a `tempfile` directory that is deleted when the wrapper is
//! dropped.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// RAII wrapper around a temporary directory holding survey files
pub struct TempSurveyDir {
    dir: TempDir,
}

impl TempSurveyDir {
    pub fn new(test_name: &str) -> std::io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(&format!("surveyrs_test_{}_", test_name))
            .tempdir()?;
        Ok(TempSurveyDir { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of a file named `file_name` inside the directory
    pub fn file(&self, file_name: &str) -> PathBuf {
        self.dir.path().join(file_name)
    }
}

/// Write `contents` to `file_name` inside `dir` and return its path
pub fn write_temp_file(dir: &TempSurveyDir, file_name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.file(file_name);
    fs::write(&path, contents).expect("Failed to write test file");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_cleanup() {
        let path;
        {
            let dir = TempSurveyDir::new("cleanup").unwrap();
            path = write_temp_file(&dir, "a.csv", b"a\n1\n");
            assert!(path.exists(), "File should exist while the directory is in scope");
        }
        assert!(!path.exists(), "File should be deleted after drop");
    }
}
