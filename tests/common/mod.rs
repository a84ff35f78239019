//! Shared helpers for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;

/// A scratch directory holding configuration and schema files.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Write `content` to `name` inside the fixture and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Path inside the fixture that is never created.
    #[allow(dead_code)]
    pub fn missing(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
