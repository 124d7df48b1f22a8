//! Scratch directories for tests that touch the filesystem

use std::fs;
use std::path::{Path, PathBuf};

/// A directory under the system temp dir, removed again on drop
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    /// Create an empty directory; `name` must be unique per test
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("regioncrop_{}_{}", name, std::process::id()));
        fs::remove_dir_all(&path).ok();
        fs::create_dir_all(&path).unwrap();
        ScratchDir { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        fs::remove_dir_all(&self.path).ok();
    }
}
