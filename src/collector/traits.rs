//! Abstractions for filesystem access to enable testing and mocking.
//!
//! The `FileSystem` trait lets the procfs stats source read either the real
//! `/proc` filesystem on Linux or an in-memory tree in tests and on macOS.

use std::io;
use std::path::Path;

/// Abstraction for the filesystem operations the stats source needs.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    ///
    /// # Arguments
    /// * `path` - Path to the file to read
    ///
    /// # Returns
    /// The file contents as a string, or an I/O error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation that delegates to `std::fs`.
///
/// Use this in production to read from the actual `/proc` filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_real_fs_read_to_string() {
        let fs = RealFs::new();
        // Cargo.toml sits in the package root, which is the test cwd
        let cargo_toml = env::current_dir().unwrap().join("Cargo.toml");
        let content = fs.read_to_string(&cargo_toml).unwrap();
        assert!(content.contains("[package]"));
    }

    #[test]
    fn test_real_fs_exists() {
        let fs = RealFs::new();
        let cargo_toml = env::current_dir().unwrap().join("Cargo.toml");
        assert!(fs.exists(&cargo_toml));
        assert!(!fs.exists(Path::new("/nonexistent/path/12345")));
    }

    #[test]
    fn test_real_fs_missing_file_is_not_found() {
        let fs = RealFs::new();
        let err = fs
            .read_to_string(Path::new("/nonexistent/path/12345"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
