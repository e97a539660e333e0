//! In-memory mock filesystem for testing the stats source without real `/proc`.

use crate::collector::traits::FileSystem;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory filesystem for testing.
///
/// Stores files and directories in memory, allowing tests to simulate
/// various `/proc` states (different core counts, interfaces coming and
/// going, unreadable files) without needing actual Linux access.
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    /// Map from path to file contents.
    files: HashMap<PathBuf, String>,
    /// Set of known directories.
    directories: HashSet<PathBuf>,
}

impl MockFs {
    /// Creates a new empty mock filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with the given content, replacing any previous content.
    ///
    /// Parent directories are automatically created.
    pub fn add_file(&mut self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();

        let mut parent = path.parent();
        while let Some(p) = parent {
            if !p.as_os_str().is_empty() {
                self.directories.insert(p.to_path_buf());
            }
            parent = p.parent();
        }

        self.files.insert(path, content.into());
    }

    /// Removes a file. Returns `true` if it existed.
    pub fn remove_file(&mut self, path: impl AsRef<Path>) -> bool {
        self.files.remove(path.as_ref()).is_some()
    }

    /// Loads a mock filesystem from a directory snapshot, mounting it at
    /// `/proc`.
    ///
    /// This is useful for regression tests with captured `/proc` files.
    pub fn from_snapshot(dir: &Path) -> io::Result<Self> {
        let mut fs = Self::new();
        load_directory_recursive(&mut fs, dir, Path::new("/proc"))?;
        Ok(fs)
    }
}

fn load_directory_recursive(
    fs: &mut MockFs,
    real_path: &Path,
    virtual_path: &Path,
) -> io::Result<()> {
    fs.directories.insert(virtual_path.to_path_buf());

    for entry in std::fs::read_dir(real_path)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let real_child = entry.path();
        let virtual_child = virtual_path.join(entry.file_name());

        if file_type.is_dir() {
            load_directory_recursive(fs, &real_child, &virtual_child)?;
        } else if file_type.is_file() {
            // Skip binary files
            if let Ok(content) = std::fs::read_to_string(&real_child) {
                fs.add_file(&virtual_child, content);
            }
        }
    }
    Ok(())
}

impl FileSystem for MockFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("file not found: {:?}", path),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.directories.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_fs_add_file() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/meminfo", "MemTotal: 16384 kB\n");

        assert!(fs.exists(Path::new("/proc/meminfo")));
        assert!(fs.exists(Path::new("/proc")));

        let content = fs.read_to_string(Path::new("/proc/meminfo")).unwrap();
        assert_eq!(content, "MemTotal: 16384 kB\n");
    }

    #[test]
    fn test_mock_fs_remove_file() {
        let mut fs = MockFs::new();
        fs.add_file("/proc/net/dev", "");

        assert!(fs.remove_file("/proc/net/dev"));
        assert!(!fs.remove_file("/proc/net/dev"));
        assert!(!fs.exists(Path::new("/proc/net/dev")));
        // Directory stays behind
        assert!(fs.exists(Path::new("/proc/net")));
    }

    #[test]
    fn test_mock_fs_from_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("loadavg"), "0.50 0.30 0.10 1/100 42\n").unwrap();
        std::fs::create_dir_all(dir.path().join("sys/kernel")).unwrap();
        std::fs::write(dir.path().join("sys/kernel/hostname"), "snap-host\n").unwrap();

        let fs = MockFs::from_snapshot(dir.path()).unwrap();

        assert_eq!(
            fs.read_to_string(Path::new("/proc/loadavg")).unwrap(),
            "0.50 0.30 0.10 1/100 42\n"
        );
        assert!(fs.exists(Path::new("/proc/sys/kernel")));
        assert_eq!(
            fs.read_to_string(Path::new("/proc/sys/kernel/hostname")).unwrap(),
            "snap-host\n"
        );
    }

    #[test]
    fn test_mock_fs_not_found() {
        let fs = MockFs::new();
        let result = fs.read_to_string(Path::new("/nonexistent"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
