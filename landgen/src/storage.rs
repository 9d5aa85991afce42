//! Durable storage seam
//!
//! The pipeline reads one command file and writes one output file. Both go
//! through [`Storage`] so runs can be checked for "no read" / "no write".

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

/// File-level storage operations used by the pipeline
pub trait Storage {
    /// True when anything occupies the path, readable or not
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the file contents, creating the file if needed
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write(path, contents)
    }
}

/// Local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl Storage for LocalStorage {
    fn exists(&self, path: &Path) -> bool {
        // Anything at the path counts; a directory then fails on read
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        debug!(?path, "LocalStorage::read_to_string: called");
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        debug!(?path, bytes = contents.len(), "LocalStorage::write: called");
        fs::write(path, contents)
    }
}

#[cfg(test)]
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// In-memory storage that records every access
    #[derive(Debug, Default)]
    pub struct MemoryStorage {
        files: Mutex<HashMap<PathBuf, String>>,
        reads: Mutex<Vec<PathBuf>>,
        writes: Mutex<Vec<PathBuf>>,
        fail_writes: bool,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
            self.files.lock().unwrap().insert(path.into(), contents.into());
            self
        }

        /// Every write fails with PermissionDenied
        pub fn read_only(mut self) -> Self {
            self.fail_writes = true;
            self
        }

        pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
            self.files.lock().unwrap().get(path.as_ref()).cloned()
        }

        pub fn reads(&self) -> Vec<PathBuf> {
            self.reads.lock().unwrap().clone()
        }

        pub fn writes(&self) -> Vec<PathBuf> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl Storage for MemoryStorage {
        fn exists(&self, path: &Path) -> bool {
            self.reads.lock().unwrap().push(path.to_path_buf());
            self.files.lock().unwrap().contains_key(path)
        }

        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.reads.lock().unwrap().push(path.to_path_buf());
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
        }

        fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
            self.writes.lock().unwrap().push(path.to_path_buf());
            if self.fail_writes {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only storage"));
            }
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_storage_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("index.html");

        assert!(!LocalStorage.exists(&path));
        LocalStorage.write(&path, "<html>first</html>").unwrap();
        assert!(LocalStorage.exists(&path));

        LocalStorage.write(&path, "<html>second</html>").unwrap();
        assert_eq!(LocalStorage.read_to_string(&path).unwrap(), "<html>second</html>");
    }

    #[test]
    fn test_local_storage_directory_exists_but_is_unreadable() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("command.json");
        std::fs::create_dir_all(&path).unwrap();

        assert!(LocalStorage.exists(&path));
        assert!(LocalStorage.read_to_string(&path).is_err());
    }

    #[test]
    fn test_local_storage_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing").join("index.html");

        assert!(LocalStorage.write(&path, "<html></html>").is_err());
    }
}
