use super::FileSystem;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// In-memory filesystem for tests. Relative paths are rooted at `/mock`.
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, String>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            root,
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        self.files
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(path, content.to_string());
    }

    /// Returns the current content of a file, if present
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let path = self.normalize_path(path.as_ref());
        self.files
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&path)
            .cloned()
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn is_dir_prefix(&self, path: &Path) -> bool {
        self.files
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.is_file(&path) || self.is_dir_prefix(&path)
    }

    fn is_file(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.files
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains_key(&path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let normalized = self.normalize_path(path);
        self.contents(&normalized).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {:?}", normalized),
            )
        })
    }

    fn write_string(&self, path: &Path, content: &str) -> io::Result<()> {
        self.add_file(path, content);
        Ok(())
    }
}
