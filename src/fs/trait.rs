//! FileSystem trait definition

use std::io;
use std::path::Path;

/// Abstraction over the file operations the generator performs, for testability
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a regular file
    fn is_file(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Replace the file contents with `content`, creating the file if needed
    fn write_string(&self, path: &Path, content: &str) -> io::Result<()>;
}
