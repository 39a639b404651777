//! Lexical path helpers
//!
//! Paths referenced from build fragments frequently point at files that are
//! not present on the machine generating documentation (other ports, optional
//! components), so normalization is purely lexical and never touches the disk.

use std::env;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Collapses `.` and `..` segments without consulting the filesystem.
///
/// `..` directly below the root is dropped, matching how the OS resolves it.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            Component::Normal(segment) => out.push(segment),
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Joins a relative `path` onto `base` and normalizes the result.
/// Absolute paths ignore `base`.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Resolves `path` against the process working directory.
pub fn absolutize_from_cwd(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    Ok(absolutize(path, &env::current_dir()?))
}

/// Directory containing `file`, or `.` for a bare file name.
pub fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
