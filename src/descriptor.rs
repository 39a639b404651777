//! Top-level makefile resolution
//!
//! A project makefile declares where the HAL tree lives (`CHIBIOS = ../..`)
//! and includes exactly one board `platform.mk`. Both must appear exactly
//! once; anything else is reported before any output is produced.

use crate::fragment::{RootPath, DEFAULT_VARIABLE};
use crate::fs::FileSystem;
use crate::paths;
use regex::Regex;
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name the top-level fragment include must end with
pub const PLATFORM_FRAGMENT: &str = "platform.mk";

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Path to {variable} is not defined in {path}")]
    MissingRootPath { variable: String, path: PathBuf },
    #[error("{variable} is declared with an empty value in {path}")]
    EmptyRootPath { variable: String, path: PathBuf },
    #[error("Multiple definitions of {variable} in {path}: {}", .matches.join(", "))]
    MultipleRootPaths {
        variable: String,
        path: PathBuf,
        matches: Vec<String>,
    },
    #[error("No platform.mk included in {path}")]
    MissingPlatform { path: PathBuf },
    #[error("Multiple platform.mk included in {path}: {}", .matches.join(", "))]
    MultiplePlatforms { path: PathBuf, matches: Vec<String> },
    #[error("Failed to read descriptor {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to resolve working directory: {0}")]
    WorkingDirectory(io::Error),
    #[error("Invalid descriptor pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Root path and platform fragment extracted from a descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDescriptor {
    pub root: RootPath,
    pub platform: PathBuf,
}

/// Extracts the root-variable declaration and platform include from a
/// top-level makefile
#[derive(Debug, Clone)]
pub struct DescriptorResolver {
    variable: String,
    root_re: Regex,
    include_re: Regex,
}

impl DescriptorResolver {
    pub fn new(variable: &str) -> Result<Self, DescriptorError> {
        // NAME =, NAME :=, NAME ?= with optional surrounding blanks
        let root_re = Regex::new(&format!(
            r"(?m)^{}[ \t]*[:?]?=[ \t]*(.*?)[ \t\r]*$",
            regex::escape(variable)
        ))?;
        let include_re = Regex::new(&format!(
            r"(?m)^include[ \t]+(\S*/{})\b",
            regex::escape(PLATFORM_FRAGMENT)
        ))?;

        Ok(Self {
            variable: variable.to_string(),
            root_re,
            include_re,
        })
    }

    /// Reads and resolves the descriptor at `path`.
    ///
    /// Relative descriptor paths are taken from the working directory.
    pub fn resolve<F: FileSystem + ?Sized>(
        &self,
        fs: &F,
        path: &Path,
    ) -> Result<ResolvedDescriptor, DescriptorError> {
        let path =
            paths::absolutize_from_cwd(path).map_err(DescriptorError::WorkingDirectory)?;
        let content = fs
            .read_to_string(&path)
            .map_err(|source| DescriptorError::Read {
                path: path.clone(),
                source,
            })?;
        self.parse(&path, &content)
    }

    /// Resolves descriptor `content` as if read from the absolute `path`.
    pub fn parse(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<ResolvedDescriptor, DescriptorError> {
        let base = paths::parent_dir(path);

        let root_raw = self.single_root(path, content)?;
        let platform_raw = self.single_platform(path, content)?;

        let root = RootPath::new(
            self.variable.clone(),
            paths::absolutize(Path::new(&root_raw), &base),
        );
        let platform = root.resolve(&platform_raw, &base);

        debug!(
            root = %root.path().display(),
            platform = %platform.display(),
            "Resolved descriptor"
        );
        Ok(ResolvedDescriptor { root, platform })
    }

    fn single_root(&self, path: &Path, content: &str) -> Result<String, DescriptorError> {
        let mut matches = capture_all(&self.root_re, content);
        match matches.len() {
            0 => Err(DescriptorError::MissingRootPath {
                variable: self.variable.clone(),
                path: path.to_path_buf(),
            }),
            1 if matches[0].is_empty() => Err(DescriptorError::EmptyRootPath {
                variable: self.variable.clone(),
                path: path.to_path_buf(),
            }),
            1 => Ok(matches.remove(0)),
            _ => Err(DescriptorError::MultipleRootPaths {
                variable: self.variable.clone(),
                path: path.to_path_buf(),
                matches,
            }),
        }
    }

    fn single_platform(&self, path: &Path, content: &str) -> Result<String, DescriptorError> {
        let mut matches = capture_all(&self.include_re, content);
        match matches.len() {
            0 => Err(DescriptorError::MissingPlatform {
                path: path.to_path_buf(),
            }),
            1 => Ok(matches.remove(0)),
            _ => Err(DescriptorError::MultiplePlatforms {
                path: path.to_path_buf(),
                matches,
            }),
        }
    }
}

fn capture_all(re: &Regex, content: &str) -> Vec<String> {
    re.captures_iter(content)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Resolves `path` using the default `CHIBIOS` variable
pub fn resolve_descriptor<F: FileSystem + ?Sized>(
    fs: &F,
    path: &Path,
) -> Result<ResolvedDescriptor, DescriptorError> {
    DescriptorResolver::new(DEFAULT_VARIABLE)?.resolve(fs, path)
}
