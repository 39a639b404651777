//! Recursive fragment walker

use super::fallback::{prefer_overrides_by, FALLBACK_MARKER};
use super::substitute::RootPath;
use super::token::{TokenGrammar, TokenKind};
use crate::fs::FileSystem;
use crate::paths;
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("Failed to read fragment {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Invalid token pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Walks a fragment and every fragment it includes, collecting concrete
/// file and directory paths.
pub struct FragmentWalker<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    root: &'a RootPath,
    grammar: TokenGrammar,
    progress: &'a dyn ProgressHandler,
}

impl<'a, F: FileSystem + ?Sized> FragmentWalker<'a, F> {
    pub fn new(fs: &'a F, root: &'a RootPath) -> Result<Self, WalkError> {
        Ok(Self {
            fs,
            root,
            grammar: TokenGrammar::new(root.variable())?,
            progress: &NoOpHandler,
        })
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressHandler) -> Self {
        self.progress = progress;
        self
    }

    /// Resolves the list contributed by `fragment` and, depth first, by
    /// every nested fragment it references.
    pub fn walk(&self, fragment: &Path) -> Result<Vec<String>, WalkError> {
        let mut chain = HashSet::new();
        self.walk_fragment(&paths::normalize(fragment), &mut chain, 0)
    }

    fn walk_fragment(
        &self,
        fragment: &Path,
        chain: &mut HashSet<PathBuf>,
        depth: usize,
    ) -> Result<Vec<String>, WalkError> {
        self.progress.on_progress(&ProgressEvent::FragmentEntered {
            path: fragment.to_path_buf(),
            depth,
        });

        let text = self
            .fs
            .read_to_string(fragment)
            .map_err(|source| WalkError::Read {
                path: fragment.to_path_buf(),
                source,
            })?;
        let tokens = self.grammar.classify_and_extract(&text);
        chain.insert(fragment.to_path_buf());

        let mut entries = Vec::new();
        for kind in TokenKind::CONTENT {
            let resolved: Vec<String> = tokens
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| self.root.substitute(&t.raw))
                .collect();
            entries.extend(self.prefer_overrides(resolved));
        }

        let base = paths::parent_dir(fragment);
        for token in tokens.iter().filter(|t| t.kind == TokenKind::Fragment) {
            let nested = self.root.resolve(&token.raw, &base);
            if chain.contains(&nested) {
                self.progress.on_progress(&ProgressEvent::IncludeCycleSkipped {
                    path: nested,
                    included_from: fragment.to_path_buf(),
                });
                continue;
            }

            debug!(fragment = %nested.display(), "Following nested fragment");
            let nested_entries = self.walk_fragment(&nested, chain, depth + 1)?;
            entries.extend(self.prefer_overrides(nested_entries));
        }

        chain.remove(fragment);
        self.progress.on_progress(&ProgressEvent::FragmentWalked {
            path: fragment.to_path_buf(),
            entries: entries.len(),
        });
        Ok(entries)
    }

    /// Only the part below the root is checked, so a checkout living under a
    /// directory named `fallback` still filters correctly.
    fn prefer_overrides(&self, resolved: Vec<String>) -> Vec<String> {
        prefer_overrides_by(resolved, |p| {
            self.root.relative(p).contains(FALLBACK_MARKER)
        })
    }
}

/// Walks `fragment` with the root variable resolved to `root`
pub fn walk<F: FileSystem + ?Sized>(
    fs: &F,
    root: &RootPath,
    fragment: &Path,
) -> Result<Vec<String>, WalkError> {
    FragmentWalker::new(fs, root)?.walk(fragment)
}
