//! Root-variable substitution

use crate::paths;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Name of the root variable in ChibiOS makefiles
pub const DEFAULT_VARIABLE: &str = "CHIBIOS";

/// Characters that make up `$(VAR)` / `${VAR}` references
const PLACEHOLDER_DELIMITERS: [char; 5] = ['$', '(', ')', '{', '}'];

/// Replaces every occurrence of `variable` in `raw` with `root`, then strips
/// all placeholder delimiters from the whole string.
pub fn substitute_variable(variable: &str, root: &str, raw: &str) -> String {
    raw.replace(variable, root)
        .chars()
        .filter(|c| !PLACEHOLDER_DELIMITERS.contains(c))
        .collect()
}

/// [`substitute_variable`] for the default `CHIBIOS` variable
pub fn substitute(root: &str, raw: &str) -> String {
    substitute_variable(DEFAULT_VARIABLE, root, raw)
}

/// The resolved value of the root variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootPath {
    variable: String,
    path: PathBuf,
}

impl RootPath {
    /// `path` should already be absolute and normalized
    pub fn new(variable: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            variable: variable.into(),
            path: path.into(),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        self.path.to_string_lossy()
    }

    pub fn substitute(&self, raw: &str) -> String {
        substitute_variable(&self.variable, &self.as_str(), raw)
    }

    /// Substitutes `raw` and makes the result an absolute, normalized path.
    /// Relative results are anchored at `base`.
    pub fn resolve(&self, raw: &str, base: &Path) -> PathBuf {
        paths::absolutize(Path::new(&self.substitute(raw)), base)
    }

    /// Portion of `path` below the root, or the whole string when `path`
    /// lies elsewhere
    pub fn relative<'a>(&self, path: &'a str) -> &'a str {
        let root = self.as_str();
        path.strip_prefix(root.as_ref()).unwrap_or(path)
    }
}
