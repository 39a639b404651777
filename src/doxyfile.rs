//! Doxygen config template rewriting
//!
//! The template is treated as opaque text except for one field line, which
//! is replaced by the resolved input list in Doxygen's continuation layout:
//!
//! ```text
//! INPUT                  = /lib/os/hal/src/hal.c \
//!                          /lib/os/hal/include
//! ```

use crate::fs::FileSystem;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Field whose value lists the documented files
pub const DEFAULT_FIELD: &str = "INPUT";

/// Column the `=` sits in, as written by `doxygen -g`
const NAME_WIDTH: usize = 23;

/// Indent of continuation lines, aligned with the first value
const CONTINUATION_INDENT: usize = NAME_WIDTH + 2;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Field {field} not found in template {path}")]
    FieldNotFound { field: String, path: PathBuf },
    #[error("Failed to read template {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("Failed to write config {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Renders `field` with `entries` as a complete line, newline included
pub fn format_field(field: &str, entries: &[String]) -> String {
    let separator = format!(" \\\n{}", " ".repeat(CONTINUATION_INDENT));
    format!(
        "{:<width$}= {}\n",
        field,
        entries.join(&separator),
        width = NAME_WIDTH
    )
}

fn is_field_line(line: &str, field: &str) -> bool {
    match line.strip_prefix(field) {
        Some(rest) => rest.is_empty() || rest.starts_with(|c: char| c == '=' || c.is_whitespace()),
        None => false,
    }
}

fn continues(line: &str) -> bool {
    line.trim_end().ends_with('\\')
}

/// Replaces the first `field` line of `content`, including any backslash
/// continuation lines of its old value. Returns `None` when the field is absent.
pub fn rewrite_field(content: &str, field: &str, entries: &[String]) -> Option<String> {
    let mut lines = content.split_inclusive('\n');
    let mut out = String::with_capacity(content.len());

    loop {
        let line = lines.next()?;
        if !is_field_line(line, field) {
            out.push_str(line);
            continue;
        }

        let mut last = line;
        while continues(last) {
            match lines.next() {
                Some(next) => last = next,
                None => break,
            }
        }

        out.push_str(&format_field(field, entries));
        break;
    }

    for line in lines {
        out.push_str(line);
    }
    Some(out)
}

/// Reads a template, rewrites its input field and writes the result
pub struct TemplateRewriter<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    field: String,
}

impl<'a, F: FileSystem + ?Sized> TemplateRewriter<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self::with_field(fs, DEFAULT_FIELD)
    }

    pub fn with_field(fs: &'a F, field: impl Into<String>) -> Self {
        Self {
            fs,
            field: field.into(),
        }
    }

    /// Writes `template` with its field replaced to `output`. Nothing is
    /// written when the field is missing.
    pub fn rewrite(
        &self,
        template: &Path,
        output: &Path,
        entries: &[String],
    ) -> Result<(), TemplateError> {
        let content = self
            .fs
            .read_to_string(template)
            .map_err(|source| TemplateError::Read {
                path: template.to_path_buf(),
                source,
            })?;

        let rewritten = rewrite_field(&content, &self.field, entries).ok_or_else(|| {
            TemplateError::FieldNotFound {
                field: self.field.clone(),
                path: template.to_path_buf(),
            }
        })?;

        debug!(
            template = %template.display(),
            output = %output.display(),
            entries = entries.len(),
            "Rewriting config"
        );
        self.fs
            .write_string(output, &rewritten)
            .map_err(|source| TemplateError::Write {
                path: output.to_path_buf(),
                source,
            })
    }
}
