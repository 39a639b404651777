//! End-to-end generation: descriptor → fragments → config file

use crate::config::{ConfigError, GeneratorConfig};
use crate::descriptor::{DescriptorError, DescriptorResolver, ResolvedDescriptor};
use crate::doxyfile::{TemplateError, TemplateRewriter};
use crate::fragment::{FragmentWalker, WalkError};
use crate::fs::FileSystem;
use crate::progress::{NoOpHandler, ProgressEvent, ProgressHandler};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Outcome of a generation run
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub descriptor: PathBuf,
    pub root_path: PathBuf,
    pub platform: PathBuf,
    /// Entries discovered by walking the fragments
    pub discovered: usize,
    /// Full list written to the template field, mandatory directories last
    pub entries: Vec<String>,
    pub output: PathBuf,
    /// False for dry runs
    pub written: bool,
}

pub struct Generator<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    config: &'a GeneratorConfig,
    progress: &'a dyn ProgressHandler,
}

impl<'a, F: FileSystem + ?Sized> Generator<'a, F> {
    pub fn new(fs: &'a F, config: &'a GeneratorConfig) -> Self {
        Self {
            fs,
            config,
            progress: &NoOpHandler,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressHandler) -> Self {
        self.progress = progress;
        self
    }

    /// Resolves the descriptor and walks its platform fragment. The returned
    /// list has the mandatory directories appended.
    pub fn collect(
        &self,
        descriptor: &Path,
    ) -> Result<(ResolvedDescriptor, Vec<String>, usize), GenerateError> {
        self.config.validate()?;

        let resolved =
            DescriptorResolver::new(&self.config.variable)?.resolve(self.fs, descriptor)?;
        self.progress.on_progress(&ProgressEvent::DescriptorResolved {
            root_path: resolved.root.path().to_path_buf(),
            platform: resolved.platform.clone(),
        });

        let mut entries = FragmentWalker::new(self.fs, &resolved.root)?
            .with_progress(self.progress)
            .walk(&resolved.platform)?;
        let discovered = entries.len();
        entries.extend(self.config.mandatory_paths(&resolved.root));

        Ok((resolved, entries, discovered))
    }

    /// Runs the whole pipeline. With `dry_run` the output file is left untouched.
    pub fn generate(
        &self,
        descriptor: &Path,
        dry_run: bool,
    ) -> Result<GenerationReport, GenerateError> {
        let start = Instant::now();
        self.progress.on_progress(&ProgressEvent::Started {
            descriptor: descriptor.to_path_buf(),
        });

        let result = self.run(descriptor, dry_run);
        match &result {
            Ok(report) => self.progress.on_progress(&ProgressEvent::Completed {
                entries: report.entries.len(),
                total_time: start.elapsed(),
            }),
            Err(e) => self.progress.on_progress(&ProgressEvent::Failed {
                error: e.to_string(),
            }),
        }
        result
    }

    fn run(&self, descriptor: &Path, dry_run: bool) -> Result<GenerationReport, GenerateError> {
        let (resolved, entries, discovered) = self.collect(descriptor)?;

        if !dry_run {
            TemplateRewriter::with_field(self.fs, self.config.field_name.clone()).rewrite(
                &self.config.template_path,
                &self.config.output_path,
                &entries,
            )?;
            self.progress.on_progress(&ProgressEvent::TemplateWritten {
                path: self.config.output_path.clone(),
                entries: entries.len(),
            });
        }

        Ok(GenerationReport {
            descriptor: descriptor.to_path_buf(),
            root_path: resolved.root.path().to_path_buf(),
            platform: resolved.platform,
            discovered,
            entries,
            output: self.config.output_path.clone(),
            written: !dry_run,
        })
    }
}
