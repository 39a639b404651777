//! Progress handler trait and events

use std::path::PathBuf;
use std::time::Duration;

/// Events emitted while generating a documentation config
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Generation started
    Started { descriptor: PathBuf },

    /// Root path and platform fragment extracted from the descriptor
    DescriptorResolved { root_path: PathBuf, platform: PathBuf },

    /// A fragment is about to be scanned
    FragmentEntered { path: PathBuf, depth: usize },

    /// A fragment finished, including everything it pulled in
    FragmentWalked { path: PathBuf, entries: usize },

    /// A nested include pointing back into the current include chain was skipped
    IncludeCycleSkipped { path: PathBuf, included_from: PathBuf },

    /// The rewritten config was written
    TemplateWritten { path: PathBuf, entries: usize },

    /// Generation completed successfully
    Completed { entries: usize, total_time: Duration },

    /// Generation failed
    Failed { error: String },
}

/// Trait for handling progress events during generation
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
