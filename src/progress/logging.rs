//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{debug, info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { descriptor } => {
                info!(descriptor = %descriptor.display(), "Starting generation");
            }
            ProgressEvent::DescriptorResolved {
                root_path,
                platform,
            } => {
                info!(
                    root_path = %root_path.display(),
                    platform = %platform.display(),
                    "Descriptor resolved"
                );
            }
            ProgressEvent::FragmentEntered { path, depth } => {
                debug!(fragment = %path.display(), depth, "Scanning fragment");
            }
            ProgressEvent::FragmentWalked { path, entries } => {
                debug!(fragment = %path.display(), entries, "Fragment scanned");
            }
            ProgressEvent::IncludeCycleSkipped {
                path,
                included_from,
            } => {
                warn!(
                    fragment = %path.display(),
                    included_from = %included_from.display(),
                    "Skipping cyclic fragment include"
                );
            }
            ProgressEvent::TemplateWritten { path, entries } => {
                info!(output = %path.display(), entries, "Config written");
            }
            ProgressEvent::Completed {
                entries,
                total_time,
            } => {
                info!(
                    entries,
                    total_time_ms = total_time.as_millis(),
                    "Generation complete"
                );
            }
            ProgressEvent::Failed { error } => {
                warn!(error = %error, "Generation failed");
            }
        }
    }
}
