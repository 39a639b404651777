//! doxyplat - Doxygen input generation for ChibiOS-style HAL projects
//!
//! A project makefile names the HAL tree through a root variable
//! (`CHIBIOS = ../..`) and includes one board `platform.mk`. That fragment,
//! and every fragment it includes, lists the sources, headers and
//! directories the build uses. This library follows those fragments and
//! writes the resulting list into the `INPUT` field of a Doxygen template,
//! so the generated documentation covers exactly what the platform builds.
//!
//! # Example Usage
//!
//! ```no_run
//! use doxyplat::{Generator, GeneratorConfig, RealFileSystem};
//! use std::path::Path;
//!
//! let fs = RealFileSystem;
//! let config = GeneratorConfig::default().resolve_paths()?;
//! let report = Generator::new(&fs, &config).generate(Path::new("Makefile"), false)?;
//! println!("{} inputs written to {}", report.entries.len(), report.output.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Project Structure
//!
//! - [`descriptor`]: Root variable and platform include extraction
//! - [`fragment`]: Path token grammar, substitution, fallback filtering and
//!   the recursive walk
//! - [`doxyfile`]: Template field rewriting
//! - [`generator`]: The end-to-end pipeline
//! - [`cli`]: Command-line surface

pub mod cli;
pub mod config;
pub mod descriptor;
pub mod doxyfile;
pub mod fragment;
pub mod fs;
pub mod generator;
pub mod paths;
pub mod progress;
pub mod util;

pub use config::{ConfigError, GeneratorConfig};
pub use descriptor::{resolve_descriptor, DescriptorError, DescriptorResolver, ResolvedDescriptor};
pub use doxyfile::{TemplateError, TemplateRewriter};
pub use fragment::{walk, FragmentWalker, RootPath, TokenGrammar, TokenKind, WalkError};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use generator::{GenerateError, GenerationReport, Generator};
pub use progress::{LoggingHandler, NoOpHandler, ProgressEvent, ProgressHandler};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
