//! Command handler for the `doxyplat` binary

use super::commands::{CliArgs, OutputFormatArg};
use super::output::OutputFormatter;
use crate::config::GeneratorConfig;
use crate::fs::RealFileSystem;
use crate::generator::Generator;
use crate::progress::LoggingHandler;
use anyhow::{Context, Result};
use tracing::{debug, error};

/// Runs a generation for `args` and returns the process exit code
pub fn handle_generate(args: &CliArgs) -> i32 {
    match run_generate(args) {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

/// Layers defaults, environment, `--config` file and flags into one config
pub fn build_config(args: &CliArgs) -> Result<GeneratorConfig> {
    let mut config = GeneratorConfig::default();

    if let Some(path) = &args.config {
        config = config.merge_file(path)?;
    }
    if let Some(template) = &args.template {
        config.template_path = template.clone();
    }
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    if let Some(variable) = &args.variable {
        config.variable = variable.clone();
    }
    if let Some(field) = &args.field {
        config.field_name = field.clone();
    }

    let config = config.resolve_paths()?;
    config.validate()?;
    Ok(config)
}

fn run_generate(args: &CliArgs) -> Result<()> {
    let config = build_config(args).context("Invalid configuration")?;
    debug!("{}", config);

    let fs = RealFileSystem::new();
    let report = Generator::new(&fs, &config)
        .with_progress(&LoggingHandler)
        .generate(&args.makefile, args.dry_run)
        .with_context(|| format!("Failed to process {}", args.makefile.display()))?;

    if args.quiet && args.format == OutputFormatArg::Human {
        return Ok(());
    }
    let output = OutputFormatter::new(args.format.into()).format(&report)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
