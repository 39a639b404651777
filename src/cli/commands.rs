use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Generate a platform-specific Doxygen config from a project makefile
#[derive(Parser, Debug)]
#[command(
    name = "doxyplat",
    about = "Generate a platform-specific Doxygen config from a project makefile",
    version,
    author,
    long_about = "doxyplat parses the main Makefile of your project, extracts the \
                  platform.mk it includes, follows every fragment that platform pulls in \
                  and rewrites the INPUT field of a Doxygen config template so the \
                  generated documentation covers exactly your target.\n\n\
                  Examples:\n  \
                  doxyplat ../demos/STM32F4/Makefile\n  \
                  doxyplat --dry-run --format json Makefile\n  \
                  doxyplat --template doc/Doxyfile_html.template --output doc/Doxyfile_html Makefile"
)]
pub struct CliArgs {
    #[arg(value_name = "MAKEFILE", help = "Path to your project's main Makefile")]
    pub makefile: PathBuf,

    #[arg(
        short = 't',
        long,
        value_name = "FILE",
        help = "Doxygen config template [default: Doxyfile_html.template]"
    )]
    pub template: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Where to write the generated config [default: Doxyfile_html]"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Root variable used in makefiles [default: CHIBIOS]"
    )]
    pub variable: Option<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Template field to rewrite [default: INPUT]"
    )]
    pub field: Option<String>,

    #[arg(short = 'c', long, value_name = "FILE", help = "Read settings from a TOML file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Resolve inputs and print them without writing the config")]
    pub dry_run: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Report format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
