use doxyplat::cli::commands::CliArgs;
use doxyplat::cli::handlers::handle_generate;
use doxyplat::util::logging::{self, parse_level};
use doxyplat::VERSION;

use clap::Parser;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("doxyplat v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    std::process::exit(handle_generate(&args));
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        Some(parse_level(level_str))
    } else if args.verbose {
        Some(Level::DEBUG)
    } else if args.quiet {
        Some(Level::ERROR)
    } else {
        None
    };

    logging::init_logging(logging::config_from_env(level));
}
