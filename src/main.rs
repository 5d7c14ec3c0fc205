// CLI binary entry point for id3scan

mod cli;

use clap::Parser;
use std::process;

use cli::Config;

fn main() {
    let config = Config::parse();
    cli::logging::init_logging(config.verbose, config.quiet);

    match cli::commands::run(&config) {
        Ok(0) => {}
        Ok(failures) => {
            tracing::debug!(failures, "finished with failures");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("✗ {:#}", e);
            process::exit(1);
        }
    }
}
