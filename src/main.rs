use cfn_alarmgen::{cli::Cli, config};
use clap::Parser;
use std::process;

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    // Load configuration
    let config = config::load_config(cli.config.as_deref());

    let verbose = cli.verbose > 0;
    if let Err(e) = cfn_alarmgen::run_command(cli.command, &config, verbose) {
        eprintln!("Error: {}", e);
        if verbose {
            eprintln!("{:?}", e);
        }
        process::exit(1);
    }
}
