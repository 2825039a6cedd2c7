mod cli;
mod format;
mod output;

use bookmarker::config::Config;
use bookmarker::error::Result;
use clap::Parser;

fn run(args: cli::Cli) -> Result<()> {
    // Load configuration
    let cfg = if let Some(config_path) = &args.config {
        log::debug!("loading config from {}", config_path.display());
        Config::load_from_path(config_path)?
    } else {
        Config::load()
    };

    cli::handle_args(args, cfg)
}

fn main() {
    let args = cli::Cli::parse();

    // Initialize logger
    let level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(args) {
        eprintln!("{}", cli::error_message(&e));
        std::process::exit(1);
    }
}
