use crate::format::OutputFormat;
use bookmarker::config::Config;
use bookmarker::error::{BookmarkerError, Result};
use bookmarker::Engine;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read Chrome bookmarks, optionally from the given profile
    #[arg(long, value_name = "PROFILE", num_args = 0..=1, default_missing_value = "Default")]
    pub chrome: Option<String>,

    /// Directory holding the Chrome profiles
    #[arg(long, value_name = "DIR")]
    pub chrome_dir: Option<PathBuf>,

    /// Read Edge bookmarks, optionally from the given profile
    #[arg(long, value_name = "PROFILE", num_args = 0..=1, default_missing_value = "Default")]
    pub edge: Option<String>,

    /// Directory holding the Edge profiles
    #[arg(long, value_name = "DIR")]
    pub edge_dir: Option<PathBuf>,

    /// Read Firefox bookmarks, optionally from the given profile
    #[arg(
        long,
        value_name = "PROFILE",
        num_args = 0..=1,
        default_missing_value = "default-release"
    )]
    pub firefox: Option<String>,

    /// Directory holding the Firefox profiles
    #[arg(long, value_name = "DIR")]
    pub firefox_dir: Option<PathBuf>,

    /// Read Safari bookmarks
    #[arg(long)]
    pub safari: bool,

    /// Custom Safari Bookmarks.plist path
    #[arg(long, value_name = "FILE")]
    pub safari_file: Option<PathBuf>,

    /// Show each URL only once
    #[arg(short = 'u', long = "uniq")]
    pub uniq: bool,

    /// Only show bookmarks whose folder starts with this prefix
    #[arg(long, value_name = "PREFIX")]
    pub folder: Option<String>,

    /// Output format: plain, json or yaml
    #[arg(short = 'f', long)]
    pub format: Option<String>,

    /// Disable color output
    #[arg(long)]
    pub nc: bool,

    /// Optional custom configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show debug information
    #[arg(short = 'g', long = "debug")]
    pub debug: bool,
}

/// Layer command line flags over the configuration file
pub fn apply_args(args: &Cli, mut config: Config) -> Config {
    if let Some(profile) = &args.chrome {
        config.chrome.enabled = true;
        config.chrome.profile = profile.clone();
    }
    if let Some(dir) = &args.chrome_dir {
        config.chrome.profile_dir = Some(dir.clone());
    }
    if let Some(profile) = &args.edge {
        config.edge.enabled = true;
        config.edge.profile = profile.clone();
    }
    if let Some(dir) = &args.edge_dir {
        config.edge.profile_dir = Some(dir.clone());
    }
    if let Some(profile) = &args.firefox {
        config.firefox.enabled = true;
        config.firefox.profile = profile.clone();
    }
    if let Some(dir) = &args.firefox_dir {
        config.firefox.profile_dir = Some(dir.clone());
    }
    if args.safari || args.safari_file.is_some() {
        config.safari.enabled = true;
    }
    if let Some(file) = &args.safari_file {
        config.safari.path = Some(file.clone());
    }
    if args.uniq {
        config.remove_duplicates = true;
    }
    if let Some(folder) = &args.folder {
        config.folder = Some(folder.clone());
    }
    config
}

pub fn handle_args(args: Cli, config: Config) -> Result<()> {
    let config = apply_args(&args, config);

    if !config.has_sources() {
        return Err(BookmarkerError::Configuration(
            "no browser enabled, use --chrome, --edge, --firefox or --safari".to_string(),
        ));
    }

    let engine = Engine::build(config.options()).map_err(|e| e.error)?;
    log::debug!(
        "sources: {:?}, remove duplicates: {}, folder: {:?}",
        engine.enabled_sources(),
        config.remove_duplicates,
        config.folder
    );
    let bookmarks = engine.bookmarks()?;

    let format = OutputFormat::from_string(args.format.as_deref().unwrap_or("plain"));
    print!("{}", format.render(&bookmarks, args.nc)?);
    Ok(())
}

/// Line printed to stderr when the program fails
pub fn error_message(err: &BookmarkerError) -> String {
    format!("Error: {}", err)
}
