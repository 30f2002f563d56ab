//! cargotrack - Entry Point

use cargotrack::table::PageSize;
use cargotrack::view::ColorConfig;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// cargotrack - TUI for tracking cargo shipments
#[derive(Parser, Debug)]
#[command(name = "cargotrack")]
#[command(version)]
#[command(about = "TUI application for tracking cargo shipments and their products")]
pub struct Args {
    /// Rows per table page (must be positive)
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub page_size: Option<usize>,

    /// Start with a search term applied
    #[arg(short, long)]
    pub search: Option<String>,

    /// Do not resolve map points to place names
    #[arg(long)]
    pub no_geocode: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = cargotrack::config::load_config_with_precedence(args.config.clone())?;
        let merged = cargotrack::config::merge_config(config_file)?;
        let with_env = cargotrack::config::apply_env_overrides(merged)?;
        let page_size = args.page_size.and_then(PageSize::new);
        cargotrack::config::apply_cli_overrides(with_env, page_size, args.no_geocode)
    };

    // The guard flushes the non-blocking writer on exit.
    let _guard = cargotrack::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    cargotrack::view::run(
        &config,
        args.search.as_deref(),
        ColorConfig::from_env_and_args(args.no_color),
    )?;

    Ok(())
}
