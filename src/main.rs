use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{info, LevelFilter};

use netsink::config::{BindAddr, ServerConfig, DEFAULT_CONFIG_PATH};
use netsink::server::Server;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: server_config.text)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind all interfaces instead of loopback only
    #[arg(short, long)]
    all: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = ServerConfig::load(&path)?;
    if cli.all {
        config.bind = BindAddr::All;
    }

    ctrlc::set_handler(|| {
        info!("Interrupted, shutting down.");
        std::process::exit(0);
    })?;

    info!("Starting server on {}:{}", config.bind.ip(), config.port);
    let server = Server::bind(&config)?;
    server.serve()
}
