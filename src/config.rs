use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;
use regex::Regex;

pub const DEFAULT_CONFIG_PATH: &str = "server_config.text";

/// Which local address the listener binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindAddr {
    /// 127.0.0.1, the default
    Loopback,
    /// 0.0.0.0
    All,
}

impl BindAddr {
    pub fn ip(&self) -> &'static str {
        match self {
            BindAddr::Loopback => "127.0.0.1",
            BindAddr::All => "0.0.0.0",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub bind: BindAddr,
}

impl ServerConfig {
    /// Scan the configuration file for `port=<decimal>` lines.
    /// Later lines overwrite earlier ones; anything else is ignored.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading server configuration from {}", path.display());

        let text = fs::read_to_string(path).with_context(|| {
            format!("Failed to open configuration file {}", path.display())
        })?;

        let pattern = Regex::new(r"^port=(\d+)$").unwrap();
        let mut port: u64 = 0;
        for line in text.lines() {
            if let Some(caps) = pattern.captures(line.trim()) {
                port = caps[1]
                    .parse()
                    .with_context(|| format!("Invalid port value in line {line:?}"))?;
            }
        }

        if port == 0 {
            bail!("'port' not set in {}", path.display());
        }
        if port > u64::from(u16::MAX) {
            bail!(
                "'port' value {} in {} is out of range (1-65535)",
                port,
                path.display()
            );
        }

        info!("Server configuration loaded successfully");
        Ok(ServerConfig {
            port: port as u16,
            bind: BindAddr::Loopback,
        })
    }
}
