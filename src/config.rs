use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::net::SocketAddr;

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_file_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_file_size: default_max_file_size(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = match lookup("INSPECTION_BIND_ADDR") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid INSPECTION_BIND_ADDR: {}", raw))?,
            None => default_bind_addr(),
        };

        let max_file_size = match lookup("INSPECTION_MAX_FILE_SIZE") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid INSPECTION_MAX_FILE_SIZE: {}", raw))?,
            None => default_max_file_size(),
        };

        Ok(Config {
            bind_addr,
            max_file_size,
        })
    }
}

pub fn load_config() -> Result<Config> {
    Config::from_env()
}
