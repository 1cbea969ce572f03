use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite:billed.db";
const DEFAULT_UPLOAD_DIR: &str = "public";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Server settings, read from `BILLED_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub database_url: String,
    /// Directory receipts are written to and served from under `/public`
    pub upload_dir: PathBuf,
    /// Origin of the web client allowed by CORS
    pub cors_origin: String,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = lookup("BILLED_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid BILLED_ADDR: {}", addr))?;

        let max_upload_bytes = match lookup("BILLED_MAX_UPLOAD_BYTES") {
            Some(value) => value
                .parse::<usize>()
                .with_context(|| format!("Invalid BILLED_MAX_UPLOAD_BYTES: {}", value))?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            addr,
            database_url: lookup("BILLED_DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            upload_dir: lookup("BILLED_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            cors_origin: lookup("BILLED_CORS_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            max_upload_bytes,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
