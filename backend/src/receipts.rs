use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// URL prefix receipts are served under
pub const PUBLIC_PREFIX: &str = "public";

/// Receipt images stored on disk
#[derive(Clone, Debug)]
pub struct ReceiptStore {
    dir: PathBuf,
}

impl ReceiptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write a receipt and return its public path, e.g. `public/<file>`
    pub async fn save(&self, stored_name: &str, bytes: &[u8]) -> Result<String> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create receipt directory {:?}", self.dir))?;

        let path = self.dir.join(stored_name);
        fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write receipt {:?}", path))?;

        Ok(format!("{}/{}", PUBLIC_PREFIX, stored_name))
    }
}
