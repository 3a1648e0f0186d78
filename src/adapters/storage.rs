use crate::domain::ports::Storage;
use crate::utils::error::{Result, ScanError};
use std::fs::File;
use std::io::Write;

/// Writes straight to the given path. Parent directories are not created.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut file = File::create(path).map_err(|source| ScanError::FileCreationError {
            path: path.to_string(),
            source,
        })?;

        file.write_all(data)?;
        file.flush()?;
        Ok(())
    }
}
