use std::{
    io::Write,
    path::{Path, PathBuf},
};

use error_stack::ResultExt;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, instrument};

use super::token::Token;

#[derive(Error, Debug)]
pub enum TokenStoreError {
    #[error("Failed to read token file")]
    Read,
    #[error("Token file does not contain a valid token")]
    Parse,
    #[error("Failed to create token directory")]
    CreateDir,
    #[error("Failed to write token file")]
    Write,
}

/// Token cache backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no token has been stored yet.
    #[instrument]
    pub fn load(&self) -> error_stack::Result<Option<Token>, TokenStoreError> {
        if !self.path.exists() {
            debug!("No cached token at {}", self.path.display());
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)
            .change_context(TokenStoreError::Read)
            .attach_printable_lazy(|| format!("Token file: {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .map(Some)
            .change_context(TokenStoreError::Parse)
            .attach_printable_lazy(|| format!("Token file: {}", self.path.display()))
    }

    /// Writes to a temporary file next to the target and renames it into place.
    #[instrument(skip(token))]
    pub fn save(&self, token: &Token) -> error_stack::Result<(), TokenStoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !dir.exists() {
            create_private_dir(dir)
                .change_context(TokenStoreError::CreateDir)
                .attach_printable_lazy(|| format!("Directory: {}", dir.display()))?;
        }

        let json = serde_json::to_vec(token).change_context(TokenStoreError::Write)?;

        let mut file = NamedTempFile::new_in(dir).change_context(TokenStoreError::Write)?;
        file.write_all(&json)
            .and_then(|_| file.as_file().sync_all())
            .change_context(TokenStoreError::Write)?;
        file.persist(&self.path)
            .change_context(TokenStoreError::Write)
            .attach_printable_lazy(|| format!("Token file: {}", self.path.display()))?;

        debug!("Token saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    std::fs::DirBuilder::new()
        .recursive(true)
        .mode(0o700)
        .create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}
