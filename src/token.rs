//! Plaintext API token persistence.
//!
//! The CivitAI API token is a single opaque string stored at a fixed per-user
//! location (`~/.civitai/config` by default). The store path is an explicit
//! constructor argument so tests and alternate layouts can redirect it; only
//! `main` supplies the home-directory default.
//!
//! No encryption, no expiry, no multi-account support. The token is read once
//! at startup and is immutable for the run.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Relative path of the token file under the user's home directory.
const DEFAULT_TOKEN_RELATIVE_PATH: &str = ".civitai/config";

/// Errors raised by token store operations.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    /// No home directory could be determined for the default token path.
    #[error("unable to determine home directory for token storage (set HOME)")]
    HomeDirUnavailable,

    /// Filesystem I/O on the token file failed.
    #[error("IO error accessing token file {path}: {source}")]
    Io {
        /// The token file path involved.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },
}

/// File-backed store for the API token.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Creates a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default per-user location (`~/.civitai/config`).
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError::HomeDirUnavailable`] when no home directory
    /// can be determined.
    pub fn default_location() -> Result<Self, TokenStoreError> {
        let home = dirs::home_dir().ok_or(TokenStoreError::HomeDirUnavailable)?;
        Ok(Self::new(home.join(DEFAULT_TOKEN_RELATIVE_PATH)))
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored token, or `None` when no token file exists.
    ///
    /// Surrounding whitespace (including the trailing newline an editor may
    /// add) is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError::Io`] when the file exists but cannot be read.
    pub fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim().to_string();
                if token.is_empty() {
                    debug!(path = %self.path.display(), "token file exists but is empty");
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TokenStoreError::Io {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Persists the token, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError::Io`] when directory creation or the write fails.
    pub fn store(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TokenStoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        std::fs::write(&self.path, token).map_err(|e| TokenStoreError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        debug!(path = %self.path.display(), "token stored");
        Ok(())
    }

    /// Prompts for a token on the given streams, persists it, and returns it.
    ///
    /// Split out from stdin/stdout so tests can drive the prompt with
    /// in-memory buffers.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError::Io`] when reading the input stream or
    /// persisting the token fails.
    pub fn prompt_and_store<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<String, TokenStoreError> {
        let io_err = |e| TokenStoreError::Io {
            path: self.path.clone(),
            source: e,
        };
        write!(output, "Please enter your CivitAI API token: ").map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let mut line = String::new();
        input.read_line(&mut line).map_err(io_err)?;
        let token = line.trim().to_string();
        self.store(&token)?;
        Ok(token)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("config"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_store_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("nested").join("config"));
        store.store("secret-token").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("secret-token"));
    }

    #[test]
    fn test_load_trims_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, "secret-token\n").unwrap();
        let store = TokenStore::new(path);
        assert_eq!(store.load().unwrap().as_deref(), Some("secret-token"));
    }

    #[test]
    fn test_load_empty_file_returns_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config");
        std::fs::write(&path, "  \n").unwrap();
        let store = TokenStore::new(path);
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_prompt_writes_token_back() {
        let dir = TempDir::new().unwrap();
        let store = TokenStore::new(dir.path().join("config"));

        let mut input = std::io::Cursor::new(b"typed-token\n".to_vec());
        let mut output = Vec::new();
        let token = store.prompt_and_store(&mut input, &mut output).unwrap();

        assert_eq!(token, "typed-token");
        assert_eq!(store.load().unwrap().as_deref(), Some("typed-token"));
        let prompt = String::from_utf8(output).unwrap();
        assert!(prompt.contains("CivitAI API token"));
    }
}
