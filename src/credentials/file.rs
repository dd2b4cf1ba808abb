//! JSON file-backed credential store.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::credentials::{CredentialStore, Credentials, MemoryStore, StoreError};

/// Persists the session to a JSON file so it survives process restarts.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    cache: MemoryStore,
}

impl FileStore {
    /// Open the store, loading an existing session if the file exists.
    ///
    /// A corrupt file is discarded with a warning rather than failing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let cache = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Credentials>(&content) {
                Ok(credentials) => MemoryStore::with_credentials(credentials),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable session file");
                    MemoryStore::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => MemoryStore::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, cache })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Write `content` to a sibling temp file readable only by the owner, then
/// rename it over `path`.
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension(format!("tmp-{}", uuid::Uuid::new_v4()));

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let written = options.open(&tmp).and_then(|mut file| {
        file.write_all(content)?;
        file.sync_all()
    });
    match written.and_then(|()| fs::rename(&tmp, path)) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

impl CredentialStore for FileStore {
    fn credentials(&self) -> Option<Arc<Credentials>> {
        self.cache.credentials()
    }

    fn set(&self, credentials: Credentials) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&credentials)?;
        write_private(&self.path, content.as_bytes())?;
        self.cache.set(credentials)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.cache.clear()?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
