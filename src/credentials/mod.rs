//! Credential storage.
//!
//! # Responsibilities
//! - Hold the bearer token and signed-in user between calls
//! - Clear both on terminal authentication failures
//!
//! # Design Decisions
//! - Storage is a capability: `NoopStore` stands in where nothing persists
//! - Last writer wins; `clear` is idempotent
//! - Reads are lock-free (`ArcSwapOption`)

pub mod file;

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub use file::FileStore;

/// The signed-in user, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}

/// A stored session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Errors from persistent stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("credential store format error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Where the client reads and clears the session.
pub trait CredentialStore: Send + Sync {
    fn credentials(&self) -> Option<Arc<Credentials>>;

    fn set(&self, credentials: Credentials) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;

    fn token(&self) -> Option<String> {
        self.credentials().map(|c| c.token.clone())
    }

    fn user(&self) -> Option<User> {
        self.credentials().and_then(|c| c.user.clone())
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    current: ArcSwapOption<Credentials>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            current: ArcSwapOption::from_pointee(credentials),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn credentials(&self) -> Option<Arc<Credentials>> {
        self.current.load_full()
    }

    fn set(&self, credentials: Credentials) -> Result<(), StoreError> {
        self.current.store(Some(Arc::new(credentials)));
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.current.store(None);
        Ok(())
    }
}

/// Store for environments without storage: holds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStore;

impl CredentialStore for NoopStore {
    fn credentials(&self) -> Option<Arc<Credentials>> {
        None
    }

    fn set(&self, _credentials: Credentials) -> Result<(), StoreError> {
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Str(String),
        Num(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Str(s) => s,
        Id::Num(n) => n.to_string(),
    })
}
