//! Storage abstraction for project persistence.
//!
//! Projects are persisted as string values under string keys, mirroring the
//! browser's `localStorage`. The store writes the serialized document under
//! a single fixed key.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use thiserror::Error;

/// Default key the project is saved under.
pub const PROJECT_KEY: &str = "builder_project";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Key not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for string-keyed storage backends.
///
/// Implementations can store values in memory, in files, or in the
/// browser's local storage.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Store a value, overwriting any previous value under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Read the value under `key`.
    fn get(&self, key: &str) -> StorageResult<String>;

    /// Delete the value under `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// List all keys.
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Trait for string-keyed storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Store a value, overwriting any previous value under `key`.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Read the value under `key`.
    fn get(&self, key: &str) -> StorageResult<String>;

    /// Delete the value under `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// List all keys.
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}

/// Platform storage backend: project files on native, `localStorage` on wasm.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = LocalStorage;

/// Create the platform storage backend at its default location.
pub fn create_default_storage() -> StorageResult<PlatformStorage> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        FileStorage::default_location()
    }
    #[cfg(target_arch = "wasm32")]
    {
        LocalStorage::new()
    }
}
