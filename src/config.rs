//! Persisted key-value settings.
//!
//! A single JSON object file holding the API bearer key and any other
//! scalar settings. A missing or unreadable file yields an empty store so
//! first runs need no setup step. Mutations persist immediately.
//!
//! The store is constructor-injected wherever it is needed; there is no
//! process-wide instance.

use std::io;
use std::path::PathBuf;

use serde_json::{Map, Value};
use thiserror::Error;

/// Key under which the API bearer credential is stored.
pub const API_KEY: &str = "api_key";

/// Errors from settings persistence.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File-backed JSON settings store.
pub struct Settings {
    path: PathBuf,
    data: Map<String, Value>,
}

impl Settings {
    /// Load settings from `path`. A missing or corrupt file starts empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = std::fs::read_to_string(&path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default();
        Self { path, data }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    /// Set `key` and persist.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<(), SettingsError> {
        self.data.insert(key.into(), value);
        self.persist()
    }

    /// Remove `key` and persist. No-op when the key is absent.
    pub fn remove(&mut self, key: &str) -> Result<(), SettingsError> {
        if self.data.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    /// The stored API bearer key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.get_str(API_KEY)
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) -> Result<(), SettingsError> {
        self.set(API_KEY, Value::String(key.into()))
    }

    fn persist(&self) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}
