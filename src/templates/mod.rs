//! Named-template JSON file store.
//!
//! A template is a persisted snapshot of flat form-field values,
//! independent of any [`Invoice`](crate::core::Invoice) instance. On disk
//! each template is one JSON file:
//!
//! ```json
//! { "name": "Monthly retainer", "created": "2024-06-15", "fields": { "sender": "ACME", "tax": 150.0 } }
//! ```
//!
//! Date-valued fields are stored as ISO-8601 date strings. The store is a
//! plain constructor-injected dependency — no global instance.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::core::sanitize_filename;

/// Errors from template persistence.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TemplateError {
    #[error("template I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("template JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk shape of one template file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TemplateRecord {
    name: String,
    created: NaiveDate,
    fields: Map<String, Value>,
}

/// Summary of a stored template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    /// Display name as given at save time (not the sanitized filename).
    pub name: String,
    /// Date the template was saved.
    pub created: NaiveDate,
}

/// Directory-backed store of named templates.
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    /// Open (and create if needed) the store at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, TemplateError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_filename(name)))
    }

    /// Persist `fields` under `name`, overwriting any previous template
    /// with the same (sanitized) name.
    pub fn save(&self, name: &str, fields: Map<String, Value>) -> Result<(), TemplateError> {
        let record = TemplateRecord {
            name: name.to_string(),
            created: Local::now().date_naive(),
            fields,
        };
        let json = serde_json::to_string_pretty(&record)?;
        std::fs::write(self.path_for(name), json)?;
        Ok(())
    }

    /// Load the flat field map stored under `name`.
    ///
    /// `Ok(None)` when no such template exists.
    pub fn load(&self, name: &str) -> Result<Option<Map<String, Value>>, TemplateError> {
        match std::fs::read_to_string(self.path_for(name)) {
            Ok(text) => {
                let record: TemplateRecord = serde_json::from_str(&text)?;
                Ok(Some(record.fields))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List stored templates, sorted by name.
    ///
    /// Files that are not readable templates are skipped rather than
    /// failing the whole listing.
    pub fn list(&self) -> Result<Vec<TemplateInfo>, TemplateError> {
        let mut templates = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(info) = read_info(&path) {
                templates.push(info);
            }
        }
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    /// Delete the template stored under `name`.
    ///
    /// Returns `false` when no such template existed.
    pub fn delete(&self, name: &str) -> Result<bool, TemplateError> {
        match std::fs::remove_file(self.path_for(name)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn read_info(path: &Path) -> Option<TemplateInfo> {
    let text = std::fs::read_to_string(path).ok()?;
    let record: TemplateRecord = serde_json::from_str(&text).ok()?;
    Some(TemplateInfo {
        name: record.name,
        created: record.created,
    })
}
