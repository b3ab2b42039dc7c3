//! Static resource descriptors.
//!
//! `GET /api/user` answers with a fixed informational payload describing
//! the user resource. That payload is deployment configuration, not
//! persisted state: a built-in default is compiled in, and
//! `DESCRIPTORS_PATH` may point at a JSON file whose entries are merged
//! over the defaults. Descriptors are immutable after load, so repeated
//! requests always see the identical mapping.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

use crate::config::USER_RESOURCE;
use crate::errors::{AppError, AppResult};

/// A single resource descriptor: a fixed key/value mapping served verbatim.
pub type Descriptor = Map<String, Value>;

/// Built-in descriptors served when no file overrides them.
static DEFAULT_DESCRIPTORS: Lazy<BTreeMap<String, Arc<Descriptor>>> = Lazy::new(|| {
    let mut entries = BTreeMap::new();
    entries.insert(
        USER_RESOURCE.to_string(),
        Arc::new(object(json!({
            "resource": USER_RESOURCE,
            "endpoints": [
                "GET /api/user",
                "GET /api/user/{id}",
                "POST /api/user",
            ],
        }))),
    );
    entries
});

/// Unwrap a `json!` object literal into its map.
fn object(value: Value) -> Descriptor {
    match value {
        Value::Object(map) => map,
        _ => Descriptor::new(),
    }
}

/// Immutable set of resource descriptors loaded at startup.
pub struct ResourceDescriptors {
    entries: BTreeMap<String, Arc<Descriptor>>,
}

impl ResourceDescriptors {
    /// Built-in defaults only.
    pub fn builtin() -> Self {
        Self {
            entries: DEFAULT_DESCRIPTORS.clone(),
        }
    }

    /// Load descriptors, merging a JSON file over the defaults when a
    /// path is configured.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    AppError::internal(format!(
                        "Failed to read descriptor file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::from_json_str(&raw)
            }
            None => Ok(Self::builtin()),
        }
    }

    /// Parse a JSON object of `resource name -> descriptor object` and
    /// merge it over the built-in defaults. A file entry replaces the
    /// default for that resource wholesale; empty objects are rejected so
    /// serving stays infallible.
    pub fn from_json_str(raw: &str) -> AppResult<Self> {
        let parsed: BTreeMap<String, Descriptor> = serde_json::from_str(raw)
            .map_err(|e| AppError::validation(format!("Invalid descriptor file: {}", e)))?;

        let mut entries = DEFAULT_DESCRIPTORS.clone();
        for (resource, descriptor) in parsed {
            if descriptor.is_empty() {
                return Err(AppError::validation(format!(
                    "Descriptor for '{}' must not be empty",
                    resource
                )));
            }
            entries.insert(resource, Arc::new(descriptor));
        }

        Ok(Self { entries })
    }

    /// Descriptor for a resource, if one is defined.
    pub fn get(&self, resource: &str) -> Option<Arc<Descriptor>> {
        self.entries.get(resource).cloned()
    }

    /// Descriptor for the user resource.
    ///
    /// Always available: the defaults define it and file entries can only
    /// replace it with another non-empty mapping.
    pub fn user(&self) -> Arc<Descriptor> {
        self.entries
            .get(USER_RESOURCE)
            .cloned()
            .unwrap_or_else(|| DEFAULT_DESCRIPTORS[USER_RESOURCE].clone())
    }
}
