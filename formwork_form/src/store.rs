// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The form-state container: the single writer of the value tree.

use hashbrown::HashMap;

use formwork_registry::{ErrorKind, ErrorLookup, FieldError};
use formwork_value::{Path, PathError, Value};
use tracing::debug;

/// Owns the live value tree, field errors, and the defaults snapshot.
///
/// Widgets never hold references into the store; they receive value
/// snapshots through binding contexts and hand commits back to the
/// orchestrator, which applies them here. Errors are keyed by the opaque
/// path strings the server (or validator) reported; a key that matches no
/// declared field is kept anyway so the host can surface it globally.
#[derive(Debug, Clone)]
pub struct FormStore {
    values: Value,
    defaults: Value,
    errors: HashMap<String, FieldError>,
}

impl FormStore {
    /// Creates a store whose live tree starts at the given defaults.
    #[must_use]
    pub fn new(defaults: Value) -> Self {
        Self {
            values: defaults.clone(),
            defaults,
            errors: HashMap::new(),
        }
    }

    /// The live value tree.
    #[must_use]
    pub fn values(&self) -> &Value {
        &self.values
    }

    /// The value at a dotted path, if the tree has that shape.
    #[must_use]
    pub fn value(&self, path: &str) -> Option<&Value> {
        let parsed: Path = path.parse().ok()?;
        parsed.get(&self.values)
    }

    /// Writes a value at a dotted path, vivifying intermediate containers.
    pub fn set_value(&mut self, path: &str, value: Value) -> Result<(), PathError> {
        let parsed: Path = path.parse()?;
        parsed.set(&mut self.values, value)
    }

    /// The error attached to a path, if any.
    #[must_use]
    pub fn error(&self, path: &str) -> Option<&FieldError> {
        self.errors.get(path)
    }

    /// Attaches an error at a path, replacing any previous one.
    pub fn set_error(&mut self, path: impl Into<String>, error: FieldError) {
        self.errors.insert(path.into(), error);
    }

    /// Removes the error at a path.
    pub fn clear_error(&mut self, path: &str) {
        self.errors.remove(path);
    }

    /// Removes every error.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Removes only server-kind errors, keeping validation ones.
    pub fn clear_server_errors(&mut self) {
        self.errors.retain(|_, e| e.kind != ErrorKind::Server);
    }

    /// Attaches server-kind errors from an opaque `{path: message}` map.
    ///
    /// Empty messages are skipped. Paths are not validated against the
    /// declared fields. Returns the paths that received an error, in
    /// application order.
    pub fn apply_server_errors(
        &mut self,
        errors: impl IntoIterator<Item = (String, String)>,
    ) -> Vec<String> {
        let mut applied = Vec::new();
        for (path, message) in errors {
            if message.is_empty() {
                debug!(path, "skipping server error with empty message");
                continue;
            }
            self.errors.insert(path.clone(), FieldError::server(message));
            applied.push(path);
        }
        applied
    }

    /// Restores the defaults snapshot and clears every error.
    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
        self.errors.clear();
    }
}

impl ErrorLookup for FormStore {
    fn error_at(&self, path: &str) -> Option<&FieldError> {
        self.error(path)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn store() -> FormStore {
        FormStore::new(Value::object_from([
            ("title", Value::empty_text()),
            ("price", Value::Number(0.0)),
        ]))
    }

    #[test]
    fn set_and_get_by_path() {
        let mut store = store();
        store.set_value("title", Value::text("Chair")).unwrap();
        assert_eq!(store.value("title"), Some(&Value::text("Chair")));

        // Nested paths vivify intermediate objects.
        store.set_value("seo.slug", Value::text("chair")).unwrap();
        assert_eq!(store.value("seo.slug"), Some(&Value::text("chair")));
    }

    #[test]
    fn reset_restores_defaults_and_clears_errors() {
        let mut store = store();
        store.set_value("title", Value::text("Chair")).unwrap();
        store.set_error("title", FieldError::server("taken"));

        store.reset();
        assert_eq!(store.value("title"), Some(&Value::empty_text()));
        assert_eq!(store.error("title"), None);
    }

    #[test]
    fn server_errors_skip_empty_messages_and_keep_opaque_paths() {
        let mut store = store();
        let applied = store.apply_server_errors([
            ("title".to_owned(), "already exists".to_owned()),
            ("price".to_owned(), String::new()),
            ("variants.3.sku".to_owned(), "duplicate".to_owned()),
        ]);

        assert_eq!(applied, ["title", "variants.3.sku"]);
        assert_eq!(store.error("title").map(|e| e.message.as_str()), Some("already exists"));
        assert_eq!(store.error("price"), None);
        // Unknown paths are attached verbatim.
        assert!(store.error("variants.3.sku").is_some());
    }

    #[test]
    fn clearing_server_errors_keeps_validation_errors() {
        let mut store = store();
        store.set_error("title", FieldError::validation("required"));
        store.set_error("price", FieldError::server("too low"));

        store.clear_server_errors();
        assert!(store.error("title").is_some());
        assert_eq!(store.error("price"), None);
    }
}
