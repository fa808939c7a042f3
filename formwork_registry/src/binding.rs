// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-render binding state for one field.

use core::fmt;

use formwork_value::Value;

/// Origin of a field-level error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Produced by the external validation capability.
    Validation,
    /// Redistributed from a failed submit.
    Server,
}

/// A field-level error attached to a path in the form-state container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Where the error came from.
    pub kind: ErrorKind,
    /// The user-visible message.
    pub message: String,
}

impl FieldError {
    /// Creates a server-kind error.
    pub fn server(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Server,
            message: message.into(),
        }
    }

    /// Creates a validation-kind error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Read-only error lookup by full dotted path.
///
/// Composite widgets (variant arrays, localized text) bind sub-fields at
/// nested paths like `variants.0.size`; the form-state container keys its
/// errors by those same opaque strings, and this capability is how a
/// render pass reaches them.
pub trait ErrorLookup {
    /// The error attached at `path`, if any.
    fn error_at(&self, path: &str) -> Option<&FieldError>;
}

/// An empty lookup for contexts with no form-state container.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoErrors;

impl ErrorLookup for NoErrors {
    fn error_at(&self, _path: &str) -> Option<&FieldError> {
        None
    }
}

impl ErrorLookup for hashbrown::HashMap<String, FieldError> {
    fn error_at(&self, path: &str) -> Option<&FieldError> {
        self.get(path)
    }
}

/// The ephemeral (value, commit channel, error) triple for one field.
///
/// Reconstructed from the form-state container on every render pass and
/// every event dispatch; never stored by widgets. A widget commits at most
/// one value per event through [`BindingContext::commit`]; the orchestrator
/// takes it afterwards and applies it to the shared tree, which stays
/// single-writer.
#[derive(Debug)]
pub struct BindingContext {
    value: Value,
    error: Option<FieldError>,
    staged: Option<Value>,
}

impl BindingContext {
    /// Creates a context from the committed value and current error.
    #[must_use]
    pub fn new(value: Value, error: Option<FieldError>) -> Self {
        Self {
            value,
            error,
            staged: None,
        }
    }

    /// The committed external value snapshot.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The field's current error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }

    /// Stages a value for commit. A later call within the same event wins.
    pub fn commit(&mut self, value: Value) {
        self.staged = Some(value);
    }

    /// Takes the staged commit, leaving the context clean.
    pub fn take_commit(&mut self) -> Option<Value> {
        self.staged.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_is_taken_once() {
        let mut ctx = BindingContext::new(Value::Null, None);
        assert!(ctx.take_commit().is_none());

        ctx.commit(Value::text("a"));
        ctx.commit(Value::text("b"));
        assert_eq!(ctx.take_commit(), Some(Value::text("b")));
        assert_eq!(ctx.take_commit(), None);
    }

    #[test]
    fn error_constructors_set_kind() {
        assert_eq!(FieldError::server("x").kind, ErrorKind::Server);
        assert_eq!(FieldError::validation("x").kind, ErrorKind::Validation);
        assert_eq!(FieldError::server("taken").to_string(), "taken");
    }
}
