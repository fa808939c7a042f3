// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The submit capability and structured failure payloads.

use serde::Deserialize;
use formwork_value::Value;
use tracing::warn;

/// A failed submit.
///
/// Carries a human-readable message and, when the backend reported
/// per-field problems, a `{path: message}` error map for redistribution.
/// A handler that only has a raw response body can pass it as the
/// message; the orchestrator will try to parse `{"errors": {...}}` JSON
/// out of it before giving up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitError {
    message: String,
    errors: Option<Vec<(String, String)>>,
}

impl SubmitError {
    /// A failure with no per-field structure.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }

    /// A failure with an explicit per-field error map.
    pub fn with_errors(
        message: impl Into<String>,
        errors: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        Self {
            message: message.into(),
            errors: Some(errors.into_iter().collect()),
        }
    }

    /// The failure message.
    #[must_use]
    pub fn message_text(&self) -> &str {
        &self.message
    }

    /// The per-field error map: the explicit one when present, otherwise
    /// whatever parses out of the message body.
    #[must_use]
    pub fn field_errors(&self) -> Option<Vec<(String, String)>> {
        self.errors
            .clone()
            .or_else(|| parse_error_body(&self.message))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    errors: serde_json::Map<String, serde_json::Value>,
}

/// Parses a `{"errors": {path: message}}` response body. Non-string
/// messages are dropped with a warning; anything unparsable yields `None`.
fn parse_error_body(body: &str) -> Option<Vec<(String, String)>> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let mut pairs = Vec::with_capacity(parsed.errors.len());
    for (path, message) in parsed.errors {
        match message.as_str() {
            Some(text) => pairs.push((path, text.to_owned())),
            None => warn!(path, "non-string server error message, dropping"),
        }
    }
    Some(pairs)
}

/// The submit capability: receives the value-tree snapshot.
pub trait SubmitHandler {
    /// Attempts the submit; a clean return means the backend accepted it.
    fn submit(&mut self, payload: &Value) -> Result<(), SubmitError>;
}

impl<F> SubmitHandler for F
where
    F: FnMut(&Value) -> Result<(), SubmitError>,
{
    fn submit(&mut self, payload: &Value) -> Result<(), SubmitError> {
        self(payload)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn explicit_errors_win_over_the_message_body() {
        let err = SubmitError::with_errors(
            r#"{"errors": {"from_body": "ignored"}}"#,
            [("title".to_owned(), "taken".to_owned())],
        );
        assert_eq!(
            err.field_errors(),
            Some(vec![("title".to_owned(), "taken".to_owned())])
        );
    }

    #[test]
    fn error_map_parses_out_of_a_json_message() {
        let err = SubmitError::message(r#"{"errors": {"price": "too low", "title": "taken"}}"#);
        let mut pairs = err.field_errors().unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            [
                ("price".to_owned(), "too low".to_owned()),
                ("title".to_owned(), "taken".to_owned()),
            ]
        );
    }

    #[test]
    fn non_string_messages_are_dropped() {
        let err = SubmitError::message(r#"{"errors": {"a": 5, "b": "bad"}}"#);
        assert_eq!(
            err.field_errors(),
            Some(vec![("b".to_owned(), "bad".to_owned())])
        );
    }

    #[test]
    fn unstructured_failures_have_no_field_errors() {
        assert_eq!(SubmitError::message("500 Internal Server Error").field_errors(), None);
        assert_eq!(SubmitError::message(r#"{"detail": "nope"}"#).field_errors(), None);
    }
}
