// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The form value tree.

use hashbrown::HashMap;

use crate::file::FileHandle;

/// Map type used for object values.
pub type Map = HashMap<String, Value>;

/// A value in the form tree.
///
/// JSON-shaped, plus [`Value::File`] for native file handles emitted by the
/// file widgets. The tree is owned and mutated exclusively by the form-state
/// container; widgets only ever see snapshots and stage commits through
/// their binding context.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number. Form inputs do not distinguish integer widths.
    Number(f64),
    /// A text value. Empty text is the resting state of most fields.
    Text(String),
    /// An ordered sequence (multi-select selections, variant records, files).
    Array(Vec<Value>),
    /// A keyed record (date ranges, localized text, variant records).
    Object(Map),
    /// A native file handle selected by the user.
    File(FileHandle),
}

impl Value {
    /// Creates a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Creates an empty text value.
    #[must_use]
    pub fn empty_text() -> Self {
        Self::Text(String::new())
    }

    /// Creates an empty object value.
    #[must_use]
    pub fn object() -> Self {
        Self::Object(Map::new())
    }

    /// Creates an object value from key/value pairs.
    pub fn object_from<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Object(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns the text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the number, if this is a numeric value.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the elements, if this is an array value.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the fields, if this is an object value.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the file handle, if this is a file value.
    #[must_use]
    pub fn as_file(&self) -> Option<&FileHandle> {
        match self {
            Self::File(handle) => Some(handle),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for `Null`, empty text, and empty arrays.
    ///
    /// This is the "nothing committed yet" test widgets use when deciding
    /// whether an external value should hydrate local state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Array(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Renders the value as display text for a single-line input.
    ///
    /// Scalars coerce the way a text input coerces its bound value; shaped
    /// values (arrays, objects, files) render as empty text since no
    /// single-line widget can display them directly.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Self::Bool(b) => format!("{b}"),
            Self::Null | Self::Array(_) | Self::Object(_) | Self::File(_) => String::new(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::Array(items)
    }
}

impl From<FileHandle> for Value {
    fn from(handle: FileHandle) -> Self {
        Self::File(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_null() {
        assert!(Value::default().is_null());
    }

    #[test]
    fn emptiness() {
        assert!(Value::Null.is_empty());
        assert!(Value::empty_text().is_empty());
        assert!(Value::Array(Vec::new()).is_empty());
        assert!(!Value::text("x").is_empty());
        assert!(!Value::Bool(false).is_empty());
        assert!(!Value::object().is_empty());
    }

    #[test]
    fn accessors_match_variants() {
        assert_eq!(Value::text("a").as_text(), Some("a"));
        assert_eq!(Value::Number(2.0).as_number(), Some(2.0));
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::text("a").as_number(), None);
        assert!(Value::object().as_object().is_some());
    }

    #[test]
    fn display_text_coerces_scalars() {
        assert_eq!(Value::text("hi").display_text(), "hi");
        assert_eq!(Value::Number(3.0).display_text(), "3");
        assert_eq!(Value::Number(3.5).display_text(), "3.5");
        assert_eq!(Value::Bool(true).display_text(), "true");
        assert_eq!(Value::Null.display_text(), "");
        assert_eq!(Value::Array(vec![Value::text("a")]).display_text(), "");
    }

    #[test]
    fn object_from_pairs() {
        let v = Value::object_from([("from", Value::empty_text()), ("to", Value::empty_text())]);
        let map = v.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["from"], Value::empty_text());
    }
}
