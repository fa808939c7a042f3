// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dotted paths into the value tree.

use core::fmt;
use core::str::FromStr;

use crate::value::{Map, Value};

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// An object key.
    Key(String),
    /// An array index. Parsed from all-digit segments.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Errors from parsing or applying a path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path string was empty or contained an empty segment (`"a..b"`).
    #[error("empty path segment")]
    EmptySegment,
    /// A segment addressed a value of the wrong shape, e.g. a key into an
    /// array or an index into text.
    #[error("segment `{segment}` does not match the value shape at that position")]
    ShapeMismatch {
        /// The offending segment.
        segment: String,
    },
    /// An array index would leave a hole. Setting may append at `len`, but
    /// never beyond it.
    #[error("index {index} is out of bounds for array of length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The array length at the time of the write.
        len: usize,
    },
}

/// A dotted path (`"contacts.0.email"`) into a [`Value`] tree.
///
/// Paths are how field schemas bind to slots in the shared tree. All-digit
/// segments index arrays; everything else keys objects. Paths are opaque to
/// validation — a path that resolves to nothing simply reads as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// The path's segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Resolves the path against a tree, if every step matches.
    #[must_use]
    pub fn get<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut cur = root;
        for segment in &self.segments {
            cur = match (segment, cur) {
                (Segment::Key(k), Value::Object(map)) => map.get(k)?,
                (Segment::Index(i), Value::Array(items)) => items.get(*i)?,
                _ => return None,
            };
        }
        Some(cur)
    }

    /// Writes `value` at the path, creating intermediate objects and arrays
    /// as needed.
    ///
    /// `Null` intermediates are replaced by a container matching the next
    /// segment; an index may append at the array's current length but never
    /// leave a hole. Existing values of a conflicting shape are an error,
    /// not silently replaced.
    pub fn set(&self, root: &mut Value, value: Value) -> Result<(), PathError> {
        let Some((last, rest)) = self.segments.split_last() else {
            *root = value;
            return Ok(());
        };

        let mut cur = root;
        for segment in rest {
            cur = step_mut(cur, segment)?;
        }

        match (last, cur) {
            (Segment::Key(k), slot) => {
                vivify(slot, last);
                if let Value::Object(map) = slot {
                    map.insert(k.clone(), value);
                    Ok(())
                } else {
                    Err(mismatch(last))
                }
            }
            (Segment::Index(i), slot) => {
                vivify(slot, last);
                if let Value::Array(items) = slot {
                    if *i < items.len() {
                        items[*i] = value;
                        Ok(())
                    } else if *i == items.len() {
                        items.push(value);
                        Ok(())
                    } else {
                        Err(PathError::IndexOutOfBounds {
                            index: *i,
                            len: items.len(),
                        })
                    }
                } else {
                    Err(mismatch(last))
                }
            }
        }
    }
}

/// Replaces a `Null` slot with the container shape `segment` requires.
fn vivify(slot: &mut Value, segment: &Segment) {
    if slot.is_null() {
        *slot = match segment {
            Segment::Key(_) => Value::Object(Map::new()),
            Segment::Index(_) => Value::Array(Vec::new()),
        };
    }
}

fn mismatch(segment: &Segment) -> PathError {
    PathError::ShapeMismatch {
        segment: segment.to_string(),
    }
}

/// Descends one (non-final) segment, vivifying missing intermediates.
fn step_mut<'a>(cur: &'a mut Value, segment: &Segment) -> Result<&'a mut Value, PathError> {
    vivify(cur, segment);
    match (segment, cur) {
        (Segment::Key(k), Value::Object(map)) => {
            Ok(map.entry(k.clone()).or_insert(Value::Null))
        }
        (Segment::Index(i), Value::Array(items)) => {
            let len = items.len();
            if *i == len {
                items.push(Value::Null);
            }
            items
                .get_mut(*i)
                .ok_or(PathError::IndexOutOfBounds { index: *i, len })
        }
        _ => Err(mismatch(segment)),
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::EmptySegment);
        }
        let mut segments = Vec::new();
        for part in s.split('.') {
            if part.is_empty() {
                return Err(PathError::EmptySegment);
            }
            if part.bytes().all(|b| b.is_ascii_digit()) {
                // usize overflow on absurd digit runs falls back to a key.
                match part.parse::<usize>() {
                    Ok(i) => segments.push(Segment::Index(i)),
                    Err(_) => segments.push(Segment::Key(part.to_owned())),
                }
            } else {
                segments.push(Segment::Key(part.to_owned()));
            }
        }
        Ok(Self { segments })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> Path {
        s.parse().unwrap()
    }

    #[test]
    fn parse_keys_and_indices() {
        let p = path("a.0.b");
        assert_eq!(
            p.segments(),
            &[
                Segment::Key("a".into()),
                Segment::Index(0),
                Segment::Key("b".into()),
            ]
        );
        assert_eq!(p.to_string(), "a.0.b");
    }

    #[test]
    fn parse_rejects_empty_segments() {
        assert_eq!("".parse::<Path>(), Err(PathError::EmptySegment));
        assert_eq!("a..b".parse::<Path>(), Err(PathError::EmptySegment));
        assert_eq!("a.".parse::<Path>(), Err(PathError::EmptySegment));
    }

    #[test]
    fn set_then_get_round_trip() {
        let mut tree = Value::object();
        path("user.name").set(&mut tree, Value::text("ada")).unwrap();
        assert_eq!(path("user.name").get(&tree), Some(&Value::text("ada")));
        assert_eq!(path("user.other").get(&tree), None);
    }

    #[test]
    fn set_vivifies_arrays_and_objects() {
        let mut tree = Value::object();
        path("rows.0.title").set(&mut tree, Value::text("x")).unwrap();
        path("rows.1.title").set(&mut tree, Value::text("y")).unwrap();
        assert_eq!(path("rows.1.title").get(&tree), Some(&Value::text("y")));
        assert_eq!(path("rows").get(&tree).unwrap().as_array().unwrap().len(), 2);
    }

    #[test]
    fn set_rejects_holes() {
        let mut tree = Value::object();
        let err = path("rows.3").set(&mut tree, Value::text("x")).unwrap_err();
        assert_eq!(err, PathError::IndexOutOfBounds { index: 3, len: 0 });
    }

    #[test]
    fn set_rejects_shape_conflicts() {
        let mut tree = Value::object();
        path("a").set(&mut tree, Value::text("scalar")).unwrap();
        let err = path("a.b").set(&mut tree, Value::text("x")).unwrap_err();
        assert!(matches!(err, PathError::ShapeMismatch { .. }));
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut tree = Value::object();
        path("a").set(&mut tree, Value::Number(1.0)).unwrap();
        path("a").set(&mut tree, Value::Number(2.0)).unwrap();
        assert_eq!(path("a").get(&tree), Some(&Value::Number(2.0)));
    }

    #[test]
    fn empty_root_path_is_an_error() {
        assert!("".parse::<Path>().is_err());
    }

    #[test]
    fn get_on_mismatched_shape_is_none() {
        let tree = Value::text("scalar");
        assert_eq!(path("a").get(&tree), None);
        assert_eq!(path("0").get(&tree), None);
    }
}
