// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive default-value resolution.

use formwork_value::{Map, Value};
use tracing::debug;

use crate::node::SchemaNode;

/// The locale codes whose key sets are treated as localized-text objects.
const LOCALE_KEYS: [&str; 4] = ["en", "ar", "fr", "de"];

/// Resolves a default value tree for a whole form schema.
///
/// The root is expected to be an object; its fields resolve individually
/// (root-level objects are never subject to the range/locale key-set
/// special cases, which only apply to nested objects). `overrides` is
/// shallow-merged on top of the resolved tree after full resolution, so
/// override keys always win and repeated application of the same overrides
/// is idempotent.
///
/// A non-object root resolves through [`resolve_node`] directly; overrides
/// then apply only if the result is an object.
pub fn resolve_defaults(
    schema: &SchemaNode,
    overrides: impl IntoIterator<Item = (String, Value)>,
) -> Value {
    let mut resolved = match schema {
        SchemaNode::Object(fields) => {
            let mut map = Map::new();
            for (key, node) in fields {
                map.insert(key.clone(), resolve_node(node));
            }
            Value::Object(map)
        }
        other => resolve_node(other),
    };

    if let Value::Object(map) = &mut resolved {
        for (key, value) in overrides {
            map.insert(key, value);
        }
    }
    resolved
}

/// Resolves the default for a single schema node.
///
/// Wrapper unwrapping happens first: `Optional`/`Nullable` recurse into
/// their inner shape, and `WithDefault` short-circuits to its declared
/// value. Leaves follow the fixed policy (text → `""`, number → `0`,
/// boolean → `false`, array → `[]`, date → `""`, literal → its value).
///
/// Object nodes are sniffed structurally before generic recursion:
///
/// - a key set containing both `from` and `to` resolves to
///   `{from: "", to: ""}` as a unit (date ranges), and
/// - a key set entirely within `{en, ar, fr, de}` resolves every present
///   key to `""` (localized text).
///
/// This key-set matching is fragile by construction — any unrelated object
/// whose keys happen to match is treated the same way — and is kept for
/// compatibility with existing form definitions.
///
/// Unions drop `undefined`/`null` members and resolve the first remaining
/// member; anything unrecognized resolves to empty text.
#[must_use]
pub fn resolve_node(node: &SchemaNode) -> Value {
    match node {
        SchemaNode::Optional(inner) | SchemaNode::Nullable(inner) => resolve_node(inner),
        SchemaNode::WithDefault { value, .. } => value.clone(),

        SchemaNode::Text => Value::empty_text(),
        SchemaNode::Number => Value::Number(0.0),
        SchemaNode::Boolean => Value::Bool(false),
        SchemaNode::Array(_) => Value::Array(Vec::new()),
        SchemaNode::DateTime => Value::empty_text(),
        SchemaNode::Literal(value) => value.clone(),

        SchemaNode::Object(fields) => resolve_object(fields),

        SchemaNode::Union(members) => {
            let mut candidates = members
                .iter()
                .filter(|m| !matches!(m, SchemaNode::Undefined | SchemaNode::Null));
            match candidates.next() {
                Some(first) => resolve_node(first),
                None => Value::empty_text(),
            }
        }

        SchemaNode::Undefined | SchemaNode::Null | SchemaNode::Unknown => {
            debug!(?node, "unresolvable schema shape, seeding empty text");
            Value::empty_text()
        }
    }
}

fn resolve_object(fields: &[(String, SchemaNode)]) -> Value {
    let has = |key: &str| fields.iter().any(|(k, _)| k == key);

    // Date-range shape: any object carrying both endpoints resolves as a
    // unit, regardless of the endpoint node shapes.
    if has("from") && has("to") {
        return Value::object_from([("from", Value::empty_text()), ("to", Value::empty_text())]);
    }

    // Localized-text shape: every key drawn from the recognized locale set.
    if fields
        .iter()
        .all(|(k, _)| LOCALE_KEYS.contains(&k.as_str()))
    {
        let mut map = Map::new();
        for (key, _) in fields {
            map.insert(key.clone(), Value::empty_text());
        }
        return Value::Object(map);
    }

    let mut map = Map::new();
    for (key, node) in fields {
        map.insert(key.clone(), resolve_node(node));
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn primitive_leaf_policy() {
        assert_eq!(resolve_node(&SchemaNode::Text), Value::empty_text());
        assert_eq!(resolve_node(&SchemaNode::Number), Value::Number(0.0));
        assert_eq!(resolve_node(&SchemaNode::Boolean), Value::Bool(false));
        assert_eq!(
            resolve_node(&SchemaNode::Array(Box::new(SchemaNode::Number))),
            Value::Array(Vec::new())
        );
        assert_eq!(resolve_node(&SchemaNode::DateTime), Value::empty_text());
        assert_eq!(
            resolve_node(&SchemaNode::Literal(Value::text("fixed"))),
            Value::text("fixed")
        );
    }

    #[test]
    fn wrappers_unwrap_recursively() {
        let node = SchemaNode::optional(SchemaNode::nullable(SchemaNode::Number));
        assert_eq!(resolve_node(&node), Value::Number(0.0));
    }

    #[test]
    fn declared_default_short_circuits() {
        let node = SchemaNode::with_default(SchemaNode::Text, Value::text("preset"));
        assert_eq!(resolve_node(&node), Value::text("preset"));

        // Even under further wrapping.
        let node = SchemaNode::optional(node);
        assert_eq!(resolve_node(&node), Value::text("preset"));
    }

    #[test]
    fn range_shape_resolves_as_a_unit() {
        let node = SchemaNode::object([
            ("from", SchemaNode::Text),
            ("to", SchemaNode::Text),
        ]);
        assert_eq!(
            resolve_node(&node),
            Value::object_from([("from", Value::empty_text()), ("to", Value::empty_text())])
        );
    }

    #[test]
    fn range_shape_wins_even_with_extra_keys_and_odd_members() {
        // The key-set sniff only requires both endpoints to be present.
        let node = SchemaNode::object([
            ("from", SchemaNode::Number),
            ("to", SchemaNode::Boolean),
            ("note", SchemaNode::Text),
        ]);
        let resolved = resolve_node(&node);
        let map = resolved.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["from"], Value::empty_text());
        assert_eq!(map["to"], Value::empty_text());
    }

    #[test]
    fn locale_shape_resolves_present_keys() {
        let node = SchemaNode::object([("en", SchemaNode::Text), ("ar", SchemaNode::Text)]);
        assert_eq!(
            resolve_node(&node),
            Value::object_from([("en", Value::empty_text()), ("ar", Value::empty_text())])
        );
    }

    #[test]
    fn locale_shape_requires_every_key_in_the_set() {
        let node = SchemaNode::object([("en", SchemaNode::Text), ("es", SchemaNode::Number)]);
        let resolved = resolve_node(&node);
        let map = resolved.as_object().unwrap();
        // Generic recursion: `es` is outside the recognized set.
        assert_eq!(map["en"], Value::empty_text());
        assert_eq!(map["es"], Value::Number(0.0));
    }

    #[test]
    fn generic_objects_recurse_field_by_field() {
        let node = SchemaNode::object([
            ("name", SchemaNode::Text),
            (
                "address",
                SchemaNode::object([("city", SchemaNode::Text), ("zip", SchemaNode::Number)]),
            ),
        ]);
        let resolved = resolve_node(&node);
        let map = resolved.as_object().unwrap();
        let address = map["address"].as_object().unwrap();
        assert_eq!(address["zip"], Value::Number(0.0));
    }

    #[test]
    fn unions_skip_null_like_members() {
        let node = SchemaNode::Union(vec![
            SchemaNode::Undefined,
            SchemaNode::Null,
            SchemaNode::Number,
            SchemaNode::Text,
        ]);
        assert_eq!(resolve_node(&node), Value::Number(0.0));

        let all_null = SchemaNode::Union(vec![SchemaNode::Undefined, SchemaNode::Null]);
        assert_eq!(resolve_node(&all_null), Value::empty_text());
    }

    #[test]
    fn unknown_shapes_never_fail() {
        assert_eq!(resolve_node(&SchemaNode::Unknown), Value::empty_text());
        assert_eq!(resolve_node(&SchemaNode::Undefined), Value::empty_text());
        assert_eq!(resolve_node(&SchemaNode::Null), Value::empty_text());
    }

    #[test]
    fn overrides_win_and_are_idempotent() {
        let schema = SchemaNode::object([
            ("title", SchemaNode::Text),
            ("count", SchemaNode::Number),
        ]);
        let overrides = vec![("count".to_owned(), Value::Number(5.0))];

        let once = resolve_defaults(&schema, overrides.clone());
        let map = once.as_object().unwrap();
        assert_eq!(map["title"], Value::empty_text());
        assert_eq!(map["count"], Value::Number(5.0));

        // Re-applying the same overrides over the already-merged tree
        // changes nothing.
        let twice = match once.clone() {
            Value::Object(map) => {
                let mut map = map;
                for (k, v) in overrides {
                    map.insert(k, v);
                }
                Value::Object(map)
            }
            other => other,
        };
        assert_eq!(once, twice);
    }

    #[test]
    fn override_keys_outside_the_schema_are_kept() {
        let schema = SchemaNode::object([("a", SchemaNode::Text)]);
        let resolved =
            resolve_defaults(&schema, [("extra".to_owned(), Value::Bool(true))]);
        assert_eq!(resolved.as_object().unwrap()["extra"], Value::Bool(true));
    }

    #[test]
    fn root_fields_are_not_sniffed_but_nested_objects_are() {
        // A form whose top-level fields happen to be named `from`/`to`
        // still resolves per field; the sniff targets nested objects only.
        let schema = SchemaNode::object([
            ("from", SchemaNode::Number),
            ("to", SchemaNode::Number),
        ]);
        let resolved = resolve_defaults(&schema, []);
        let map = resolved.as_object().unwrap();
        assert_eq!(map["from"], Value::Number(0.0));

        let nested = SchemaNode::object([(
            "stay",
            SchemaNode::object([("from", SchemaNode::DateTime), ("to", SchemaNode::DateTime)]),
        )]);
        let resolved = resolve_defaults(&nested, []);
        assert_eq!(
            resolved.as_object().unwrap()["stay"],
            Value::object_from([("from", Value::empty_text()), ("to", Value::empty_text())])
        );
    }

    #[test]
    fn empty_object_matches_the_locale_sniff_vacuously() {
        // Kept for compatibility: an empty key set trivially satisfies
        // "every key is a locale", and both paths produce `{}` anyway.
        assert_eq!(resolve_node(&SchemaNode::Object(Vec::new())), Value::object());
    }
}
