// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape mirror of the external validation schema.

use formwork_value::Value;

/// One node of the external validation schema, reduced to its shape.
///
/// The core never validates; it walks this tree to seed default values.
/// Hosts build it from their validation library's node graph. Anything the
/// host cannot map cleanly becomes [`SchemaNode::Unknown`] and resolves to
/// a safe default.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// A string node.
    Text,
    /// A numeric node.
    Number,
    /// A boolean node.
    Boolean,
    /// A date node. Forms carry dates as ISO strings, so this seeds `""`.
    DateTime,
    /// An array node with the given element shape.
    Array(Box<SchemaNode>),
    /// A literal node carrying its exact value.
    Literal(Value),
    /// An object node with named fields, in declaration order.
    Object(Vec<(String, SchemaNode)>),
    /// A union of member shapes.
    Union(Vec<SchemaNode>),
    /// An optional wrapper around an inner shape.
    Optional(Box<SchemaNode>),
    /// A nullable wrapper around an inner shape.
    Nullable(Box<SchemaNode>),
    /// A wrapper declaring an explicit default value.
    WithDefault {
        /// The wrapped shape.
        inner: Box<SchemaNode>,
        /// The declared default, used verbatim.
        value: Value,
    },
    /// The `undefined` unit shape (only meaningful inside unions).
    Undefined,
    /// The `null` unit shape (only meaningful inside unions).
    Null,
    /// A shape the host could not map.
    Unknown,
}

impl SchemaNode {
    /// Convenience constructor for an object node.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        Self::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Convenience constructor for an optional wrapper.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Convenience constructor for a nullable wrapper.
    #[must_use]
    pub fn nullable(inner: Self) -> Self {
        Self::Nullable(Box::new(inner))
    }

    /// Convenience constructor for a default wrapper.
    #[must_use]
    pub fn with_default(inner: Self, value: Value) -> Self {
        Self::WithDefault {
            inner: Box::new(inner),
            value,
        }
    }
}
