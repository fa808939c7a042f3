// Copyright 2026 the Formwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Formwork Defaults: initial form values from validation schema shapes.
//!
//! Validation itself is external; this crate only reads the *shape* of the
//! externally owned validation schema, mirrored as a [`SchemaNode`] tree,
//! and produces an initial [`Value`] for every field. Hosts translate their
//! validation library's node graph into [`SchemaNode`] once per form
//! definition.
//!
//! Resolution is total: unrecognized shapes resolve to empty text rather
//! than failing, so a form always has a complete default tree to bind.
//!
//! ## Minimal example
//!
//! ```rust
//! use formwork_defaults::{SchemaNode, resolve_defaults};
//! use formwork_value::Value;
//!
//! let schema = SchemaNode::Object(vec![
//!     ("title".into(), SchemaNode::Text),
//!     ("count".into(), SchemaNode::Number),
//!     ("tags".into(), SchemaNode::Array(Box::new(SchemaNode::Text))),
//! ]);
//!
//! let defaults = resolve_defaults(&schema, []);
//! let map = defaults.as_object().unwrap();
//! assert_eq!(map["title"], Value::empty_text());
//! assert_eq!(map["count"], Value::Number(0.0));
//! assert_eq!(map["tags"], Value::Array(Vec::new()));
//! ```

mod node;
mod resolve;

pub use node::SchemaNode;
pub use resolve::{resolve_defaults, resolve_node};
